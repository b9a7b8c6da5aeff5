use std::fmt;
use crate::utils;
use crate::language;
use crate::parser::operator::CompareOp;
use crate::parser::errors::ParserErrorKind;
use crate::runtime::Value;
use crate::runtime::function::{NativeFunction, ScopedNativeFunction, Invoke};


/// An expression tree node. Trees are immutable once built; evaluation
/// always produces new nodes rather than modifying existing ones.
#[derive(Debug, Clone)]
pub enum Expr {

    Scalar(Scalar),

    Symbol(Symbol),

    Conditional(Box<Conditional>),

    Or(Box<(Expr, Expr)>),

    And(Box<(Expr, Expr)>),

    Compare(CompareOp, Box<(Expr, Expr)>),

    Concat(Box<(Expr, Expr)>),

    List(ListLiteral),

    In(Box<(Expr, Expr)>),

    Like(Box<(Expr, Expr)>),

    Call(FunctionCall),

    ScopedCall(ScopedFunctionCall),

    Native(NativeFunction),

    ScopedNative(ScopedNativeFunction),

}

impl Expr {
    pub fn or(lhs: Expr, rhs: Expr) -> Self { Self::Or(Box::new((lhs, rhs))) }
    pub fn and(lhs: Expr, rhs: Expr) -> Self { Self::And(Box::new((lhs, rhs))) }
    pub fn concat(lhs: Expr, rhs: Expr) -> Self { Self::Concat(Box::new((lhs, rhs))) }
    pub fn is_in(probe: Expr, list: Expr) -> Self { Self::In(Box::new((probe, list))) }
    pub fn like(text: Expr, pattern: Expr) -> Self { Self::Like(Box::new((text, pattern))) }

    pub fn compare(op: CompareOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Compare(op, Box::new((lhs, rhs)))
    }

    pub fn conditional(condition: Expr, left: Expr, right: Expr) -> Self {
        Self::Conditional(Box::new(Conditional { condition, left, right }))
    }

    /// The payload of a scalar. Every other node has none.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Scalar(scalar) => Some(scalar.value()),
            _ => None,
        }
    }

    /// Only scalars carrying nil or false are falsy.
    pub fn truth_value(&self) -> bool {
        self.value().map_or(true, Value::truth_value)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Self::Native(..) | Self::ScopedNative(..))
    }

    pub fn as_list(&self) -> Option<&ListLiteral> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Canonical re-serialization of the tree.
    pub fn literal(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.literal().to_string(),
            Self::Symbol(symbol) => symbol.literal(),

            Self::Conditional(cond) => format!(
                "({} ? {} : {})", cond.condition.literal(), cond.left.literal(), cond.right.literal()
            ),

            Self::Or(operands) => fmt_binary("||", operands),
            Self::And(operands) => fmt_binary("&&", operands),
            Self::Compare(op, operands) => fmt_binary(op.symbol(), operands),
            Self::Concat(operands) => fmt_binary("+", operands),
            Self::In(operands) => fmt_binary(language::KEYWORD_IN, operands),
            Self::Like(operands) => fmt_binary(language::KEYWORD_LIKE, operands),

            Self::List(list) => format!("[{}]", fmt_literals(list.items())),

            Self::Call(call) => format!("{}({})", call.callee().literal(), fmt_literals(call.args())),
            Self::ScopedCall(call) => format!(
                "{}{}{}({})", call.scope().literal(), language::SCOPE_SEPARATOR, call.name(), fmt_literals(call.args())
            ),

            Self::Native(func) => format!("#native:{}", func.name()),
            Self::ScopedNative(func) => format!("#native:{}", func.qualified_name()),
        }
    }

    /// The string form used when an expression takes part in string operations.
    pub fn to_text(&self) -> String {
        match self {
            Self::Scalar(scalar) => scalar.value().to_text(),
            Self::List(list) => {
                let items = list.items().iter()
                    .map(|item| item.to_text())
                    .collect::<Vec<String>>();
                format!("[{}]", items.join(", "))
            }
            other => other.literal(),
        }
    }
}

fn fmt_binary(op: &str, operands: &(Expr, Expr)) -> String {
    let (ref lhs, ref rhs) = *operands;
    format!("({} {} {})", lhs.literal(), op, rhs.literal())
}

fn fmt_literals(items: &[Expr]) -> String {
    items.iter()
        .map(|item| item.literal())
        .collect::<Vec<String>>()
        .join(", ")
}

impl fmt::Display for Expr {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(scalar) => write!(fmt, "{}", scalar.value()),
            Self::List(list) => write!(fmt, "[{}]", utils::fmt_join(", ", list.items())),
            Self::Native(func) => write!(fmt, "<native function {}>", func.name()),
            Self::ScopedNative(func) => write!(fmt, "<native function {}>", func.qualified_name()),
            other => fmt.write_str(&other.literal()),
        }
    }
}


// Terminal, self-evaluating value

#[derive(Debug, Clone)]
pub struct Scalar {
    literal: String,
    value: Value,
}

impl Scalar {
    pub fn new(literal: impl ToString, value: Value) -> Self {
        Scalar { literal: literal.to_string(), value }
    }

    /// A scalar whose literal is derived from its value.
    pub fn from_value(value: impl Into<Value>) -> Self {
        let value = value.into();
        Scalar { literal: value.fmt_literal(), value }
    }

    /// A computed scalar with no source literal.
    pub fn bare(value: impl Into<Value>) -> Self {
        Scalar { literal: String::new(), value: value.into() }
    }

    pub fn literal(&self) -> &str { &self.literal }
    pub fn value(&self) -> &Value { &self.value }
}

impl From<Scalar> for Expr {
    fn from(scalar: Scalar) -> Self { Expr::Scalar(scalar) }
}


// Named reference, optionally qualified by a parent scope

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    name: String,
    scope: Option<Box<Symbol>>,
}

impl Symbol {
    pub fn new(name: impl ToString) -> Self {
        Symbol { name: name.to_string(), scope: None }
    }

    pub fn with_scope(name: impl ToString, scope: Symbol) -> Self {
        Symbol { name: name.to_string(), scope: Some(Box::new(scope)) }
    }

    /// Build a scope chain from a dotted path such as `a.b.c`.
    pub fn from_path(path: &str) -> Self {
        let mut segments = path.split(language::SCOPE_SEPARATOR);
        let mut symbol = Symbol::new(segments.next().unwrap_or_default());
        for name in segments {
            symbol = Symbol::with_scope(name, symbol);
        }
        symbol
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn scope(&self) -> Option<&Symbol> { self.scope.as_deref() }

    /// The fully qualified dotted name, also the environment key.
    pub fn literal(&self) -> String {
        match &self.scope {
            Some(scope) => format!("{}{}{}", scope.literal(), language::SCOPE_SEPARATOR, self.name),
            None => self.name.clone(),
        }
    }
}

impl From<Symbol> for Expr {
    fn from(symbol: Symbol) -> Self { Expr::Symbol(symbol) }
}


#[derive(Debug, Clone)]
pub struct Conditional {
    pub condition: Expr,
    pub left: Expr,   // chosen when the condition is truthy
    pub right: Expr,  // chosen otherwise
}


#[derive(Debug, Clone, Default)]
pub struct ListLiteral {
    items: Vec<Expr>,
}

impl ListLiteral {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, item: Expr) { self.items.push(item) }

    pub fn len(&self) -> usize { self.items.len() }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn items(&self) -> &[Expr] { &self.items }
}

impl From<Vec<Expr>> for ListLiteral {
    fn from(items: Vec<Expr>) -> Self { ListLiteral { items } }
}

impl From<ListLiteral> for Expr {
    fn from(list: ListLiteral) -> Self { Expr::List(list) }
}


#[derive(Debug, Clone)]
pub struct FunctionCall {
    callee: Box<Expr>,
    args: Box<[Expr]>,
}

impl FunctionCall {
    pub fn new(callee: Expr, args: Vec<Expr>) -> Self {
        FunctionCall { callee: Box::new(callee), args: args.into_boxed_slice() }
    }

    pub fn callee(&self) -> &Expr { &self.callee }
    pub fn args(&self) -> &[Expr] { &self.args }
}

impl From<FunctionCall> for Expr {
    fn from(call: FunctionCall) -> Self { Expr::Call(call) }
}


/// A call qualified by a scope, e.g. `a.b(x)` or `a.b(x).c()`.
#[derive(Debug, Clone)]
pub struct ScopedFunctionCall {
    name: String,
    scope: Box<Expr>,
    args: Box<[Expr]>,
}

impl ScopedFunctionCall {
    /// The scope must be a symbol or another call.
    pub fn new(name: impl ToString, scope: Expr, args: Vec<Expr>) -> Result<Self, ParserErrorKind> {
        if !matches!(scope, Expr::Symbol(..) | Expr::Call(..) | Expr::ScopedCall(..)) {
            return Err(ParserErrorKind::InvalidScopeTarget);
        }

        Ok(ScopedFunctionCall {
            name: name.to_string(),
            scope: Box::new(scope),
            args: args.into_boxed_slice(),
        })
    }

    pub fn name(&self) -> &str { &self.name }
    pub fn scope(&self) -> &Expr { &self.scope }
    pub fn args(&self) -> &[Expr] { &self.args }

    /// The dotted path used to resolve the callee. Calls in the scope chain
    /// contribute their callee path, so `a.b(x).c()` resolves `a.b.c`.
    pub fn qualified_name(&self) -> String {
        let scope_path = match self.scope.as_ref() {
            Expr::Symbol(symbol) => symbol.literal(),
            Expr::Call(call) => call.callee().literal(),
            Expr::ScopedCall(call) => call.qualified_name(),
            other => other.literal(),
        };
        format!("{}{}{}", scope_path, language::SCOPE_SEPARATOR, self.name)
    }
}

impl From<ScopedFunctionCall> for Expr {
    fn from(call: ScopedFunctionCall) -> Self { Expr::ScopedCall(call) }
}

impl From<NativeFunction> for Expr {
    fn from(func: NativeFunction) -> Self { Expr::Native(func) }
}

impl From<ScopedNativeFunction> for Expr {
    fn from(func: ScopedNativeFunction) -> Self { Expr::ScopedNative(func) }
}
