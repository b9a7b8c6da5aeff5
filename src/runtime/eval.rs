use crate::parser::expr::{Expr, Scalar, Conditional, ListLiteral, FunctionCall, ScopedFunctionCall};
use crate::parser::operator::CompareOp;
use crate::runtime::Environment;
use crate::runtime::callframe::CallFrame;
use crate::runtime::compare::compare_values;
use crate::runtime::pattern::glob_match;
use crate::runtime::function::Invoke;
use crate::runtime::errors::{EvalResult, EvalError, ErrorKind};


pub fn eval_expr(env: &Environment, expr: &Expr) -> EvalResult<Expr> {
    let ctx = EvalContext::from(env);
    ctx.eval(expr)
}

impl Expr {
    /// Evaluate this tree, producing a new expression. The tree itself is never modified.
    pub fn evaluate(&self, env: &Environment) -> EvalResult<Expr> {
        eval_expr(env, self)
    }
}


pub struct EvalContext<'e> {
    env: &'e Environment,
}

impl<'e> From<&'e Environment> for EvalContext<'e> {
    fn from(env: &'e Environment) -> Self {
        EvalContext { env }
    }
}

impl<'e> EvalContext<'e> {
    pub fn eval(&self, expr: &Expr) -> EvalResult<Expr> {
        match expr {
            Expr::Scalar(..) => Ok(expr.clone()),

            Expr::Symbol(symbol) => Ok(self.env.get(&symbol.literal())),

            Expr::Conditional(cond) => self.eval_conditional(cond),

            Expr::Or(operands) => {
                let (ref lhs, ref rhs) = **operands;
                self.eval_short_circuit(true, lhs, rhs)
            },
            Expr::And(operands) => {
                let (ref lhs, ref rhs) = **operands;
                self.eval_short_circuit(false, lhs, rhs)
            },

            Expr::Compare(op, operands) => {
                let (ref lhs, ref rhs) = **operands;
                self.eval_compare(*op, lhs, rhs)
            },

            Expr::Concat(operands) => {
                let (ref lhs, ref rhs) = **operands;
                let mut text = self.eval(lhs)?.to_text();
                text.push_str(&self.eval(rhs)?.to_text());
                Ok(Scalar::bare(text).into())
            },

            Expr::List(list) => self.eval_list(list),

            Expr::In(operands) => {
                let (ref probe, ref list) = **operands;
                self.eval_in(probe, list)
            },

            Expr::Like(operands) => {
                let (ref text, ref pattern) = **operands;
                let text = self.eval(text)?.to_text();
                let pattern = self.eval(pattern)?.to_text();
                Ok(self.env.bool_value(glob_match(&text, &pattern)))
            },

            Expr::Call(call) => self.eval_call(call),
            Expr::ScopedCall(call) => self.eval_scoped_call(call),

            Expr::Native(..) | Expr::ScopedNative(..) => Ok(expr.clone()),
        }
    }

    // only the chosen branch is evaluated
    fn eval_conditional(&self, cond: &Conditional) -> EvalResult<Expr> {
        if self.eval(&cond.condition)?.truth_value() {
            self.eval(&cond.left)
        } else {
            self.eval(&cond.right)
        }
    }

    // stops at the first operand whose truth value equals `decisive`
    fn eval_short_circuit(&self, decisive: bool, lhs: &Expr, rhs: &Expr) -> EvalResult<Expr> {
        if self.eval(lhs)?.truth_value() == decisive {
            return Ok(self.env.bool_value(decisive));
        }

        let result = self.eval(rhs)?.truth_value();
        Ok(self.env.bool_value(result))
    }

    fn eval_compare(&self, op: CompareOp, lhs: &Expr, rhs: &Expr) -> EvalResult<Expr> {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;

        match (lhs.value(), rhs.value()) {
            (Some(lhs_value), Some(rhs_value)) => {
                let result = compare_values(op, lhs_value, rhs_value)?;
                Ok(self.env.bool_value(result))
            }
            _ => {
                let message = format!("cannot compare {} with {}", lhs.literal(), rhs.literal());
                Err(EvalError::new(ErrorKind::TypeMismatch, message))
            }
        }
    }

    fn eval_list(&self, list: &ListLiteral) -> EvalResult<Expr> {
        let items = list.items().iter()
            .map(|item| self.eval(item))
            .collect::<EvalResult<Vec<Expr>>>()?;

        Ok(ListLiteral::from(items).into())
    }

    fn eval_in(&self, probe: &Expr, list: &Expr) -> EvalResult<Expr> {
        let probe = self.eval(probe)?.to_text();
        let list = self.eval(list)?;

        let list = list.as_list().ok_or_else(|| {
            EvalError::new(ErrorKind::NotAList, format!("{} is not a list", list.literal()))
        })?;

        let found = list.items().iter().any(|item| item.to_text() == probe);
        Ok(self.env.bool_value(found))
    }

    fn eval_args(&self, args: &[Expr]) -> EvalResult<Vec<Expr>> {
        args.iter().map(|arg| self.eval(arg)).collect()
    }

    fn eval_call(&self, call: &FunctionCall) -> EvalResult<Expr> {
        let callee = self.eval(call.callee())?;
        if !callee.is_callable() {
            return Err(not_a_function(call.callee()));
        }

        let args = self.eval_args(call.args())?;
        self.invoke(callee, call.args(), &args)
    }

    fn eval_scoped_call(&self, call: &ScopedFunctionCall) -> EvalResult<Expr> {
        let name = call.qualified_name();
        let callee = self.env.get(&name);

        let args = match &callee {
            // the evaluated scope becomes the first argument
            Expr::ScopedNative(..) => {
                let mut args = vec![ self.eval(call.scope())? ];
                args.extend(self.eval_args(call.args())?);
                args
            }

            // a namespaced function, but any call in the scope chain still runs
            Expr::Native(..) => {
                if !matches!(call.scope(), Expr::Symbol(..)) {
                    self.eval(call.scope())?;
                }
                self.eval_args(call.args())?
            }

            _ => {
                let message = format!("\"{}\" is not a function", name);
                return Err(EvalError::new(ErrorKind::NotAFunction, message));
            }
        };

        self.invoke(callee, call.args(), &args)
    }

    fn invoke(&self, callee: Expr, raw_args: &[Expr], args: &[Expr]) -> EvalResult<Expr> {
        let frame = CallFrame::new(callee.clone(), raw_args);
        let _guard = self.env.push_frame(frame)?;

        match &callee {
            Expr::Native(func) => func.invoke(self.env, args),
            Expr::ScopedNative(func) => func.invoke(self.env, args),
            _ => Err(not_a_function(&callee)),
        }
    }
}

fn not_a_function(expr: &Expr) -> EvalError {
    EvalError::new(ErrorKind::NotAFunction, format!("\"{}\" is not a function", expr.literal()))
}
