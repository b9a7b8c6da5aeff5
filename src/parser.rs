mod errors;
mod tests;

pub mod expr;
pub mod operator;
pub mod stream;

pub use errors::{ParserError, ParserErrorKind, ParseResult};

use crate::language;
use crate::lexer::{Lexer, LexerBuilder, Token, TokenKind};
use crate::runtime::Value;

use expr::{Expr, Scalar, Symbol, ListLiteral, FunctionCall, ScopedFunctionCall};
use operator::ComparisonTier;
use stream::TokenStream;
use errors::{ErrorPrototype, ErrorKind};


/// Parse a complete expression from `source`. Input left over after the
/// expression is ignored; see `parse_expression_strict`.
pub fn parse_expression(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(LexerBuilder::new().build(source));
    parser.parse()
}

/// Like `parse_expression`, but fails with `TrailingInput` unless the whole source was consumed.
pub fn parse_expression_strict(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(LexerBuilder::new().build(source));
    let expr = parser.parse()?;
    parser.finish(expr)
}


#[derive(Debug, Clone)]
pub struct ParserOptions {
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions { max_depth: language::DEFAULT_MAX_PARSE_DEPTH }
    }
}


// Recursive descent parser

pub struct Parser<'s> {
    tokens: TokenStream<'s>,
    options: ParserOptions,
    depth: usize,
}

type InternalResult<T> = Result<T, ErrorPrototype>;

impl<'s> Parser<'s> {

    pub fn new(lexer: Lexer<'s>) -> Self {
        Self::with_options(lexer, ParserOptions::default())
    }

    pub fn with_options(lexer: Lexer<'s>, options: ParserOptions) -> Self {
        Parser {
            tokens: TokenStream::new(lexer),
            options,
            depth: 0,
        }
    }

    fn advance(&mut self) -> InternalResult<Option<Token>> {
        Ok(self.tokens.next()?)
    }

    fn peek(&mut self) -> InternalResult<Option<&Token>> {
        Ok(self.tokens.peek()?)
    }

    // consume the next token only if it is the given operator
    fn match_operator(&mut self, op: &str) -> InternalResult<bool> {
        let is_match = matches!(self.peek()?, Some(token) if token.is_operator(op));
        if is_match {
            self.advance()?;
        }
        Ok(is_match)
    }

    // guards the recursion depth of a nested rule
    fn nested<T>(&mut self, rule: impl FnOnce(&mut Self) -> InternalResult<T>) -> InternalResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(ErrorKind::NestingTooDeep.into());
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    /// Parse a single expression. Stops at the first token that cannot continue it.
    pub fn parse(&mut self) -> ParseResult<Expr> {
        log::debug!("parse start");

        let result = self.parse_expr().map_err(ParserError::from_prototype);

        match &result {
            Ok(expr) => log::debug!("parse finished: {}", expr.literal()),
            Err(error) => log::debug!("parse failed: {}", error),
        }
        result
    }

    /// Check that all input has been consumed after `expr` was parsed.
    pub fn finish(&mut self, expr: Expr) -> ParseResult<Expr> {
        match self.tokens.next() {
            Ok(None) => Ok(expr),

            Ok(Some(token)) => {
                let error = ErrorPrototype::from(ErrorKind::TrailingInput)
                    .at_token(&token)
                    .with_partial(|| expr);
                Err(ParserError::from_prototype(error))
            },

            Err(lexer_error) => {
                let error = ErrorPrototype::from(lexer_error).with_partial(|| expr);
                Err(ParserError::from_prototype(error))
            },
        }
    }

    /*** Expression Parsing ***/

    fn parse_expr(&mut self) -> InternalResult<Expr> {
        self.nested(Self::parse_cond_expr)
    }

    /*
        Conditional syntax:

        cond-expr ::= or-expr ( "?" expr ":" expr )? ;
    */
    fn parse_cond_expr(&mut self) -> InternalResult<Expr> {
        let condition = self.parse_or_expr()?;

        if !self.match_operator("?")? {
            return Ok(condition);
        }

        let left = self.parse_expr()
            .map_err(|error| error.with_partial(|| condition.clone()))?;

        match self.advance()? {
            Some(token) if token.is_operator(":") => { },

            Some(token) => return Err(
                ErrorPrototype::from(ErrorKind::ExpectedColon).at_token(&token).with_partial(|| condition)
            ),
            None => return Err(
                ErrorPrototype::from(ErrorKind::ExpectedColon).with_partial(|| condition)
            ),
        }

        let right = self.parse_expr()
            .map_err(|error| error.with_partial(|| condition.clone()))?;

        Ok(Expr::conditional(condition, left, right))
    }

    /*
        Logical operator syntax (right-recursive):

        or-expr  ::= and-expr ( "||" or-expr )? ;
        and-expr ::= cmp-expr ( "&&" and-expr )? ;
    */
    fn parse_or_expr(&mut self) -> InternalResult<Expr> {
        let lhs = self.parse_and_expr()?;

        if !self.match_operator("||")? {
            return Ok(lhs);
        }

        let rhs = self.nested(Self::parse_or_expr)
            .map_err(|error| error.with_partial(|| lhs.clone()))?;
        Ok(Expr::or(lhs, rhs))
    }

    fn parse_and_expr(&mut self) -> InternalResult<Expr> {
        let lhs = self.parse_cmp_expr()?;

        if !self.match_operator("&&")? {
            return Ok(lhs);
        }

        let rhs = self.nested(Self::parse_and_expr)
            .map_err(|error| error.with_partial(|| lhs.clone()))?;
        Ok(Expr::and(lhs, rhs))
    }

    /*
        Comparison syntax (not chainable):

        cmp-expr ::= concat-expr ( ( "==" | "!=" | ">=" | ">" | "<=" | "<" | "like" | "in" ) concat-expr )? ;
    */
    fn parse_cmp_expr(&mut self) -> InternalResult<Expr> {
        let lhs = self.parse_concat_expr()?;

        let tier = match self.peek()? {
            Some(token) => ComparisonTier::from_token(token),
            None => None,
        };

        let tier = match tier {
            Some(tier) => tier,
            None => return Ok(lhs),
        };

        self.advance()?; // consume the operator

        let rhs = self.parse_concat_expr()
            .map_err(|error| error.with_partial(|| lhs.clone()))?;

        let expr = match tier {
            ComparisonTier::Compare(op) => Expr::compare(op, lhs, rhs),
            ComparisonTier::Like => Expr::like(lhs, rhs),
            ComparisonTier::In => Expr::is_in(lhs, rhs),
        };
        Ok(expr)
    }

    /*
        Concatenation syntax (right-recursive):

        concat-expr ::= atom ( "+" concat-expr )? ;
    */
    fn parse_concat_expr(&mut self) -> InternalResult<Expr> {
        let lhs = self.parse_atom()?;

        if !self.match_operator("+")? {
            return Ok(lhs);
        }

        let rhs = self.nested(Self::parse_concat_expr)
            .map_err(|error| error.with_partial(|| lhs.clone()))?;
        Ok(Expr::concat(lhs, rhs))
    }

    /*
        Atom syntax:

        atom ::= NUMBER | STRING | symbol | "(" expr ")" | "[" list "]" ;

        End of input yields an empty nil scalar.
    */
    fn parse_atom(&mut self) -> InternalResult<Expr> {
        let next = match self.advance()? {
            Some(token) => token,
            None => return Ok(Scalar::new("", Value::Nil).into()),
        };

        match next.kind {
            TokenKind::Number | TokenKind::String => {
                let value = Value::from(next.value);
                Ok(Scalar::new(next.literal, value).into())
            },

            TokenKind::Identifier => self.parse_symbol(next),

            TokenKind::Operator if next.literal == "(" => self.parse_group(),

            TokenKind::Operator if next.literal == "[" => self.parse_list(),

            TokenKind::Operator => Err(ErrorPrototype::from(ErrorKind::UnexpectedOperator).at_token(&next)),

            TokenKind::Whitespace | TokenKind::EndOfInput =>
                Err(ErrorPrototype::from(ErrorKind::UnexpectedToken).at_token(&next)),
        }
    }

    // a missing ")" at the end of input is tolerated
    fn parse_group(&mut self) -> InternalResult<Expr> {
        let inner = self.parse_expr()?;

        match self.advance()? {
            Some(token) if token.is_operator(")") => Ok(inner),
            None => Ok(inner),

            Some(token) => Err(
                ErrorPrototype::from(ErrorKind::ExpectedCloseParen).at_token(&token).with_partial(|| inner)
            ),
        }
    }

    /*
        List syntax:

        list ::= ( expr ( "," expr )* ","? )? "]" ;
    */
    fn parse_list(&mut self) -> InternalResult<Expr> {
        let mut list = ListLiteral::new();

        loop {
            match self.peek()? {
                None => return Err(
                    ErrorPrototype::from(ErrorKind::UnterminatedList).with_partial(|| list.into())
                ),
                Some(token) if token.is_operator("]") => {
                    self.advance()?;
                    break;
                },
                Some(..) => { },
            }

            let item = match self.parse_expr() {
                Ok(item) => item,
                Err(error) => return Err(error.with_partial(|| list.into())),
            };
            list.push(item);

            match self.advance()? {
                Some(token) if token.is_operator(",") => continue,
                Some(token) if token.is_operator("]") => break,

                Some(token) => return Err(
                    ErrorPrototype::from(ErrorKind::UnexpectedToken).at_token(&token).with_partial(|| list.into())
                ),
                None => return Err(
                    ErrorPrototype::from(ErrorKind::UnterminatedList).with_partial(|| list.into())
                ),
            }
        }

        Ok(list.into())
    }

    /*
        Symbol syntax:

        symbol ::= IDENTIFIER ( "." IDENTIFIER | "(" args ")" )* ;

        A "(" after a dotted name makes a scoped call of the last segment.
        A "." after a call continues the scope chain, but only up to the next call.
    */
    fn parse_symbol(&mut self, first: Token) -> InternalResult<Expr> {
        let mut expr: Expr = Symbol::new(first.literal).into();

        loop {
            let next = match self.advance()? {
                Some(token) => token,
                None => break,
            };

            if next.is_operator("(") {
                let args = self.parse_args()
                    .map_err(|error| error.with_partial(|| expr.clone()))?;
                expr = FunctionCall::new(expr, args).into();
                continue;
            }

            if !next.is_operator(language::SCOPE_SEPARATOR) {
                self.tokens.push_back(next);
                break;
            }

            let name = match self.advance()? {
                Some(token) if token.kind == TokenKind::Identifier => token,
                Some(token) => return Err(
                    ErrorPrototype::from(ErrorKind::ExpectedIdentifier).at_token(&token).with_partial(|| expr)
                ),
                None => return Err(
                    ErrorPrototype::from(ErrorKind::ExpectedIdentifier).with_partial(|| expr)
                ),
            };

            if self.match_operator("(")? {
                let args = self.parse_args()
                    .map_err(|error| error.with_partial(|| expr.clone()))?;

                let call = ScopedFunctionCall::new(name.literal.as_str(), expr.clone(), args)
                    .map_err(|kind| ErrorPrototype::from(kind).at_token(&name).with_partial(|| expr))?;
                expr = call.into();
                continue;
            }

            expr = match expr {
                Expr::Symbol(scope) => Symbol::with_scope(name.literal, scope).into(),
                other => return Err(
                    ErrorPrototype::from(ErrorKind::InvalidScopeTarget).at_token(&name).with_partial(|| other)
                ),
            };
        }

        Ok(expr)
    }

    /*
        Argument list syntax, after the opening paren:

        args ::= ( expr ( "," expr )* )? ")" ;

        End of input closes the argument list.
    */
    fn parse_args(&mut self) -> InternalResult<Vec<Expr>> {
        let mut args = Vec::new();

        match self.peek()? {
            None => return Ok(args),
            Some(token) if token.is_operator(")") => {
                self.advance()?;
                return Ok(args);
            },
            Some(..) => { },
        }

        loop {
            args.push(self.parse_expr()?);

            match self.advance()? {
                Some(token) if token.is_operator(",") => continue,
                Some(token) if token.is_operator(")") => break,
                None => break,

                Some(token) => return Err(
                    ErrorPrototype::from(ErrorKind::ExpectedArgSeparator).at_token(&token)
                ),
            }
        }

        Ok(args)
    }
}
