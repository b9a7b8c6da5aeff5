//! An embeddable expression language.
//!
//! Source text is tokenized by the [`lexer`], turned into an [`Expr`] tree by
//! the [`parser`] and evaluated against a [`runtime::Environment`], which
//! holds named values and host-supplied native functions.

use std::fmt;
use std::error::Error;

pub mod utils;

pub mod language;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod builtins;

pub mod frontend;


pub use parser::expr::Expr;
pub use runtime::{Environment, EnvOptions, Value};

use parser::ParserError;
use runtime::EvalError;


#[derive(Debug)]
pub enum ScriptError {
    // depending on which stage failed
    Syntax(ParserError),
    Eval(EvalError),
}

impl From<ParserError> for ScriptError {
    fn from(error: ParserError) -> Self { Self::Syntax(error) }
}

impl From<EvalError> for ScriptError {
    fn from(error: EvalError) -> Self { Self::Eval(error) }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(error) => Some(error),
            Self::Eval(error) => Some(error),
        }
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(error) => write!(fmt, "{}", error),
            Self::Eval(error) => write!(fmt, "{}", error),
        }
    }
}


/// Produce an expression tree from source text.
pub fn parse(source: &str) -> Result<Expr, ParserError> {
    parser::parse_expression(source)
}

/// Produce an expression tree, rejecting any input left over after it.
pub fn parse_strict(source: &str) -> Result<Expr, ParserError> {
    parser::parse_expression_strict(source)
}

pub fn evaluate(expr: &Expr, env: &Environment) -> Result<Expr, EvalError> {
    expr.evaluate(env)
}

/// Parse and evaluate in one step.
pub fn execute(source: &str, env: &Environment) -> Result<Expr, ScriptError> {
    let expr = parse(source)?;
    Ok(evaluate(&expr, env)?)
}
