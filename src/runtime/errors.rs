use std::fmt;
use std::error::Error;
use crate::utils;


pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,       // comparison operands of different types
    UnsupportedType,    // comparison on a type with no ordering
    NotAFunction,
    NotAList,           // right side of 'in' is not a list
    ReadOnlyViolation,
    StackUnderflow,
    RecursionTooDeep,
    NativeError,        // raised by a host callback
}

#[derive(Debug, Clone)]
pub struct EvalError {
    kind: ErrorKind,
    message: String,
}

impl EvalError {
    pub fn new(kind: ErrorKind, message: impl ToString) -> Self {
        EvalError { kind, message: message.to_string() }
    }

    /// Convenience for host callbacks reporting their own failures.
    pub fn native(message: impl ToString) -> Self {
        Self::new(ErrorKind::NativeError, message)
    }

    pub fn kind(&self) -> &ErrorKind { &self.kind }
    pub fn message(&self) -> &str { &self.message }
}

impl From<ErrorKind> for EvalError {
    fn from(kind: ErrorKind) -> Self {
        EvalError { kind, message: String::new() }
    }
}

impl Error for EvalError { }

impl fmt::Display for EvalError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = match self.kind {
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::UnsupportedType => "unsupported type",
            ErrorKind::NotAFunction => "not a function",
            ErrorKind::NotAList => "not a list",
            ErrorKind::ReadOnlyViolation => "read-only violation",
            ErrorKind::StackUnderflow => "call stack underflow",
            ErrorKind::RecursionTooDeep => "max recursion depth exceeded",
            ErrorKind::NativeError => "error in native function",
        };

        utils::format_error(fmt, title, Some(&self.message), None)
    }
}
