use std::fmt;
use std::error::Error;
use crate::utils;
use crate::lexer::{Span, Token, LexerError};
use crate::parser::expr::Expr;


pub type ErrorKind = ParserErrorKind;

pub type ParseResult<T> = Result<T, ParserError>;

// Specifies the actual error that occurred
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErrorKind {
    LexerError,
    UnexpectedToken,        // a token that cannot start or continue an expression
    UnexpectedOperator,     // an operator where an operand was expected
    ExpectedColon,          // conditional is missing its ':'
    ExpectedCloseParen,
    ExpectedIdentifier,     // '.' not followed by a name
    ExpectedArgSeparator,   // call arguments not separated by ','
    UnterminatedList,
    InvalidScopeTarget,     // scoped call on something that is not a symbol or call
    NestingTooDeep,
    TrailingInput,          // input left over after a complete expression
}

// Errors are raised inside the recursive descent as a prototype, which picks up
// the partially built tree as it unwinds and becomes a ParserError at the top.
// The contents are boxed so that every rule's result stays pointer-sized on the
// error path, which keeps the descent frames small.
#[derive(Debug)]
pub struct ErrorPrototype(Box<PrototypeData>);

#[derive(Debug)]
struct PrototypeData {
    kind: ErrorKind,
    token: Option<Token>,
    partial: Option<Expr>,
    cause: Option<LexerError>,
}

impl ErrorPrototype {
    pub fn at_token(mut self, token: &Token) -> Self {
        self.0.token = Some(token.clone()); self
    }

    pub fn caused_by(mut self, cause: LexerError) -> Self {
        self.0.cause = Some(cause); self
    }

    // keeps the innermost partial tree, outer rules only fill in a missing one
    pub fn with_partial(mut self, partial: impl FnOnce() -> Expr) -> Self {
        if self.0.partial.is_none() {
            self.0.partial = Some(partial());
        }
        self
    }
}

impl From<ParserErrorKind> for ErrorPrototype {
    fn from(kind: ParserErrorKind) -> Self {
        ErrorPrototype(Box::new(PrototypeData { kind, token: None, partial: None, cause: None }))
    }
}

impl From<LexerError> for ErrorPrototype {
    fn from(error: LexerError) -> Self {
        ErrorPrototype::from(ParserErrorKind::LexerError).caused_by(error)
    }
}


#[derive(Debug)]
pub struct ParserError {
    kind: ErrorKind,
    location: Option<Span>,
    lineno: Option<usize>,
    partial: Option<Expr>,
    cause: Option<LexerError>,
}

impl ParserError {
    pub fn from_prototype(proto: ErrorPrototype) -> Self {
        let proto = *proto.0;
        let (location, lineno) = match (&proto.token, &proto.cause) {
            (Some(token), _) => (Some(token.location), Some(token.lineno)),
            (None, Some(error)) => (Some(*error.location()), Some(error.line())),
            (None, None) => (None, None),
        };

        ParserError {
            kind: proto.kind,
            location,
            lineno,
            partial: proto.partial,
            cause: proto.cause,
        }
    }

    pub fn kind(&self) -> &ErrorKind { &self.kind }

    /// Where in the source the error was detected, if anywhere.
    pub fn location(&self) -> Option<&Span> { self.location.as_ref() }
    pub fn line(&self) -> Option<usize> { self.lineno }

    /// Whatever was parsed successfully before the error.
    pub fn partial(&self) -> Option<&Expr> { self.partial.as_ref() }

    pub fn lexer_error(&self) -> Option<&LexerError> { self.cause.as_ref() }
}


impl Error for ParserError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|error| error as &(dyn Error + 'static))
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {

        let message = match self.kind() {
            ParserErrorKind::LexerError => "",
            ParserErrorKind::UnexpectedToken      => "unexpected token",
            ParserErrorKind::UnexpectedOperator   => "unexpected operator",
            ParserErrorKind::ExpectedColon        => "missing ':' in conditional",
            ParserErrorKind::ExpectedCloseParen   => "missing closing ')'",
            ParserErrorKind::ExpectedIdentifier   => "expected a name after '.'",
            ParserErrorKind::ExpectedArgSeparator => "expected ',' between arguments",
            ParserErrorKind::UnterminatedList     => "missing closing ']'",
            ParserErrorKind::InvalidScopeTarget   => "invalid target for scoped call",
            ParserErrorKind::NestingTooDeep       => "expression nested too deeply",
            ParserErrorKind::TrailingInput        => "unexpected input after expression",
        };

        let message = match (self.lineno, self.location.as_ref()) {
            (Some(lineno), Some(span)) if !message.is_empty() =>
                Some(format!("{} (line {}, offset {})", message, lineno, span.index)),
            _ => Some(message.to_string()),
        };

        utils::format_error(fmt, "syntax error", message.as_deref(), self.source())
    }
}
