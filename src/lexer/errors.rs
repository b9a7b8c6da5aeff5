use std::fmt;
use std::error::Error;
use crate::utils;
use crate::lexer::Span;


pub type LexerResult<T> = Result<T, LexerError>;

// Lexer Errors

#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    UnterminatedString,
    MalformedNumber(String),
}

#[derive(Debug, Clone)]
pub struct LexerError {
    kind: ErrorKind,
    location: Span,
    lineno: usize,
}

impl LexerError {
    pub fn new(kind: ErrorKind, location: Span, lineno: usize) -> Self {
        LexerError { kind, location, lineno }
    }

    pub fn kind(&self) -> &ErrorKind { &self.kind }
    pub fn location(&self) -> &Span { &self.location }
    pub fn line(&self) -> usize { self.lineno }
    pub fn offset(&self) -> usize { self.location.index }
}

impl Error for LexerError { }

impl fmt::Display for LexerError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match &self.kind {
            ErrorKind::UnterminatedString => "unterminated quoted string".to_string(),
            ErrorKind::MalformedNumber(text) => format!("bad number syntax \"{}\"", utils::trim_str(text, 32)),
        };

        let position = format!("line {}, offset {}", self.lineno, self.location.index);
        utils::format_error(fmt, "lexer error", Some(&format!("{} ({})", message, position)), None)
    }
}
