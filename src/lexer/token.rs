use std::fmt;
use crate::language::{IntType, UIntType, FloatType};

// Token Types

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    EndOfInput,
    Whitespace,
    Identifier,
    String,
    Number,
    Operator,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::EndOfInput => "end of input",
            Self::Whitespace => "whitespace",
            Self::Identifier => "identifier",
            Self::String => "string",
            Self::Number => "number",
            Self::Operator => "operator",
        };
        fmt.write_str(name)
    }
}

/// The decoded payload of a token. Only numbers and strings carry one.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenValue {
    Nil,
    Integer(IntType),
    UInteger(UIntType),
    Float(FloatType),
    String(String),
}


// Token Output

// include only mere character indexes in the output
// if a lexeme needs to be rendered, the relevant string can be extracted then
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    pub index: usize,   // byte offset into the source text
    pub length: usize,
}

#[derive(Clone, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,  // raw source slice
    pub value: TokenValue,
    pub location: Span,
    pub lineno: usize,
}

impl Token {
    pub fn line(&self) -> usize { self.lineno }
    pub fn offset(&self) -> usize { self.location.index }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.literal == op
    }

    pub fn is_identifier(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.literal == name
    }
}

impl fmt::Display for Token {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndOfInput => fmt.write_str("end of input"),
            kind => write!(fmt, "{} '{}'", kind, self.literal),
        }
    }
}
