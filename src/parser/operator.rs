use core::fmt;
use crate::language;
use crate::lexer::{Token, TokenKind};

// Comparison Operators

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    EQ, NE,
    GE, GT,
    LE, LT,
}

impl CompareOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "==" => CompareOp::EQ,
            "!=" => CompareOp::NE,
            ">=" => CompareOp::GE,
            ">"  => CompareOp::GT,
            "<=" => CompareOp::LE,
            "<"  => CompareOp::LT,

            _ => return None,
        };

        Some(op)
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            CompareOp::EQ => "==",
            CompareOp::NE => "!=",
            CompareOp::GE => ">=",
            CompareOp::GT => ">",
            CompareOp::LE => "<=",
            CompareOp::LT => "<",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.write_str(self.symbol())
    }
}


// Operators sharing the (non-chainable) comparison precedence level

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonTier {
    Compare(CompareOp),
    Like,
    In,
}

impl ComparisonTier {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.is_identifier(language::KEYWORD_LIKE) {
            return Some(Self::Like);
        }
        if token.is_identifier(language::KEYWORD_IN) {
            return Some(Self::In);
        }

        match token.kind {
            TokenKind::Operator => CompareOp::from_symbol(&token.literal).map(Self::Compare),
            _ => None,
        }
    }
}
