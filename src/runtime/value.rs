use std::fmt;
use crate::language::{IntType, UIntType, FloatType};
use crate::lexer::TokenValue;


/// The concrete payload carried by a scalar expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Integer(IntType),
    UInteger(UIntType),
    Float32(f32),
    Float(FloatType),
    String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Type {
    Nil,
    Boolean,
    Integer,
    UInteger,
    Float32,
    Float,
    String,
}

impl Type {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean => "bool",
            Self::Integer => "int",
            Self::UInteger => "uint",
            Self::Float32 => "float32",
            Self::Float => "float",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.name())
    }
}

impl Value {
    pub fn type_tag(&self) -> Type {
        match self {
            Self::Nil => Type::Nil,
            Self::Bool(..) => Type::Boolean,
            Self::Integer(..) => Type::Integer,
            Self::UInteger(..) => Type::UInteger,
            Self::Float32(..) => Type::Float32,
            Self::Float(..) => Type::Float,
            Self::String(..) => Type::String,
        }
    }

    /// Falsy iff nil or false.
    pub fn truth_value(&self) -> bool {
        !matches!(self, Self::Nil | Self::Bool(false))
    }

    /// The string form used by concatenation, membership and pattern matching. Nil is empty.
    pub fn to_text(&self) -> String {
        match self {
            Self::Nil => String::new(),
            Self::String(string) => string.clone(),
            other => other.to_string(),
        }
    }

    /// Source text that lexes back to this value.
    pub fn fmt_literal(&self) -> String {
        match self {
            Self::Nil => "null".to_string(),
            Self::String(string) => format!("\"{}\"", escape(string)),
            Self::Float(value) if value.fract() == 0.0 && value.is_finite() => format!("{:.1}", value),
            other => other.to_string(),
        }
    }
}

fn escape(string: &str) -> String {
    string.replace('\\', "\\\\").replace('"', "\\\"")
}

impl fmt::Display for Value {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => fmt.write_str("null"),
            Self::Bool(value) => write!(fmt, "{}", value),
            Self::Integer(value) => write!(fmt, "{}", value),
            Self::UInteger(value) => write!(fmt, "{}", value),
            Self::Float32(value) => write!(fmt, "{}", value),
            Self::Float(value) => write!(fmt, "{}", value),
            Self::String(value) => fmt.write_str(value),
        }
    }
}

impl From<TokenValue> for Value {
    fn from(value: TokenValue) -> Self {
        match value {
            TokenValue::Nil => Self::Nil,
            TokenValue::Integer(value) => Self::Integer(value),
            TokenValue::UInteger(value) => Self::UInteger(value),
            TokenValue::Float(value) => Self::Float(value),
            TokenValue::String(value) => Self::String(value),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self { Self::Bool(value) }
}

impl From<IntType> for Value {
    fn from(value: IntType) -> Self { Self::Integer(value) }
}

impl From<UIntType> for Value {
    fn from(value: UIntType) -> Self { Self::UInteger(value) }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self { Self::Float32(value) }
}

impl From<FloatType> for Value {
    fn from(value: FloatType) -> Self { Self::Float(value) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Self::String(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Self::String(value.to_string()) }
}

impl<T> From<Option<T>> for Value where T: Into<Value> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}
