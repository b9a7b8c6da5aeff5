pub type IntType = i64;     // internal representation for signed integers
pub type UIntType = u64;    // integers that only fit unsigned
pub type FloatType = f64;   // internal representation for floats


pub const WHITESPACE_CHARS: [char; 5] = [ ' ', '\t', '\r', '\n', '\u{A0}' ];

pub const SINGLE_QUOTE: char = '\'';
pub const DOUBLE_QUOTE: char = '"';
pub const ESCAPE_CHAR: char = '\\';

// operators that the lexer matches greedily as a single token
pub const DOUBLE_OPERATORS: [&str; 6] = [ "==", "!=", "<=", ">=", "||", "&&" ];

// comparison-tier operators spelled as identifiers
pub const KEYWORD_LIKE: &str = "like";
pub const KEYWORD_IN: &str = "in";

pub const SCOPE_SEPARATOR: &str = ".";

// names bootstrapped into every environment
pub const NULL_NAME: &str = "null";
pub const TRUE_NAME: &str = "true";
pub const FALSE_NAME: &str = "false";
pub const EMPTY_NAME: &str = "empty";
pub const PRINT_NAME: &str = "print";

pub const DEFAULT_MAX_PARSE_DEPTH: usize = 64;
pub const DEFAULT_MAX_CALL_DEPTH: usize = 64;


pub fn is_whitespace(ch: char) -> bool {
    WHITESPACE_CHARS.contains(&ch)
}

pub fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

pub fn is_ident_body(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn is_double_operator(op: &str) -> bool {
    DOUBLE_OPERATORS.contains(&op)
}
