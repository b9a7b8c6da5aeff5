mod token;
mod errors;

pub use token::*;
pub use errors::*;

use std::iter::{Iterator, Peekable};
use std::str::CharIndices;
use crate::language::{self, IntType, UIntType, FloatType};


// Lexer Builder

#[derive(Clone, Debug, Default)]
pub struct LexerOptions {
    include_whitespace: bool,
}

#[derive(Clone, Debug, Default)]
pub struct LexerBuilder {
    options: LexerOptions,
}

impl LexerBuilder {
    pub fn new() -> Self {
        LexerBuilder {
            options: LexerOptions {
                include_whitespace: false,
            }
        }
    }

    pub fn set_include_whitespace(mut self, include_whitespace: bool) -> Self {
        self.options.include_whitespace = include_whitespace;
        self
    }

    pub fn build<'s>(&self, source: &'s str) -> Lexer<'s> {
        Lexer::new(source, self.options.clone())
    }
}


// Lexer

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerState {
    Scanning,
    Finished,  // EndOfInput or an error has been produced
}

/// Pull-based tokenizer. Each call to `next()` scans exactly one token; the
/// sequence always ends with a single `EndOfInput` token, or with an error.
pub struct Lexer<'s> {
    source: &'s str,
    chars: Peekable<CharIndices<'s>>,
    options: LexerOptions,
    state: LexerState,

    token_start: usize,
    lineno: usize,
}

impl<'s> Iterator for Lexer<'s> {
    type Item = LexerResult<Token>;

    fn next(&mut self) -> Option<Self::Item> { self.next_token() }
}

impl<'s> Lexer<'s> {

    pub fn new(source: &'s str, options: LexerOptions) -> Self {
        Lexer {
            source,
            chars: source.char_indices().peekable(),
            options,
            state: LexerState::Scanning,
            token_start: 0,
            lineno: 1,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == LexerState::Finished
    }

    // byte index of the next unconsumed char
    fn position(&mut self) -> usize {
        match self.chars.peek() {
            Some(&(index, _)) => index,
            None => self.source.len(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    fn advance(&mut self) -> Option<char> {
        let next = self.chars.next().map(|(_, ch)| ch);
        if let Some('\n') = next {
            self.lineno += 1;
        }
        next
    }

    // consume chars as long as they satisfy the predicate
    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            self.advance();
        }
    }

    fn current_text(&mut self) -> &'s str {
        let end = self.position();
        let source = self.source;
        &source[self.token_start..end]
    }

    pub fn next_token(&mut self) -> Option<LexerResult<Token>> {
        loop {
            if self.is_finished() {
                return None;
            }

            //starting a new token
            self.token_start = self.position();
            let token_line = self.lineno;

            let next = match self.peek() {
                Some(ch) => ch,
                None => {
                    self.state = LexerState::Finished;
                    return Some(Ok(self.token_data(TokenKind::EndOfInput, TokenValue::Nil, token_line)));
                },
            };

            let result =
                if language::is_whitespace(next) {
                    self.eat_while(language::is_whitespace);
                    if !self.options.include_whitespace {
                        continue;
                    }
                    Ok(self.token_data(TokenKind::Whitespace, TokenValue::Nil, token_line))
                }
                else if language::is_ident_start(next) {
                    self.eat_while(language::is_ident_body);
                    Ok(self.token_data(TokenKind::Identifier, TokenValue::Nil, token_line))
                }
                else if next.is_ascii_digit() {
                    self.scan_number(token_line)
                }
                else if next == language::SINGLE_QUOTE || next == language::DOUBLE_QUOTE {
                    self.scan_string(token_line)
                }
                else {
                    Ok(self.scan_operator(token_line))
                };

            if result.is_err() {
                self.state = LexerState::Finished;
            }

            log::trace!("lexed {:?}", result);
            return Some(result);
        }
    }

    fn scan_number(&mut self, token_line: usize) -> LexerResult<Token> {
        let first = self.advance();

        // Note: Leading 0 does not mean octal, an explicit prefix is required.
        let radix = match (first, self.peek()) {
            (Some('0'), Some('x' | 'X')) => Some(16),
            (Some('0'), Some('o' | 'O')) => Some(8),
            (Some('0'), Some('b' | 'B')) => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.advance(); // consume prefix
            let digits_start = self.position();
            self.eat_while(|ch| ch.is_digit(radix));
            let digits_end = self.position();
            let source = self.source;
            let digits = &source[digits_start..digits_end];

            let value = self.parse_integer(digits, radix, token_line)?;
            return Ok(self.token_data(TokenKind::Number, value, token_line));
        }

        self.eat_while(|ch| ch.is_ascii_digit());

        if let Some('.') = self.peek() {
            self.advance();
            self.eat_while(|ch| ch.is_ascii_digit());

            let text = self.current_text();
            let value = text.parse::<FloatType>()
                .map_err(|_| self.error(ErrorKind::MalformedNumber(text.to_string()), token_line))?;

            return Ok(self.token_data(TokenKind::Number, TokenValue::Float(value), token_line));
        }

        let text = self.current_text();
        let value = self.parse_integer(text, 10, token_line)?;
        Ok(self.token_data(TokenKind::Number, value, token_line))
    }

    // integers that overflow the signed type fall back to unsigned
    fn parse_integer(&mut self, digits: &str, radix: u32, token_line: usize) -> LexerResult<TokenValue> {
        if let Ok(value) = IntType::from_str_radix(digits, radix) {
            return Ok(TokenValue::Integer(value));
        }
        if let Ok(value) = UIntType::from_str_radix(digits, radix) {
            return Ok(TokenValue::UInteger(value));
        }

        let text = self.current_text().to_string();
        Err(self.error(ErrorKind::MalformedNumber(text), token_line))
    }

    fn scan_string(&mut self, token_line: usize) -> LexerResult<Token> {
        let quote = self.advance();
        let mut value = String::new();

        loop {
            match self.advance() {
                None | Some('\n') => return Err(self.error(ErrorKind::UnterminatedString, token_line)),

                Some(language::ESCAPE_CHAR) => match self.advance() {
                    None | Some('\n') => return Err(self.error(ErrorKind::UnterminatedString, token_line)),
                    Some(ch) => value.push(unescape(ch)),
                },

                Some(ch) if Some(ch) == quote => break,

                Some(ch) => value.push(ch),
            }
        }

        Ok(self.token_data(TokenKind::String, TokenValue::String(value), token_line))
    }

    // two-char operators are matched greedily, anything else is a single char operator
    fn scan_operator(&mut self, token_line: usize) -> Token {
        if let Some(first) = self.advance() {
            if let Some(second) = self.peek() {
                let mut pair = String::with_capacity(2);
                pair.push(first);
                pair.push(second);

                if language::is_double_operator(&pair) {
                    self.advance();
                }
            }
        }

        self.token_data(TokenKind::Operator, TokenValue::Nil, token_line)
    }

    fn current_span(&mut self) -> Span {
        let end = self.position();
        Span {
            index: self.token_start,
            length: end - self.token_start,
        }
    }

    fn token_data(&mut self, kind: TokenKind, value: TokenValue, lineno: usize) -> Token {
        Token {
            kind,
            literal: self.current_text().to_string(),
            value,
            location: self.current_span(),
            lineno,
        }
    }

    fn error(&mut self, kind: ErrorKind, lineno: usize) -> LexerError {
        LexerError::new(kind, self.current_span(), lineno)
    }
}

fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        '0' => '\0',
        other => other,  // covers quotes and the escape char itself
    }
}
