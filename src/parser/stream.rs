use crate::lexer::{Lexer, Token, TokenKind, LexerResult};


/// Pull-based view of the lexer output used by the parser.
///
/// Tokens that were looked at but not used can be pushed back; they are
/// handed out again in LIFO order before anything new is pulled from the
/// lexer. Whitespace is dropped. Once the lexer produces `EndOfInput` the
/// stream reports that it is finished by returning `None`.
pub struct TokenStream<'s> {
    lexer: Lexer<'s>,
    pushback: Vec<Token>,
    finished: bool,
}

impl<'s> TokenStream<'s> {
    pub fn new(lexer: Lexer<'s>) -> Self {
        TokenStream {
            lexer,
            pushback: Vec::new(),
            finished: false,
        }
    }

    pub fn next(&mut self) -> LexerResult<Option<Token>> {
        if let Some(token) = self.pushback.pop() {
            return Ok(Some(token));
        }

        while !self.finished {
            match self.lexer.next() {
                Some(Ok(token)) => match token.kind {
                    TokenKind::Whitespace => continue,
                    TokenKind::EndOfInput => self.finished = true,
                    _ => return Ok(Some(token)),
                },

                Some(Err(error)) => {
                    self.finished = true;
                    return Err(error);
                },

                None => self.finished = true,
            }
        }

        Ok(None)
    }

    pub fn push_back(&mut self, token: Token) {
        self.pushback.push(token)
    }

    pub fn peek(&mut self) -> LexerResult<Option<&Token>> {
        if let Some(token) = self.next()? {
            self.push_back(token);
        }
        Ok(self.pushback.last())
    }

    /// True once every token, including any pushed back, has been consumed.
    pub fn is_finished(&self) -> bool {
        self.finished && self.pushback.is_empty()
    }
}
