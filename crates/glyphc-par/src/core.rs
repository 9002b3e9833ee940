//! Core parser state: cursor over a token stream plus the shared helpers
//! every grammar-rule module builds on.
//!
//! There is no error recovery. The first syntax error reported through
//! [`Handler`] aborts the parse; every `parse_*` method returns `None` to
//! signal that failure and the caller is expected to propagate it with
//! `?` rather than resynchronize and keep going.

use glyphc_util::{DiagnosticBuilder, Handler, Span};

use crate::token_stream::TokenWithSpan;
use glyphc_lex::Token;

pub struct Parser<'a> {
    tokens: Vec<TokenWithSpan>,
    position: usize,
    handler: &'a mut Handler,
    source: &'a str,
}

impl<'a> Parser<'a> {
    /// Builds a parser from a pre-lexed token stream.
    pub fn from_tokens(
        tokens: Vec<TokenWithSpan>,
        handler: &'a mut Handler,
        source: &'a str,
    ) -> Self {
        Self {
            tokens,
            position: 0,
            handler,
            source,
        }
    }

    /// Lexes `source` and builds a parser over the resulting tokens.
    pub fn new(source: &'a str, handler: &'a mut Handler) -> Self {
        let tokens = glyphc_lex::Lexer::tokenize(source, &mut *handler)
            .into_iter()
            .map(|(token, span)| TokenWithSpan::new(token, span))
            .collect();
        Self {
            tokens,
            position: 0,
            handler,
            source,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The token at the cursor, or `Token::Eof` past the end.
    pub(crate) fn current_token(&self) -> Token {
        self.tokens
            .get(self.position)
            .map(|t| t.token.clone())
            .unwrap_or(Token::Eof)
    }

    /// The span of the token at the cursor.
    pub(crate) fn current_span(&self) -> Span {
        self.tokens
            .get(self.position)
            .map(|t| t.span)
            .unwrap_or_else(|| {
                self.tokens
                    .last()
                    .map(|t| t.span)
                    .unwrap_or(Span::DUMMY)
            })
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof) || self.position >= self.tokens.len()
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.current_token();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        token
    }

    /// Consumes the current token if it matches `expected`, reporting a
    /// syntax error otherwise.
    pub(crate) fn expect(&mut self, expected: Token) -> Option<Span> {
        if self.current_token() == expected {
            let span = self.current_span();
            self.advance();
            Some(span)
        } else {
            self.error(format!(
                "expected {:?}, found {:?}",
                expected,
                self.current_token()
            ));
            None
        }
    }

    /// Consumes the current token if it matches `expected`. Does not
    /// report an error on mismatch.
    pub(crate) fn match_token(&mut self, expected: Token) -> bool {
        if self.current_token() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Builds a span covering everything from `start` up to (but not
    /// including) the token at the current cursor.
    pub(crate) fn span_from_start(&self, start: Span) -> Span {
        let end = if self.position == 0 {
            start
        } else {
            self.tokens
                .get(self.position - 1)
                .map(|t| t.span)
                .unwrap_or(start)
        };
        start.merge(end)
    }

    /// Reports a syntax error at the current token's span.
    pub(crate) fn error(&mut self, message: String) {
        DiagnosticBuilder::error(message)
            .span(self.current_span())
            .emit(self.handler);
    }
}
