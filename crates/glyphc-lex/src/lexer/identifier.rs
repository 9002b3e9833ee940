//! Identifier and keyword lexing.
//!
//! This module handles lexing of identifiers and keywords. Identifiers are
//! ASCII-only: `[A-Za-z_][A-Za-z0-9_]*`.

use crate::token::{keyword_from_ident, Token};
use crate::Lexer;
use glyphc_util::Symbol;

/// Whether `c` can start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Whether `c` can continue an identifier after its first character.
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore, followed by
    /// alphanumeric characters or underscores. After reading the identifier,
    /// checks if it matches a reserved keyword. Type names (`integer`,
    /// `double`, `boolean`, `char`, `string`, `void`) are not keywords here —
    /// they lex as plain identifiers and are recognized by the parser.
    ///
    /// # Returns
    ///
    /// Either a keyword token (e.g., `Token::Let`) or `Token::Ident(symbol)`
    pub fn lex_identifier(&mut self) -> Token {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or_else(|| Token::Ident(Symbol::intern_known(text)))
    }
}
