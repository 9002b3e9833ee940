//! Operator and punctuation lexing.
//!
//! This module handles lexing of operators. Comments are already consumed
//! by [`super::core::Lexer::skip_whitespace_and_comments`] before dispatch
//! reaches `/`, so `lex_slash` only needs to recognize plain division.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes plus or postfix plus-plus.
    ///
    /// Handles: `+`, `++`
    pub fn lex_plus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('+') {
            Token::PlusPlus
        } else {
            Token::Plus
        }
    }

    /// Lexes minus or postfix minus-minus.
    ///
    /// Handles: `-`, `--`
    pub fn lex_minus(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('-') {
            Token::MinusMinus
        } else {
            Token::Minus
        }
    }

    /// Lexes slash (division).
    ///
    /// Handles: `/`
    pub fn lex_slash(&mut self) -> Token {
        self.cursor.advance();
        Token::Slash
    }

    /// Lexes equals or equals-equals.
    ///
    /// Handles: `=`, `==`
    pub fn lex_equals(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::EqEq
        } else {
            Token::Eq
        }
    }

    /// Lexes bang-equals (there is no standalone `!`).
    ///
    /// Handles: `!=`
    pub fn lex_bang(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::NotEq
        } else {
            self.report_error("expected '=' after '!'".to_string());
            Token::Invalid("!".to_string())
        }
    }

    /// Lexes less or less-equals.
    ///
    /// Handles: `<`, `<=`
    pub fn lex_less(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::Le
        } else {
            Token::Lt
        }
    }

    /// Lexes greater or greater-equals.
    ///
    /// Handles: `>`, `>=`
    pub fn lex_greater(&mut self) -> Token {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::Ge
        } else {
            Token::Gt
        }
    }
}
