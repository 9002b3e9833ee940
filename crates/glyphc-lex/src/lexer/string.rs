//! String literal lexing.
//!
//! This module handles lexing of string literals. There are no escape
//! sequences, no raw strings, and no character-literal syntax — a string
//! is exactly the text between a pair of double quotes, and it cannot
//! span a newline.

use crate::token::Token;
use crate::Lexer;
use glyphc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes a string literal.
    ///
    /// Parses a string enclosed in double quotes with no escape processing.
    ///
    /// # Returns
    ///
    /// `Token::String(symbol)` with the string's content
    pub fn lex_string(&mut self) -> Token {
        self.cursor.advance();

        let content_start = self.cursor.position();

        loop {
            if self.cursor.is_at_end() {
                self.report_error("unterminated string literal".to_string());
                let content = self.cursor.slice_from(content_start);
                return Token::String(Symbol::intern(content));
            }

            let c = self.cursor.current_char();

            if c == '"' {
                let content = self.cursor.slice_from(content_start);
                self.cursor.advance();
                return Token::String(Symbol::intern(content));
            }

            if c == '\n' {
                self.report_error("unterminated string literal".to_string());
                let content = self.cursor.slice_from(content_start);
                return Token::String(Symbol::intern(content));
            }

            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use glyphc_util::Handler;

    fn lex_str(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_string()
    }

    #[test]
    fn test_simple_string() {
        let token = lex_str("\"hello\"");
        assert_eq!(token, Token::String(Symbol::intern("hello")));
    }

    #[test]
    fn test_empty_string() {
        let token = lex_str("\"\"");
        assert_eq!(token, Token::String(Symbol::intern("")));
    }

    #[test]
    fn test_string_with_spaces() {
        let token = lex_str("\"hello world\"");
        assert_eq!(token, Token::String(Symbol::intern("hello world")));
    }

    #[test]
    fn test_unterminated_string_reports_error() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"hello", &mut handler);
        let token = lexer.lex_string();
        assert_eq!(token, Token::String(Symbol::intern("hello")));
        assert!(handler.has_errors());
    }

    #[test]
    fn test_string_cannot_span_newline() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("\"hello\nworld\"", &mut handler);
        lexer.lex_string();
        assert!(handler.has_errors());
    }
}
