//! Comment lexing.
//!
//! This module handles skipping line comments (`//` to end of line). There
//! is no block comment syntax.

use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Skips whitespace and comments.
    ///
    /// Skips all whitespace characters and `//` line comments. This is
    /// called before lexing each token.
    pub fn skip_whitespace_and_comments(&mut self) {
        if !self.bom_checked {
            self.bom_checked = true;
            if self.cursor.remaining().starts_with("\u{FEFF}") {
                self.cursor.advance();
            }
        }

        loop {
            if self.cursor.is_at_end() {
                return;
            }

            match self.cursor.current_char() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.cursor.advance();
                },
                '/' if self.cursor.peek_char(1) == '/' => {
                    self.skip_line_comment();
                },
                _ => return,
            }
        }
    }

    /// Skips a line comment (from // to end of line).
    fn skip_line_comment(&mut self) {
        self.cursor.advance();
        self.cursor.advance();

        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphc_util::{Handler, Symbol};

    #[test]
    fn test_skip_whitespace() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("   hello", &mut handler);
        lexer.skip_whitespace_and_comments();
        assert_eq!(
            lexer.next_token(),
            crate::token::Token::Ident(Symbol::intern_known("hello"))
        );
    }

    #[test]
    fn test_skip_line_comment() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("// comment\nhello", &mut handler);
        lexer.skip_whitespace_and_comments();
        assert_eq!(
            lexer.next_token(),
            crate::token::Token::Ident(Symbol::intern_known("hello"))
        );
    }

    #[test]
    fn test_skip_multiple_line_comments() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("// one\n// two\nhello", &mut handler);
        lexer.skip_whitespace_and_comments();
        assert_eq!(
            lexer.next_token(),
            crate::token::Token::Ident(Symbol::intern_known("hello"))
        );
    }

    #[test]
    fn test_single_slash_is_not_a_comment() {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new("/ hello", &mut handler);
        lexer.skip_whitespace_and_comments();
        assert_eq!(lexer.next_token(), crate::token::Token::Slash);
    }
}
