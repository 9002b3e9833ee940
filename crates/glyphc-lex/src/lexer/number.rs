//! Number literal lexing.
//!
//! This module handles lexing of integer and double literals. There is no
//! hex/octal/binary notation and no exponent suffix — a literal is an
//! integer unless it contains a `.`, in which case it is a double.

use crate::token::Token;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a number literal.
    ///
    /// # Number Formats
    ///
    /// - Integer: `42`, `0`, `123456`
    /// - Double: `3.14`, `0.5` (the `.` must be followed by a digit, else the
    ///   number ends at the digits already read and `.` starts its own token)
    ///
    /// # Returns
    ///
    /// Either `Token::Integer(i32)` or `Token::Double(f64)`
    pub fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        let is_double =
            self.cursor.current_char() == '.' && self.cursor.peek_char(1).is_ascii_digit();

        if is_double {
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }

            let text = self.cursor.slice_from(start);
            match text.parse::<f64>() {
                Ok(value) => Token::Double(value),
                Err(e) => {
                    self.report_error(format!("invalid double literal '{}': {}", text, e));
                    Token::Double(0.0)
                },
            }
        } else {
            let text = self.cursor.slice_from(start);
            match text.parse::<i32>() {
                Ok(value) => Token::Integer(value),
                Err(e) => {
                    self.report_error(format!("integer literal '{}' out of range: {}", text, e));
                    Token::Integer(0)
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;
    use glyphc_util::Handler;

    fn lex_num(source: &str) -> Token {
        let mut handler = Handler::new();
        let mut lexer = crate::Lexer::new(source, &mut handler);
        lexer.lex_number()
    }

    #[test]
    fn test_decimal_integer() {
        assert_eq!(lex_num("42"), Token::Integer(42));
        assert_eq!(lex_num("0"), Token::Integer(0));
        assert_eq!(lex_num("123456"), Token::Integer(123456));
    }

    #[test]
    fn test_double() {
        let result = lex_num("3.14");
        assert!(matches!(result, Token::Double(f) if (f - 3.14).abs() < 0.001));
    }

    #[test]
    fn test_double_leading_zero() {
        let result = lex_num("0.5");
        assert!(matches!(result, Token::Double(f) if (f - 0.5).abs() < 0.001));
    }

    #[test]
    fn test_dot_without_following_digit_is_not_consumed() {
        // lex_number only reads the integer part; a trailing '.' not
        // followed by a digit is left for the next token to deal with.
        assert_eq!(lex_num("42.x"), Token::Integer(42));
    }

    #[test]
    fn test_integer_overflow_reports_error() {
        let mut handler = glyphc_util::Handler::new();
        let mut lexer = crate::Lexer::new("99999999999", &mut handler);
        let token = lexer.lex_number();
        assert_eq!(token, Token::Integer(0));
        assert!(handler.has_errors());
    }
}
