//! Edge case tests for glyphc-lex

#[cfg(test)]
mod tests {
    use crate::{Lexer, Token};
    use glyphc_util::{Handler, Symbol};

    fn lex_all(source: &str) -> Vec<Token> {
        let mut handler = Handler::new();
        let mut lexer = Lexer::new(source, &mut handler);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token == Token::Eof {
                break;
            }
            tokens.push(token);
        }
        tokens
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_empty_source() {
        assert!(lex_all("").is_empty());
    }

    #[test]
    fn test_edge_single_char_ident() {
        let t = lex_all("x");
        assert_eq!(t[0], Token::Ident(Symbol::intern_known("x")));
    }

    #[test]
    fn test_edge_long_identifier() {
        let name = "a".repeat(10000);
        let t = lex_all(&format!("let {} = 1;", name));
        assert!(t.contains(&Token::Ident(Symbol::intern_known(&name))));
    }

    #[test]
    fn test_edge_keywords_not_idents() {
        let t = lex_all("function let if");
        assert_eq!(t[0], Token::Function);
        assert_eq!(t[1], Token::Let);
        assert_eq!(t[2], Token::If);
    }

    #[test]
    fn test_edge_type_names_are_idents() {
        let t = lex_all("integer double boolean char string void");
        for tok in &t {
            assert!(matches!(tok, Token::Ident(_)));
        }
    }

    #[test]
    fn test_edge_empty_string() {
        let t = lex_all("\"\"");
        if let Token::String(s) = &t[0] {
            assert_eq!(s.as_str(), "");
        } else {
            panic!("expected string token");
        }
    }

    #[test]
    fn test_edge_all_operators() {
        let t = lex_all("+ - * / == != < > <= >= =");
        assert!(t.contains(&Token::Plus));
        assert!(t.contains(&Token::Minus));
        assert!(t.contains(&Token::Star));
        assert!(t.contains(&Token::Slash));
        assert!(t.contains(&Token::EqEq));
        assert!(t.contains(&Token::NotEq));
        assert!(t.contains(&Token::Lt));
        assert!(t.contains(&Token::Gt));
        assert!(t.contains(&Token::Le));
        assert!(t.contains(&Token::Ge));
        assert!(t.contains(&Token::Eq));
    }

    #[test]
    fn test_edge_postfix_operators() {
        let t = lex_all("x++ y--");
        assert!(t.contains(&Token::PlusPlus));
        assert!(t.contains(&Token::MinusMinus));
    }

    #[test]
    fn test_edge_all_delimiters() {
        let t = lex_all("( ) { } [ ] , ; :");
        assert!(t.contains(&Token::LParen));
        assert!(t.contains(&Token::RParen));
        assert!(t.contains(&Token::LBrace));
        assert!(t.contains(&Token::RBrace));
        assert!(t.contains(&Token::LBracket));
        assert!(t.contains(&Token::RBracket));
        assert!(t.contains(&Token::Comma));
        assert!(t.contains(&Token::Semicolon));
        assert!(t.contains(&Token::Colon));
    }

    #[test]
    fn test_edge_nested_delimiters() {
        let t = lex_all("((()))");
        assert_eq!(t.iter().filter(|x| **x == Token::LParen).count(), 3);
    }

    #[test]
    fn test_edge_case_sensitivity() {
        let t = lex_all("Function function");
        assert_eq!(t[0], Token::Ident(Symbol::intern_known("Function")));
        assert_eq!(t[1], Token::Function);
    }

    #[test]
    fn test_edge_bools() {
        let t = lex_all("true false");
        assert_eq!(t[0], Token::True);
        assert_eq!(t[1], Token::False);
    }

    #[test]
    fn test_edge_underscore_identifier() {
        let t = lex_all("_ _foo foo_");
        assert_eq!(t[0], Token::Ident(Symbol::intern_known("_")));
        assert_eq!(t[1], Token::Ident(Symbol::intern_known("_foo")));
        assert_eq!(t[2], Token::Ident(Symbol::intern_known("foo_")));
    }

    #[test]
    fn test_edge_double_literal() {
        let t = lex_all("1.5 0.25");
        assert!(matches!(t[0], Token::Double(f) if (f - 1.5).abs() < 0.001));
        assert!(matches!(t[1], Token::Double(f) if (f - 0.25).abs() < 0.001));
    }

    #[test]
    fn test_edge_max_i32() {
        let t = lex_all("2147483647");
        assert_eq!(t[0], Token::Integer(i32::MAX));
    }

    #[test]
    fn test_edge_integer_overflow_reports_error() {
        let mut h = Handler::new();
        let t = Lexer::new("99999999999", &mut h).next_token();
        assert_eq!(t, Token::Integer(0));
        assert!(h.has_errors());
    }

    #[test]
    fn test_edge_all_keywords() {
        let t = lex_all(
            "function let return if else while for break continue true false of array",
        );
        assert_eq!(
            t,
            vec![
                Token::Function,
                Token::Let,
                Token::Return,
                Token::If,
                Token::Else,
                Token::While,
                Token::For,
                Token::Break,
                Token::Continue,
                Token::True,
                Token::False,
                Token::Of,
                Token::Array,
            ]
        );
    }

    // ==================== ERROR CASES ====================

    #[test]
    fn test_err_unterminated_string() {
        let mut h = Handler::new();
        let _ = Lexer::new("\"unterminated", &mut h).next_token();
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_invalid_chars() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("`#", &mut h);
        while lex.next_token() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_mixed_valid_invalid() {
        let mut h = Handler::new();
        let mut lex = Lexer::new("let x = ` 1;", &mut h);
        while lex.next_token() != Token::Eof {}
        assert!(h.has_errors());
    }

    #[test]
    fn test_err_bang_without_equals() {
        let mut h = Handler::new();
        let t = Lexer::new("!", &mut h).next_token();
        assert!(matches!(t, Token::Invalid(_)));
        assert!(h.has_errors());
    }

    #[test]
    fn test_edge_consecutive_plus() {
        // "+++" lexes greedily as "++" then "+", not "+" "+" "+".
        let t = lex_all("+++");
        assert_eq!(t, vec![Token::PlusPlus, Token::Plus]);
    }

    #[test]
    fn test_edge_whitespace_variations() {
        let t = lex_all("let\tx\n=\n1");
        assert!(t.contains(&Token::Let));
        assert!(t.contains(&Token::Integer(1)));
    }

    #[test]
    fn test_edge_leading_zero_integer() {
        assert_eq!(lex_all("007"), vec![Token::Integer(7)]);
    }

    #[test]
    fn test_edge_line_comment_only() {
        assert!(lex_all("// just a comment").is_empty());
    }
}
