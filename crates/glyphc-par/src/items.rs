//! Top-level function parsing.
//!
//! ```text
//! program  = function+
//! function = "function" IDENT "(" (arg ("," arg)*)? ")" (":" type)? block
//! arg      = IDENT ":" type
//! ```

use glyphc_lex::Token;

use crate::ast::{Function, Param, Program};
use crate::core::Parser;

impl<'a> Parser<'a> {
    /// Parses an entire source file: one or more functions.
    pub fn parse_program(&mut self) -> Option<Program> {
        let mut functions = Vec::new();
        while !self.is_at_end() {
            functions.push(self.parse_function()?);
        }
        if functions.is_empty() {
            self.error("expected at least one function".to_string());
            return None;
        }
        Some(functions)
    }

    fn parse_function(&mut self) -> Option<Function> {
        let start = self.expect(Token::Function)?;
        let name = match self.current_token() {
            Token::Ident(name) => {
                self.advance();
                name
            },
            other => {
                self.error(format!("expected function name, found {:?}", other));
                return None;
            },
        };

        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        if self.current_token() != Token::RParen {
            params.push(self.parse_param()?);
            while self.match_token(Token::Comma) {
                params.push(self.parse_param()?);
            }
        }
        self.expect(Token::RParen)?;

        let ret_type = if self.match_token(Token::Colon) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = self.parse_block()?;
        let span = start.merge(body.span);

        Some(Function {
            name,
            params,
            ret_type,
            body,
            span,
        })
    }

    fn parse_param(&mut self) -> Option<Param> {
        let start = self.current_span();
        let name = match self.current_token() {
            Token::Ident(name) => {
                self.advance();
                name
            },
            other => {
                self.error(format!("expected parameter name, found {:?}", other));
                return None;
            },
        };
        self.expect(Token::Colon)?;
        let ty = self.parse_type()?;
        Some(Param {
            name,
            span: self.span_from_start(start),
            ty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Type;
    use glyphc_util::Handler;

    fn parse_program(source: &str) -> (Option<Program>, Handler) {
        let mut handler = Handler::new();
        let result = {
            let mut parser = Parser::new(source, &mut handler);
            parser.parse_program()
        };
        (result, handler)
    }

    #[test]
    fn test_function_no_params_no_return() {
        let (program, h) = parse_program("function main() { return; }");
        let program = program.expect("should parse");
        assert_eq!(program.len(), 1);
        assert!(program[0].params.is_empty());
        assert_eq!(program[0].ret_type, None);
        assert!(!h.has_errors());
    }

    #[test]
    fn test_function_with_params_and_return() {
        let (program, h) = parse_program(
            "function add(a: integer, b: integer) : integer { return a + b; }",
        );
        let program = program.expect("should parse");
        assert_eq!(program[0].params.len(), 2);
        assert_eq!(program[0].ret_type, Some(Type::Integer));
        assert!(!h.has_errors());
    }

    #[test]
    fn test_multiple_functions() {
        let (program, _) = parse_program(
            "function a() { return; } function b() { return; }",
        );
        assert_eq!(program.expect("should parse").len(), 2);
    }

    #[test]
    fn test_array_param_type() {
        let (program, h) =
            parse_program("function sum(xs: array[10] of integer) : integer { return 0; }");
        let program = program.expect("should parse");
        assert_eq!(
            program[0].params[0].ty,
            Type::Array(Box::new(Type::Integer), 10)
        );
        assert!(!h.has_errors());
    }

    #[test]
    fn test_empty_program_is_an_error() {
        let (program, h) = parse_program("");
        assert!(program.is_none());
        assert!(h.has_errors());
    }

    #[test]
    fn test_missing_paren_reports_error_and_aborts() {
        let (program, h) = parse_program("function main( { return; }");
        assert!(program.is_none());
        assert!(h.has_errors());
    }
}
