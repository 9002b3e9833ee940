//! Type expression parsing.
//!
//! ```text
//! type = "integer" | "double" | "boolean" | "char" | "void" | "string"
//!      | "array" "[" INTEGER "]" "of" type
//!      | "function" "(" (type ("," type)*)? ")" ":" type
//! ```

use glyphc_lex::Token;
use glyphc_util::Symbol;

use crate::ast::Type;
use crate::core::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_type(&mut self) -> Option<Type> {
        match self.current_token() {
            Token::Array => self.parse_array_type(),
            Token::Function => self.parse_function_type(),
            Token::Ident(name) => {
                self.advance();
                Some(builtin_type(name).unwrap_or(Type::Named(name)))
            },
            other => {
                self.error(format!("expected type, found {:?}", other));
                None
            },
        }
    }

    fn parse_array_type(&mut self) -> Option<Type> {
        self.expect(Token::Array)?;
        self.expect(Token::LBracket)?;
        let size = match self.current_token() {
            Token::Integer(n) if n >= 0 => {
                self.advance();
                n as u32
            },
            other => {
                self.error(format!("expected array size, found {:?}", other));
                return None;
            },
        };
        self.expect(Token::RBracket)?;
        self.expect(Token::Of)?;
        let element = self.parse_type()?;
        Some(Type::Array(Box::new(element), size))
    }

    fn parse_function_type(&mut self) -> Option<Type> {
        self.expect(Token::Function)?;
        self.expect(Token::LParen)?;
        let mut params = Vec::new();
        if self.current_token() != Token::RParen {
            params.push(self.parse_type()?);
            while self.match_token(Token::Comma) {
                params.push(self.parse_type()?);
            }
        }
        self.expect(Token::RParen)?;
        self.expect(Token::Colon)?;
        let ret = self.parse_type()?;
        Some(Type::Function(params, Box::new(ret)))
    }
}

fn builtin_type(name: Symbol) -> Option<Type> {
    match name.as_str() {
        "integer" => Some(Type::Integer),
        "double" => Some(Type::Double),
        "boolean" => Some(Type::Boolean),
        "char" => Some(Type::Char),
        "void" => Some(Type::Void),
        "string" => Some(Type::String),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphc_util::Handler;

    fn parse_type(source: &str) -> Option<Type> {
        let mut handler = Handler::new();
        let mut parser = Parser::new(source, &mut handler);
        parser.parse_type()
    }

    #[test]
    fn test_primitive_types() {
        assert_eq!(parse_type("integer"), Some(Type::Integer));
        assert_eq!(parse_type("double"), Some(Type::Double));
        assert_eq!(parse_type("boolean"), Some(Type::Boolean));
        assert_eq!(parse_type("char"), Some(Type::Char));
        assert_eq!(parse_type("void"), Some(Type::Void));
        assert_eq!(parse_type("string"), Some(Type::String));
    }

    #[test]
    fn test_array_type() {
        assert_eq!(
            parse_type("array[10] of integer"),
            Some(Type::Array(Box::new(Type::Integer), 10))
        );
    }

    #[test]
    fn test_nested_array_type() {
        assert_eq!(
            parse_type("array[2] of array[3] of double"),
            Some(Type::Array(
                Box::new(Type::Array(Box::new(Type::Double), 3)),
                2
            ))
        );
    }

    #[test]
    fn test_function_type() {
        assert_eq!(
            parse_type("function(integer, boolean) : integer"),
            Some(Type::Function(
                vec![Type::Integer, Type::Boolean],
                Box::new(Type::Integer)
            ))
        );
    }

    #[test]
    fn test_function_type_no_params() {
        assert_eq!(
            parse_type("function() : void"),
            Some(Type::Function(vec![], Box::new(Type::Void)))
        );
    }

    #[test]
    fn test_named_type_is_not_builtin() {
        assert_eq!(
            parse_type("Widget"),
            Some(Type::Named(Symbol::intern_known("Widget")))
        );
    }
}
