//! Expression parsing via straight recursive descent.
//!
//! The grammar is fully disambiguated by precedence level, so there is no
//! Pratt table: each level is its own method, from loosest to tightest.
//!
//! ```text
//! expr       = equality
//! equality   = relational (("==" | "!=") relational)*
//! relational = add (("<" | ">" | "<=" | ">=") add)*
//! add        = mul (("+" | "-") mul)*
//! mul        = unary (("*" | "/") unary)*
//! unary      = ("+" | "-")? postfix ("++" | "--")?
//! postfix    = primary ("[" expr "]" | "(" args? ")")*
//! primary    = LITERAL | IDENT | "(" expr ")" | "[" (expr ("," expr)*)? "]"
//! ```
//!
//! `assign_or_expr` (the `place = value` form) is parsed one level up, at
//! the statement boundary, since bare assignment is not part of `expr`.

use glyphc_lex::Token;

use crate::ast::{
    ArrayLiteralExpr, BinOp, BinaryExpr, CallExpr, Expr, IndexExpr, Literal, UnOp, UnaryExpr,
};
use crate::core::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_equality()
    }

    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.current_token() {
                Token::EqEq => BinOp::Eq,
                Token::NotEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_relational()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            });
        }
        Some(lhs)
    }

    fn parse_relational(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current_token() {
                Token::Lt => BinOp::Lt,
                Token::Le => BinOp::Le,
                Token::Gt => BinOp::Gt,
                Token::Ge => BinOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            });
        }
        Some(lhs)
    }

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current_token() {
                Token::Plus => BinOp::Add,
                Token::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            });
        }
        Some(lhs)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current_token() {
                Token::Star => BinOp::Mul,
                Token::Slash => BinOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::Binary(BinaryExpr {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            });
        }
        Some(lhs)
    }

    fn parse_unary(&mut self) -> Option<Expr> {
        let prefix = match self.current_token() {
            Token::Plus => Some((UnOp::Plus, self.current_span())),
            Token::Minus => Some((UnOp::Neg, self.current_span())),
            _ => None,
        };
        if let Some((op, start)) = prefix {
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.merge(operand.span());
            return Some(Expr::Unary(UnaryExpr {
                op,
                operand: Box::new(operand),
                span,
            }));
        }

        let operand = self.parse_postfix()?;
        match self.current_token() {
            Token::PlusPlus => {
                let end = self.current_span();
                self.advance();
                Some(Expr::PostIncrement(
                    Box::new(operand.clone()),
                    operand.span().merge(end),
                ))
            },
            Token::MinusMinus => {
                let end = self.current_span();
                self.advance();
                Some(Expr::PostDecrement(
                    Box::new(operand.clone()),
                    operand.span().merge(end),
                ))
            },
            _ => Some(operand),
        }
    }

    fn parse_postfix(&mut self) -> Option<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.current_token() {
                Token::LBracket => {
                    self.advance();
                    let index = self.parse_expr()?;
                    let end = self.expect(Token::RBracket)?;
                    let span = expr.span().merge(end);
                    expr = Expr::Index(IndexExpr {
                        base: Box::new(expr),
                        index: Box::new(index),
                        span,
                    });
                },
                Token::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    if self.current_token() != Token::RParen {
                        args.push(self.parse_expr()?);
                        while self.match_token(Token::Comma) {
                            args.push(self.parse_expr()?);
                        }
                    }
                    let end = self.expect(Token::RParen)?;
                    let span = expr.span().merge(end);
                    expr = Expr::Call(CallExpr {
                        callee: Box::new(expr),
                        args,
                        span,
                    });
                },
                _ => break,
            }
        }
        Some(expr)
    }

    fn parse_primary(&mut self) -> Option<Expr> {
        let span = self.current_span();
        match self.current_token() {
            Token::Integer(n) => {
                self.advance();
                Some(Expr::Literal(Literal::Integer(n), span))
            },
            Token::Double(d) => {
                self.advance();
                Some(Expr::Literal(Literal::Double(d), span))
            },
            Token::String(s) => {
                self.advance();
                Some(Expr::Literal(Literal::String(s), span))
            },
            Token::True => {
                self.advance();
                Some(Expr::Literal(Literal::Boolean(true), span))
            },
            Token::False => {
                self.advance();
                Some(Expr::Literal(Literal::Boolean(false), span))
            },
            Token::Ident(name) => {
                self.advance();
                Some(Expr::Ident(name, span))
            },
            Token::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(Token::RParen)?;
                Some(inner)
            },
            Token::LBracket => {
                self.advance();
                let mut elements = Vec::new();
                if self.current_token() != Token::RBracket {
                    elements.push(self.parse_expr()?);
                    while self.match_token(Token::Comma) {
                        elements.push(self.parse_expr()?);
                    }
                }
                let end = self.expect(Token::RBracket)?;
                Some(Expr::ArrayLiteral(ArrayLiteralExpr {
                    elements,
                    span: span.merge(end),
                }))
            },
            other => {
                self.error(format!("expected expression, found {:?}", other));
                None
            },
        }
    }
}
