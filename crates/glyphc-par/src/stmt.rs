//! Statement and block parsing.
//!
//! ```text
//! block = "{" stmt* "}"
//! stmt  = (vardecl | return | assign_or_expr) ";"
//!       | if | for | while | break ";" | continue ";" | block
//! ```

use glyphc_lex::Token;

use crate::ast::{
    AssignExpr, Block, Expr, ForInit, ForStmt, IfStmt, LetStmt, ReturnStmt, Stmt, WhileStmt,
};
use crate::core::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.expect(Token::LBrace)?;
        let mut stmts = Vec::new();
        while self.current_token() != Token::RBrace {
            if self.is_at_end() {
                self.error("unterminated block".to_string());
                return None;
            }
            stmts.push(self.parse_stmt()?);
        }
        let end = self.expect(Token::RBrace)?;
        Some(Block {
            stmts,
            span: start.merge(end),
        })
    }

    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_token() {
            Token::Let => self.parse_let_stmt().map(Stmt::Let),
            Token::If => self.parse_if_stmt().map(Stmt::If),
            Token::For => self.parse_for_stmt().map(Stmt::For),
            Token::While => self.parse_while_stmt().map(Stmt::While),
            Token::Return => self.parse_return_stmt().map(Stmt::Return),
            Token::Break => {
                let span = self.expect(Token::Break)?;
                self.expect(Token::Semicolon)?;
                Some(Stmt::Break(span))
            },
            Token::Continue => {
                let span = self.expect(Token::Continue)?;
                self.expect(Token::Semicolon)?;
                Some(Stmt::Continue(span))
            },
            Token::LBrace => self.parse_block().map(Stmt::Block),
            _ => {
                let expr = self.parse_assign_or_expr()?;
                self.expect(Token::Semicolon)?;
                Some(Stmt::Expr(expr))
            },
        }
    }

    /// `assign_or_expr = expr ("=" expr)?`, parsed without a trailing `;`.
    fn parse_assign_or_expr(&mut self) -> Option<Expr> {
        let lhs = self.parse_expr()?;
        if self.match_token(Token::Eq) {
            let rhs = self.parse_expr()?;
            let span = lhs.span().merge(rhs.span());
            Some(Expr::Assign(AssignExpr {
                place: Box::new(lhs),
                value: Box::new(rhs),
                span,
            }))
        } else {
            Some(lhs)
        }
    }

    fn parse_let_stmt(&mut self) -> Option<LetStmt> {
        let start = self.expect(Token::Let)?;
        let name = match self.current_token() {
            Token::Ident(name) => {
                self.advance();
                name
            },
            other => {
                self.error(format!("expected identifier, found {:?}", other));
                return None;
            },
        };
        self.expect(Token::Eq)?;
        let init = self.parse_expr()?;
        let end = self.expect(Token::Semicolon)?;
        Some(LetStmt {
            name,
            init,
            span: start.merge(end),
        })
    }

    fn parse_if_stmt(&mut self) -> Option<IfStmt> {
        let start = self.expect(Token::If)?;
        self.expect(Token::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(Token::RParen)?;
        let then_branch = Box::new(self.parse_stmt()?);
        let else_branch = if self.match_token(Token::Else) {
            if self.current_token() == Token::If {
                Some(Box::new(Stmt::If(self.parse_if_stmt()?)))
            } else {
                Some(Box::new(self.parse_stmt()?))
            }
        } else {
            None
        };
        let span = start.merge(
            else_branch
                .as_deref()
                .map(stmt_span)
                .unwrap_or_else(|| stmt_span(&then_branch)),
        );
        Some(IfStmt {
            cond,
            then_branch,
            else_branch,
            span,
        })
    }

    fn parse_while_stmt(&mut self) -> Option<WhileStmt> {
        let start = self.expect(Token::While)?;
        self.expect(Token::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(Token::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(stmt_span(&body));
        Some(WhileStmt { cond, body, span })
    }

    fn parse_for_stmt(&mut self) -> Option<ForStmt> {
        let start = self.expect(Token::For)?;
        self.expect(Token::LParen)?;
        let init = if self.current_token() == Token::Semicolon {
            None
        } else if self.current_token() == Token::Let {
            Some(ForInit::Let(self.parse_let_stmt()?))
        } else {
            let expr = self.parse_assign_or_expr()?;
            self.expect(Token::Semicolon)?;
            Some(ForInit::Expr(expr))
        };
        if init.is_none() {
            self.expect(Token::Semicolon)?;
        }
        let cond = self.parse_expr()?;
        self.expect(Token::Semicolon)?;
        let update = self.parse_assign_or_expr()?;
        self.expect(Token::RParen)?;
        let body = Box::new(self.parse_stmt()?);
        let span = start.merge(stmt_span(&body));
        Some(ForStmt {
            init,
            cond,
            update,
            body,
            span,
        })
    }

    fn parse_return_stmt(&mut self) -> Option<ReturnStmt> {
        let start = self.expect(Token::Return)?;
        let value = if self.current_token() == Token::Semicolon {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let end = self.expect(Token::Semicolon)?;
        Some(ReturnStmt {
            value,
            span: start.merge(end),
        })
    }
}

fn stmt_span(stmt: &Stmt) -> glyphc_util::Span {
    match stmt {
        Stmt::Let(s) => s.span,
        Stmt::If(s) => s.span,
        Stmt::For(s) => s.span,
        Stmt::While(s) => s.span,
        Stmt::Break(s) => *s,
        Stmt::Continue(s) => *s,
        Stmt::Return(s) => s.span,
        Stmt::Block(b) => b.span,
        Stmt::Expr(e) => e.span(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphc_util::Handler;

    fn parse_stmt(source: &str) -> (Option<Stmt>, Handler) {
        let mut handler = Handler::new();
        let result = {
            let mut parser = Parser::new(source, &mut handler);
            parser.parse_stmt()
        };
        (result, handler)
    }

    #[test]
    fn test_let_stmt() {
        let (stmt, h) = parse_stmt("let x = 1;");
        assert!(matches!(stmt, Some(Stmt::Let(_))));
        assert!(!h.has_errors());
    }

    #[test]
    fn test_assignment_stmt() {
        let (stmt, _) = parse_stmt("x = 1;");
        match stmt {
            Some(Stmt::Expr(Expr::Assign(_))) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_bare_expr_stmt() {
        let (stmt, _) = parse_stmt("f(1);");
        assert!(matches!(stmt, Some(Stmt::Expr(Expr::Call(_)))));
    }

    #[test]
    fn test_if_stmt_no_else() {
        let (stmt, _) = parse_stmt("if (x) { return; }");
        match stmt {
            Some(Stmt::If(IfStmt { else_branch, .. })) => assert!(else_branch.is_none()),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_if_else_chain() {
        let (stmt, _) = parse_stmt("if (x) { return; } else if (y) { return; } else { return; }");
        match stmt {
            Some(Stmt::If(IfStmt { else_branch: Some(b), .. })) => {
                assert!(matches!(*b, Stmt::If(_)));
            },
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_while_stmt() {
        let (stmt, _) = parse_stmt("while (x) { x = x - 1; }");
        assert!(matches!(stmt, Some(Stmt::While(_))));
    }

    #[test]
    fn test_for_stmt_full() {
        let (stmt, h) = parse_stmt("for (let i = 0; i < 10; i = i + 1) { }");
        assert!(matches!(stmt, Some(Stmt::For(_))));
        assert!(!h.has_errors());
    }

    #[test]
    fn test_for_stmt_no_init() {
        let (stmt, h) = parse_stmt("for (; i < 10; i = i + 1) { }");
        assert!(matches!(stmt, Some(Stmt::For(_))));
        assert!(!h.has_errors());
    }

    #[test]
    fn test_break_continue() {
        let (stmt, _) = parse_stmt("break;");
        assert!(matches!(stmt, Some(Stmt::Break(_))));
        let (stmt, _) = parse_stmt("continue;");
        assert!(matches!(stmt, Some(Stmt::Continue(_))));
    }

    #[test]
    fn test_return_with_value() {
        let (stmt, _) = parse_stmt("return 1 + 2;");
        match stmt {
            Some(Stmt::Return(ReturnStmt { value: Some(_), .. })) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_return_without_value() {
        let (stmt, _) = parse_stmt("return;");
        match stmt {
            Some(Stmt::Return(ReturnStmt { value: None, .. })) => {},
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_nested_block_stmt() {
        let (stmt, _) = parse_stmt("{ let x = 1; { let y = 2; } }");
        match stmt {
            Some(Stmt::Block(b)) => assert_eq!(b.stmts.len(), 2),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon_reports_error() {
        let (stmt, h) = parse_stmt("let x = 1");
        assert!(stmt.is_none());
        assert!(h.has_errors());
    }
}
