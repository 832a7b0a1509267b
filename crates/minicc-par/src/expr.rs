//! Expression parsing.
//!
//! The grammar's `rval` chain is a precedence ladder: each tier parses the
//! next-tighter tier and then loops over its own operator set, which makes
//! every binary operator left-associative. Unary operators right-associate
//! by recursing into themselves.

use crate::ast::*;
use crate::Parser;
use minicc_lex::TokenKind;

impl<'a> Parser<'a> {
    /// expr ::= IDENT '=' expr | rval
    ///
    /// An assignment and an r-value can both start with an identifier.
    /// The parser peeks one token past an initial identifier: an '=' means
    /// assignment, anything else restores the identifier to the buffer and
    /// parses an r-value.
    pub(crate) fn parse_expr(&mut self) -> Option<Expr> {
        if let TokenKind::Ident(name) = self.current_kind() {
            if self.peek_second().kind == TokenKind::Assign {
                let name_tok = self.advance();
                self.advance(); // '='
                let value = self.parse_expr()?;
                let span = name_tok.span.merge(value.span());
                return Some(Expr::Assign(AssignExpr {
                    name,
                    name_span: name_tok.span,
                    value: Box::new(value),
                    span,
                }));
            }
        }
        self.parse_or()
    }

    /// rval ::= rval2 ('||' rval2)*
    fn parse_or(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_and()?;
        while self.match_kind(TokenKind::OrOr) {
            let rhs = self.parse_and()?;
            lhs = binary(BinOp::Or, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval2 ::= rval3 ('&&' rval3)*
    fn parse_and(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_equality()?;
        while self.match_kind(TokenKind::AndAnd) {
            let rhs = self.parse_equality()?;
            lhs = binary(BinOp::And, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval3 ::= rval4 (('==' | '!=') rval4)*
    fn parse_equality(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_relational()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::NotEq => BinOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_relational()?;
            lhs = binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval4 ::= rval5 (('<=' | '<' | '>=' | '>') rval5)*
    fn parse_relational(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_additive()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::LtEq => BinOp::Le,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::GtEq => BinOp::Ge,
                TokenKind::Gt => BinOp::Gt,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_additive()?;
            lhs = binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval5 ::= rval6 (('+' | '-') rval6)*
    fn parse_additive(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_multiplicative()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_multiplicative()?;
            lhs = binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval6 ::= rval7 (('*' | '/' | '%') rval7)*
    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.current_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                _ => break,
            };
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = binary(op, lhs, rhs);
        }
        Some(lhs)
    }

    /// rval7 ::= ('-' | '!') rval7 | rval8
    fn parse_unary(&mut self) -> Option<Expr> {
        let op = match self.current_kind() {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Bang => UnOp::Not,
            _ => return self.parse_primary(),
        };
        let op_span = self.advance().span;
        let operand = self.parse_unary()?;
        let span = op_span.merge(operand.span());
        Some(Expr::Unary(UnaryExpr {
            op,
            operand: Box::new(operand),
            span,
        }))
    }

    /// rval8 ::= '(' expr ')' | IDENT ('(' args ')')? | literal
    fn parse_primary(&mut self) -> Option<Expr> {
        match self.current_kind() {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Some(expr)
            }
            TokenKind::Ident(name) => {
                let name_tok = self.advance();
                // A '(' right after the identifier makes it a call.
                if self.current_kind() == TokenKind::LParen {
                    self.advance();
                    let args = self.parse_args()?;
                    let close = self.expect(TokenKind::RParen)?;
                    Some(Expr::Call(CallExpr {
                        callee: name,
                        args,
                        span: name_tok.span.merge(close.span),
                    }))
                } else {
                    Some(Expr::Var(VarRef {
                        name,
                        span: name_tok.span,
                    }))
                }
            }
            TokenKind::IntLit(value) => {
                let tok = self.advance();
                Some(Expr::Literal(Lit {
                    kind: LitKind::Int(value),
                    span: tok.span,
                }))
            }
            TokenKind::FloatLit(value) => {
                let tok = self.advance();
                Some(Expr::Literal(Lit {
                    kind: LitKind::Float(value),
                    span: tok.span,
                }))
            }
            TokenKind::BoolLit(value) => {
                let tok = self.advance();
                Some(Expr::Literal(Lit {
                    kind: LitKind::Bool(value),
                    span: tok.span,
                }))
            }
            _ => {
                self.error("expected an expression");
                None
            }
        }
    }

    /// args ::= ε | expr (',' expr)*
    fn parse_args(&mut self) -> Option<Vec<Expr>> {
        if self.current_kind() == TokenKind::RParen {
            return Some(Vec::new());
        }
        let mut args = vec![self.parse_expr()?];
        while self.match_kind(TokenKind::Comma) {
            args.push(self.parse_expr()?);
        }
        Some(args)
    }
}

fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Expr {
    let span = lhs.span().merge(rhs.span());
    Expr::Binary(BinaryExpr {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
        span,
    })
}
