//! Statement and block parsing.

use crate::ast::*;
use crate::Parser;
use minicc_lex::TokenKind;

impl<'a> Parser<'a> {
    /// block ::= '{' local_decl* stmt* '}'
    ///
    /// Declarations always precede statements within a block; a type token
    /// can only begin a declaration, so the split needs no lookahead.
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let start = self.current().span;
        self.expect(TokenKind::LBrace)?;

        let mut decls = Vec::new();
        while self.current_kind().is_var_type() {
            decls.push(self.parse_local_decl()?);
        }

        let mut stmts = Vec::new();
        while self.current_kind() != TokenKind::RBrace && self.current_kind() != TokenKind::Eof {
            stmts.push(self.parse_stmt()?);
        }

        self.expect(TokenKind::RBrace)?;
        Some(Block {
            decls,
            stmts,
            span: start,
        })
    }

    /// local_decl ::= var_type IDENT ';'
    fn parse_local_decl(&mut self) -> Option<LocalVar> {
        let ty = self.parse_var_type()?;
        let (name, span) = self.parse_ident()?;
        self.expect(TokenKind::Semi)?;
        Some(LocalVar { name, ty, span })
    }

    /// stmt ::= expr_stmt | block | if_stmt | while_stmt | return_stmt
    pub(crate) fn parse_stmt(&mut self) -> Option<Stmt> {
        match self.current_kind() {
            TokenKind::LBrace => self.parse_block().map(Stmt::Block),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Semi => {
                // A lone ';' has no semantics.
                self.advance();
                Some(Stmt::Empty)
            }
            _ => {
                let expr = self.parse_expr()?;
                self.expect(TokenKind::Semi)?;
                Some(Stmt::Expr(expr))
            }
        }
    }

    /// if_stmt ::= 'if' '(' expr ')' block ('else' block)?
    fn parse_if_stmt(&mut self) -> Option<Stmt> {
        let start = self.current().span;
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.parse_block()?;

        let else_block = if self.match_kind(TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };

        Some(Stmt::If(IfStmt {
            cond,
            then_block,
            else_block,
            span: start,
        }))
    }

    /// while_stmt ::= 'while' '(' expr ')' stmt
    ///
    /// The body is any statement, which lets the test programs write
    /// single-statement loops without braces.
    fn parse_while_stmt(&mut self) -> Option<Stmt> {
        let start = self.current().span;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_stmt()?;

        Some(Stmt::While(WhileStmt {
            cond,
            body: Box::new(body),
            span: start,
        }))
    }

    /// return_stmt ::= 'return' expr? ';'
    fn parse_return_stmt(&mut self) -> Option<Stmt> {
        let start = self.current().span;
        self.expect(TokenKind::Return)?;

        let value = if self.current_kind() == TokenKind::Semi {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(TokenKind::Semi)?;

        Some(Stmt::Return(ReturnStmt { value, span: start }))
    }
}
