//! Top-level item parsing: externs, global variables, and functions.

use crate::ast::*;
use crate::Parser;
use minicc_lex::TokenKind;

impl<'a> Parser<'a> {
    /// program ::= extern* decl*
    pub(crate) fn parse_program(&mut self) -> Program {
        let mut items = Vec::new();

        while self.current_kind() == TokenKind::Extern {
            match self.parse_extern() {
                Some(proto) => items.push(Item::Extern(proto)),
                None => return Program { items },
            }
        }

        while self.current_kind() != TokenKind::Eof {
            match self.parse_decl() {
                Some(item) => items.push(item),
                None => break,
            }
        }

        Program { items }
    }

    /// extern ::= 'extern' type_spec IDENT '(' params ')' ';'
    fn parse_extern(&mut self) -> Option<Prototype> {
        let start = self.current().span;
        self.expect(TokenKind::Extern)?;

        let ret = self.parse_type_spec()?;
        let (name, _) = self.parse_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semi)?;

        Some(Prototype {
            name,
            ret,
            params,
            span: start,
        })
    }

    /// decl ::= var_type IDENT ';' | type_spec IDENT '(' params ')' block
    ///
    /// A global variable and a function both begin with a type token and an
    /// identifier, so the parser peeks two tokens ahead: a ';' in third
    /// position means a global variable. The peeked tokens go back into the
    /// buffer before the chosen production runs.
    fn parse_decl(&mut self) -> Option<Item> {
        if !self.current_kind().is_type_spec() {
            self.error("expected 'int', 'float', 'bool' or 'void'");
            return None;
        }

        let look1 = self.advance();
        let look2 = self.advance();
        let is_global_var = look1.kind.is_var_type() && self.current_kind() == TokenKind::Semi;
        self.put_back(look2);
        self.put_back(look1);

        if is_global_var {
            self.parse_global_var().map(Item::Global)
        } else {
            self.parse_fn_decl().map(Item::Fn)
        }
    }

    /// Global variable: var_type IDENT ';'
    fn parse_global_var(&mut self) -> Option<GlobalVar> {
        let ty = self.parse_var_type()?;
        let (name, span) = self.parse_ident()?;
        self.expect(TokenKind::Semi)?;
        Some(GlobalVar { name, ty, span })
    }

    /// Function: type_spec IDENT '(' params ')' block
    fn parse_fn_decl(&mut self) -> Option<FnDecl> {
        let start = self.current().span;
        let ret = self.parse_type_spec()?;
        let (name, _) = self.parse_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.parse_params()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;

        Some(FnDecl {
            proto: Prototype {
                name,
                ret,
                params,
                span: start,
            },
            body,
        })
    }

    /// params ::= 'void' | ε | param (',' param)*
    ///
    /// A 'void' parameter list is equivalent to an empty one.
    fn parse_params(&mut self) -> Option<Vec<Param>> {
        if self.match_kind(TokenKind::Void) {
            return Some(Vec::new());
        }
        if self.current_kind() == TokenKind::RParen {
            return Some(Vec::new());
        }

        let mut params = vec![self.parse_param()?];
        while self.match_kind(TokenKind::Comma) {
            params.push(self.parse_param()?);
        }
        Some(params)
    }

    /// param ::= var_type IDENT
    fn parse_param(&mut self) -> Option<Param> {
        let ty = self.parse_var_type()?;
        let (name, span) = self.parse_ident()?;
        Some(Param { name, ty, span })
    }

    /// type_spec ::= 'void' | var_type
    ///
    /// Returns `None` inside `Some` for void; a parse failure is `None`.
    pub(crate) fn parse_type_spec(&mut self) -> Option<Option<Ty>> {
        if self.match_kind(TokenKind::Void) {
            return Some(None);
        }
        self.parse_var_type().map(Some)
    }

    /// var_type ::= 'int' | 'float' | 'bool'
    pub(crate) fn parse_var_type(&mut self) -> Option<Ty> {
        let ty = match self.current_kind() {
            TokenKind::Int => Ty::Int,
            TokenKind::Float => Ty::Float,
            TokenKind::Bool => Ty::Bool,
            _ => {
                self.error("expected 'int', 'float' or 'bool'");
                return None;
            }
        };
        self.advance();
        Some(ty)
    }
}
