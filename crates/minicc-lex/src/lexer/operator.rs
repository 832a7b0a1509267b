//! Operator lexing with one-byte lookahead.
//!
//! Each of `=`, `!`, `<`, `>`, `&`, `|` needs one byte of lookahead: the
//! doubled or `=`-suffixed forms produce compound tokens, and the lookahead
//! byte is consumed only when the compound form matches.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes `=` or `==`.
    pub(crate) fn lex_equals(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::EqEq
        } else {
            TokenKind::Assign
        }
    }

    /// Lexes `!` or `!=`.
    pub(crate) fn lex_bang(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::NotEq
        } else {
            TokenKind::Bang
        }
    }

    /// Lexes `<` or `<=`.
    pub(crate) fn lex_less(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::LtEq
        } else {
            TokenKind::Lt
        }
    }

    /// Lexes `>` or `>=`.
    pub(crate) fn lex_greater(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            TokenKind::GtEq
        } else {
            TokenKind::Gt
        }
    }

    /// Lexes `&&`, or bare `&` for the parser to reject.
    pub(crate) fn lex_ampersand(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('&') {
            TokenKind::AndAnd
        } else {
            TokenKind::Ampersand
        }
    }

    /// Lexes `||`, or bare `|` for the parser to reject.
    pub(crate) fn lex_pipe(&mut self) -> TokenKind {
        self.cursor.advance();
        if self.cursor.match_char('|') {
            TokenKind::OrOr
        } else {
            TokenKind::Pipe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(source: &str) -> TokenKind {
        Lexer::new(source).next_token().kind
    }

    #[test]
    fn test_simple_forms() {
        assert_eq!(lex_one("="), TokenKind::Assign);
        assert_eq!(lex_one("!"), TokenKind::Bang);
        assert_eq!(lex_one("<"), TokenKind::Lt);
        assert_eq!(lex_one(">"), TokenKind::Gt);
        assert_eq!(lex_one("&"), TokenKind::Ampersand);
        assert_eq!(lex_one("|"), TokenKind::Pipe);
    }

    #[test]
    fn test_compound_forms() {
        assert_eq!(lex_one("=="), TokenKind::EqEq);
        assert_eq!(lex_one("!="), TokenKind::NotEq);
        assert_eq!(lex_one("<="), TokenKind::LtEq);
        assert_eq!(lex_one(">="), TokenKind::GtEq);
        assert_eq!(lex_one("&&"), TokenKind::AndAnd);
        assert_eq!(lex_one("||"), TokenKind::OrOr);
    }

    #[test]
    fn test_lookahead_not_consumed_on_mismatch() {
        let mut lexer = Lexer::new("=x");
        assert_eq!(lexer.next_token().kind, TokenKind::Assign);
        assert!(matches!(lexer.next_token().kind, TokenKind::Ident(_)));

        let mut lexer = Lexer::new("<5");
        assert_eq!(lexer.next_token().kind, TokenKind::Lt);
        assert_eq!(lexer.next_token().kind, TokenKind::IntLit(5));
    }

    #[test]
    fn test_adjacent_compounds() {
        // "<==" is "<=" then "="
        let mut lexer = Lexer::new("<==");
        assert_eq!(lexer.next_token().kind, TokenKind::LtEq);
        assert_eq!(lexer.next_token().kind, TokenKind::Assign);
    }
}
