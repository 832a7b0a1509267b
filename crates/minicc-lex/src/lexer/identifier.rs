//! Identifier and keyword lexing.

use crate::token::{keyword_from_ident, TokenKind};
use crate::Lexer;
use minicc_util::Symbol;

impl<'a> Lexer<'a> {
    /// Lexes an identifier or keyword.
    ///
    /// Identifiers match `[A-Za-z_][A-Za-z0-9_]*`. After assembly the
    /// lexeme is checked against the keyword table; `true` and `false`
    /// produce bool literal tokens.
    pub(crate) fn lex_identifier(&mut self) -> TokenKind {
        let start = self.cursor.position();

        while self.cursor.current_char().is_ascii_alphanumeric()
            || self.cursor.current_char() == '_'
        {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(start);
        match keyword_from_ident(text) {
            Some(kind) => kind,
            None => TokenKind::Ident(Symbol::intern(text)),
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
    fn test_plain_identifier() {
        match lex_one("factorial") {
            TokenKind::Ident(sym) => assert_eq!(sym.as_str(), "factorial"),
            other => panic!("expected identifier, got {:?}", other),
        }
    }

    #[test]
    fn test_underscore_start() {
        assert!(matches!(lex_one("_tmp1"), TokenKind::Ident(_)));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(lex_one("int"), TokenKind::Int);
        assert_eq!(lex_one("float"), TokenKind::Float);
        assert_eq!(lex_one("bool"), TokenKind::Bool);
        assert_eq!(lex_one("void"), TokenKind::Void);
        assert_eq!(lex_one("extern"), TokenKind::Extern);
        assert_eq!(lex_one("if"), TokenKind::If);
        assert_eq!(lex_one("else"), TokenKind::Else);
        assert_eq!(lex_one("while"), TokenKind::While);
        assert_eq!(lex_one("return"), TokenKind::Return);
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(lex_one("true"), TokenKind::BoolLit(true));
        assert_eq!(lex_one("false"), TokenKind::BoolLit(false));
    }

    #[test]
    fn test_keyword_prefix_is_identifier() {
        // "iff" starts with "if" but is an ordinary identifier
        assert!(matches!(lex_one("iff"), TokenKind::Ident(_)));
        assert!(matches!(lex_one("integer"), TokenKind::Ident(_)));
        assert!(matches!(lex_one("truely"), TokenKind::Ident(_)));
    }
}
