//! Numeric literal lexing.

use crate::token::TokenKind;
use crate::Lexer;

impl<'a> Lexer<'a> {
    /// Lexes a numeric literal.
    ///
    /// A run of digits with an optional embedded decimal point. A leading
    /// `.` followed by digits is a float literal, and any `.` after a digit
    /// run promotes the number to a float literal. No exponent, no sign;
    /// the sign is the unary-minus production's job.
    pub(crate) fn lex_number(&mut self) -> TokenKind {
        let start = self.cursor.position();
        let mut is_float = false;

        if self.cursor.current_char() == '.' {
            // Leading-dot float: .[0-9]+
            is_float = true;
            self.cursor.advance();
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
        } else {
            while self.cursor.current_char().is_ascii_digit() {
                self.cursor.advance();
            }
            if self.cursor.current_char() == '.' {
                is_float = true;
                self.cursor.advance();
                while self.cursor.current_char().is_ascii_digit() {
                    self.cursor.advance();
                }
            }
        }

        let text = self.cursor.slice_from(start);
        if is_float {
            TokenKind::FloatLit(text.parse::<f32>().unwrap_or(0.0))
        } else {
            TokenKind::IntLit(text.parse::<i32>().unwrap_or(0))
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
    fn test_int_literal() {
        assert_eq!(lex_one("42"), TokenKind::IntLit(42));
        assert_eq!(lex_one("0"), TokenKind::IntLit(0));
        assert_eq!(lex_one("45677654"), TokenKind::IntLit(45677654));
    }

    #[test]
    fn test_float_literal() {
        assert_eq!(lex_one("3.14"), TokenKind::FloatLit(3.14));
        assert_eq!(lex_one("0.000001"), TokenKind::FloatLit(0.000001));
    }

    #[test]
    fn test_leading_dot_float() {
        assert_eq!(lex_one(".5"), TokenKind::FloatLit(0.5));
    }

    #[test]
    fn test_trailing_dot_promotes_to_float() {
        assert_eq!(lex_one("5."), TokenKind::FloatLit(5.0));
    }

    #[test]
    fn test_no_exponent() {
        // "1e10" lexes as the int 1 followed by the identifier e10
        let mut lexer = Lexer::new("1e10");
        assert_eq!(lexer.next_token().kind, TokenKind::IntLit(1));
        assert!(matches!(lexer.next_token().kind, TokenKind::Ident(_)));
    }

    #[test]
    fn test_no_sign() {
        // "-1" is unary minus applied to the literal 1
        let mut lexer = Lexer::new("-1");
        assert_eq!(lexer.next_token().kind, TokenKind::Minus);
        assert_eq!(lexer.next_token().kind, TokenKind::IntLit(1));
    }
}
