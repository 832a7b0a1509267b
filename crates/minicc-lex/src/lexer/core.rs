//! Main lexer struct and dispatch.

use minicc_util::{Span, Symbol};

use crate::cursor::Cursor;
use crate::token::{Token, TokenKind};

/// The Mini-C scanner.
///
/// Produces tokens left-to-right on demand. Dispatch is on the first
/// character of each lexeme; compound operators use one byte of lookahead
/// through [`Cursor::match_char`].
///
/// # Example
///
/// ```
/// use minicc_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("x <= 10");
/// assert!(matches!(lexer.next_token().kind, TokenKind::Ident(_)));
/// assert_eq!(lexer.next_token().kind, TokenKind::LtEq);
/// assert_eq!(lexer.next_token().kind, TokenKind::IntLit(10));
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source.
    pub(crate) cursor: Cursor<'a>,

    /// Start byte offset of the current token.
    pub(crate) token_start: usize,

    /// Start line of the current token.
    token_start_line: u32,

    /// Start column of the current token.
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer over the given source text.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// After the last meaningful token this returns an end-of-file token
    /// on every call.
    pub fn next_token(&mut self) -> Token {
        // Whitespace and line comments separate tokens and are not
        // reported.
        loop {
            self.skip_whitespace();
            if self.cursor.current_char() == '/' && self.cursor.peek_char() == '/' {
                self.skip_line_comment();
                continue;
            }
            break;
        }

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.make_token(TokenKind::Eof);
        }

        let kind = match self.cursor.current_char() {
            '{' => {
                self.cursor.advance();
                TokenKind::LBrace
            }
            '}' => {
                self.cursor.advance();
                TokenKind::RBrace
            }
            '(' => {
                self.cursor.advance();
                TokenKind::LParen
            }
            ')' => {
                self.cursor.advance();
                TokenKind::RParen
            }
            ';' => {
                self.cursor.advance();
                TokenKind::Semi
            }
            ',' => {
                self.cursor.advance();
                TokenKind::Comma
            }
            '+' => {
                self.cursor.advance();
                TokenKind::Plus
            }
            '-' => {
                self.cursor.advance();
                TokenKind::Minus
            }
            '*' => {
                self.cursor.advance();
                TokenKind::Star
            }
            '/' => {
                self.cursor.advance();
                TokenKind::Slash
            }
            '%' => {
                self.cursor.advance();
                TokenKind::Percent
            }
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            '<' => self.lex_less(),
            '>' => self.lex_greater(),
            '&' => self.lex_ampersand(),
            '|' => self.lex_pipe(),

            c if c.is_ascii_alphabetic() || c == '_' => self.lex_identifier(),

            c if c.is_ascii_digit() => self.lex_number(),

            // A leading '.' followed by digits is a float literal.
            '.' if self.cursor.peek_char().is_ascii_digit() => self.lex_number(),

            c => {
                self.cursor.advance();
                TokenKind::Unknown(c)
            }
        };

        self.make_token(kind)
    }

    /// Wraps a kind into a token carrying the lexeme and start position.
    fn make_token(&self, kind: TokenKind) -> Token {
        let lexeme = Symbol::intern(self.cursor.slice_from(self.token_start));
        let span = Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        );
        Token::new(kind, lexeme, span)
    }
}
