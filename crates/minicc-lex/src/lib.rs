//! minicc-lex - the Mini-C scanner.
//!
//! The scanner transforms a source string into a stream of classified
//! lexemes with precise source positions. It exposes a single operation,
//! [`Lexer::next_token`], which produces tokens left-to-right with at most
//! one byte of lookahead; after the last meaningful token it returns an
//! end-of-file token repeatedly.
//!
//! Whitespace separates tokens and is not reported. Line comments (`//` to
//! end of line) are discarded. Any byte that does not begin an identifier,
//! number, operator, or punctuation becomes a [`TokenKind::Unknown`] token
//! for the parser to reject.
//!
//! # Example
//!
//! ```
//! use minicc_lex::{Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("int x;");
//! assert_eq!(lexer.next_token().kind, TokenKind::Int);
//! assert!(matches!(lexer.next_token().kind, TokenKind::Ident(_)));
//! assert_eq!(lexer.next_token().kind, TokenKind::Semi);
//! assert_eq!(lexer.next_token().kind, TokenKind::Eof);
//! assert_eq!(lexer.next_token().kind, TokenKind::Eof);
//! ```

pub mod cursor;
mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token, TokenKind};
