//! minicc-par - the Mini-C parser.
//!
//! A predictive recursive-descent parser built from the grammar's first
//! sets, with bounded lookahead (k <= 2). Tokens are pulled from the
//! scanner on demand through a push-back buffer; the three ambiguous
//! decision points (global variable vs. function, assignment vs. r-value,
//! variable reference vs. call) peek ahead and restore tokens to the
//! buffer.
//!
//! Only the first syntactic violation is reported; subsequent messages are
//! suppressed to avoid cascades. On error the parser returns whatever
//! partial tree it built, and the driver must not analyze it.
//!
//! # Example
//!
//! ```
//! use minicc_par::Parser;
//! use minicc_util::Handler;
//!
//! let handler = Handler::new();
//! let mut parser = Parser::new("int x; void runner(void) { x = 1; }", &handler);
//! let program = parser.parse();
//! assert!(!handler.has_errors());
//! assert_eq!(program.items.len(), 2);
//! ```

pub mod ast;
mod expr;
mod items;
mod print;
mod stmt;

pub use ast::*;

use minicc_lex::{Lexer, Token, TokenKind};
use minicc_util::{Diagnostic, Handler, Symbol};
use std::collections::VecDeque;

/// Recursive-descent parser over an on-demand token stream.
pub struct Parser<'a> {
    /// The scanner, pulled from only when the buffer is empty.
    lexer: Lexer<'a>,

    /// Push-back token buffer underpinning peek and rewind.
    buffer: VecDeque<Token>,

    /// Diagnostic sink shared with the other phases.
    handler: &'a Handler,

    /// Set once the first syntax error is reported; later errors are
    /// suppressed.
    error_reported: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser over the given source.
    pub fn new(source: &'a str, handler: &'a Handler) -> Self {
        Self {
            lexer: Lexer::new(source),
            buffer: VecDeque::new(),
            handler,
            error_reported: false,
        }
    }

    /// Parse a complete program.
    ///
    /// Check the handler for errors before using the result: after a
    /// syntax error the returned tree is incomplete.
    pub fn parse(&mut self) -> Program {
        self.parse_program()
    }

    /// Whether a syntax error has been reported.
    pub fn had_error(&self) -> bool {
        self.error_reported
    }

    // ------------------------------------------------------------------
    // Token buffer
    // ------------------------------------------------------------------

    /// Make sure the buffer holds at least `n` tokens.
    fn fill(&mut self, n: usize) {
        while self.buffer.len() < n {
            let tok = self.lexer.next_token();
            self.buffer.push_back(tok);
        }
    }

    /// The token the parser is looking at.
    pub(crate) fn current(&mut self) -> Token {
        self.fill(1);
        self.buffer[0]
    }

    /// The kind of the current token.
    pub(crate) fn current_kind(&mut self) -> TokenKind {
        self.current().kind
    }

    /// The token after the current one.
    pub(crate) fn peek_second(&mut self) -> Token {
        self.fill(2);
        self.buffer[1]
    }

    /// Consume and return the current token.
    pub(crate) fn advance(&mut self) -> Token {
        match self.buffer.pop_front() {
            Some(tok) => tok,
            None => self.lexer.next_token(),
        }
    }

    /// Restore a token to the front of the buffer.
    pub(crate) fn put_back(&mut self, tok: Token) {
        self.buffer.push_front(tok);
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.current_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or report an error.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        if self.current_kind() == kind {
            Some(self.advance())
        } else {
            self.error(format!("expected {}", kind));
            None
        }
    }

    /// Consume an identifier or report an error.
    pub(crate) fn parse_ident(&mut self) -> Option<(Symbol, minicc_util::Span)> {
        match self.current().kind {
            TokenKind::Ident(name) => {
                let tok = self.advance();
                Some((name, tok.span))
            }
            _ => {
                self.error("expected an identifier");
                None
            }
        }
    }

    // ------------------------------------------------------------------
    // Error reporting
    // ------------------------------------------------------------------

    /// Report a syntax error at the current token.
    ///
    /// Only the first violation is reported. An unrecognized byte is
    /// reported as a lexical error instead, since the scanner passes such
    /// bytes through for the parser to reject.
    pub(crate) fn error(&mut self, message: impl Into<String>) {
        if self.error_reported {
            return;
        }
        self.error_reported = true;

        let tok = self.current();
        let diagnostic = match tok.kind {
            TokenKind::Unknown(c) => {
                Diagnostic::lexical(format!("unrecognized character '{}'", c), tok.span)
            }
            _ => {
                let message = message.into();
                Diagnostic::syntax(format!("{}, found {}", message, tok.kind), tok.span)
            }
        };
        self.handler.emit(diagnostic);
    }
}
