//! Diagnostic module - error collection and reporting.
//!
//! The front-end reports three classes of errors (lexical, syntactic,
//! semantic). Each phase pushes [`Diagnostic`] values into a shared
//! [`Handler`]; the driver renders them to standard error after the
//! pipeline stops.
//!
//! # Examples
//!
//! ```
//! use minicc_util::{Diagnostic, DiagnosticKind, Handler, Span};
//!
//! let handler = Handler::new();
//! handler.emit(Diagnostic::new(
//!     DiagnosticKind::Syntax,
//!     "expected ';'",
//!     Span::point(3, 14),
//! ));
//!
//! assert!(handler.has_errors());
//! assert_eq!(handler.error_count(), 1);
//! ```

use crate::Span;
use std::cell::RefCell;
use std::fmt;

/// The class of a diagnostic, matching the front-end's three error classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// An unrecognized byte in the source
    Lexical,
    /// A token stream that does not match the grammar
    Syntax,
    /// A name, scope, or type violation
    Semantic,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "lexical error"),
            DiagnosticKind::Syntax => write!(f, "syntax error"),
            DiagnosticKind::Semantic => write!(f, "semantic error"),
        }
    }
}

/// A single diagnostic with class, message, and source position.
///
/// Renders as `<kind>: <message> at line <N> column <M>`.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    /// Error class
    pub kind: DiagnosticKind,
    /// Main diagnostic message
    pub message: String,
    /// Source location
    pub span: Span,
}

impl Diagnostic {
    /// Create a new diagnostic.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    /// Create a lexical diagnostic.
    pub fn lexical(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::Lexical, message, span)
    }

    /// Create a syntax diagnostic.
    pub fn syntax(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::Syntax, message, span)
    }

    /// Create a semantic diagnostic.
    pub fn semantic(message: impl Into<String>, span: Span) -> Self {
        Self::new(DiagnosticKind::Semantic, message, span)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} at line {} column {}",
            self.kind, self.message, self.span.line, self.span.column
        )
    }
}

/// Handler for collecting diagnostics across the compilation pipeline.
///
/// Diagnostics are stored in emission order. Interior mutability lets the
/// scanner, parser, and analyzer share one handler without threading
/// `&mut` borrows through every production.
///
/// # Examples
///
/// ```
/// use minicc_util::{Diagnostic, Handler, Span};
///
/// let handler = Handler::new();
/// handler.emit(Diagnostic::semantic("unknown variable 'x'", Span::point(1, 1)));
///
/// for diag in handler.diagnostics() {
///     eprintln!("{}", diag);
/// }
/// ```
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    /// Create a new, empty handler.
    pub fn new() -> Self {
        Self {
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    /// Emit a diagnostic.
    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    /// Check if any diagnostics have been reported.
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.borrow().is_empty()
    }

    /// Get the number of reported diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.borrow().len()
    }

    /// Get a snapshot of all diagnostics in emission order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    /// Clear all diagnostics.
    ///
    /// Running the front-end twice in one process re-initializes the
    /// handler through this.
    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}
