//! minicc-util - Foundation types for the Mini-C front-end.
//!
//! This crate provides the utilities shared by every compiler phase:
//!
//! - [`Span`] - source location tracking with 1-based line/column numbers
//! - [`Symbol`] - interned identifier strings with O(1) comparison
//! - [`Handler`] / [`Diagnostic`] - error collection and reporting
//! - [`IndexVec`] - typed index vectors for IR entities
//!
//! These types are deliberately small: the front-end compiles exactly one
//! file per run, so there is no source map, no file ids, and no multi-file
//! diagnostic machinery.

pub mod diagnostic;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticKind, Handler};
pub use index_vec::{Idx, IndexVec};
pub use span::Span;
pub use symbol::Symbol;
