//! Core Types
//!
//! Positions, diagnostics, and document state shared by validation and the
//! language server.

pub mod diagnostics;
pub mod document;
pub mod position;

pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use document::{DocumentState, DocumentStore};
pub use position::{LineIndex, Position, Range, position_at};
