//! WebRelease Template Language Server
//!
//! Validation and editor support for WebRelease templates: HTML interleaved
//! with `%expression%` interpolations and `<wr-*>` control tags.
//!
//! This library provides:
//! - Expression grammar checking
//! - Tag, attribute, and tag closure validation with positioned diagnostics
//! - The tag and built-in function registry
//! - LSP protocol implementation
//! - Configuration management

pub mod config;
pub mod core;
pub mod lsp;
pub mod parser;
pub mod tags;
pub mod validation;

// Re-exports for clean public API
pub use config::Config;
pub use crate::core::{Diagnostic, DiagnosticCode, Position, Range, Severity};
pub use parser::{ExpressionError, check_expression};
pub use tags::TagRegistry;
pub use validation::{ValidationResult, validate, validate_document};
