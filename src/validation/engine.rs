//! Validation Engine
//!
//! Runs the three independent passes over one document and collects their
//! diagnostics in pass order: interpolations, tags and attributes, closures.

use crate::core::{Diagnostic, DiagnosticCode, LineIndex, Range, Severity};
use crate::tags::TagRegistry;

use super::{closure, expressions, tags};

/// Result of validating a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationResult {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, range: Range, code: DiagnosticCode, message: String) {
        self.diagnostics.push(Diagnostic::error(range, code, message));
    }

    pub fn add_warning(&mut self, range: Range, code: DiagnosticCode, message: String) {
        self.diagnostics
            .push(Diagnostic::warning(range, code, message));
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Diagnostics carrying `code`, in production order
    pub fn with_code(&self, code: DiagnosticCode) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.code == Some(code))
    }
}

/// Validate an entire document
pub fn validate_document(content: &str, registry: &TagRegistry) -> ValidationResult {
    let index = LineIndex::new(content);
    let mut result = ValidationResult::new();

    expressions::check_interpolations(content, &index, &mut result);
    tags::check_tags(content, &index, registry, &mut result);
    closure::check_closures(content, &index, registry, &mut result);

    log::debug!(
        "Validated {} bytes: {} diagnostics",
        content.len(),
        result.diagnostics.len()
    );
    result
}

/// Diagnostics for `content`, in pass order
pub fn validate(content: &str, registry: &TagRegistry) -> Vec<Diagnostic> {
    validate_document(content, registry).diagnostics
}
