//! Diagnostics
//!
//! Positioned advisory messages produced by validation.

use serde::Serialize;
use std::fmt;

use super::position::Range;

/// Severity of a diagnostic message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => f.write_str("error"),
            Self::Warning => f.write_str("warning"),
            Self::Information => f.write_str("info"),
            Self::Hint => f.write_str("hint"),
        }
    }
}

/// Machine-readable identifier of the check that produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiagnosticCode {
    ExprSyntaxError,
    UnknownTag,
    UnknownAttribute,
    ConditionSyntaxError,
    UnmatchedClosingTag,
    UnclosedTag,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExprSyntaxError => "expr-syntax-error",
            Self::UnknownTag => "unknown-tag",
            Self::UnknownAttribute => "unknown-attribute",
            Self::ConditionSyntaxError => "condition-syntax-error",
            Self::UnmatchedClosingTag => "unmatched-closing-tag",
            Self::UnclosedTag => "unclosed-tag",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagnostic message for a validation issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub message: String,
    pub code: Option<DiagnosticCode>,
}

impl Diagnostic {
    pub fn error(range: Range, code: DiagnosticCode, message: String) -> Self {
        Self {
            range,
            severity: Severity::Error,
            message,
            code: Some(code),
        }
    }

    pub fn warning(range: Range, code: DiagnosticCode, message: String) -> Self {
        Self {
            range,
            severity: Severity::Warning,
            message,
            code: Some(code),
        }
    }
}
