//! Interpolation pass: every `%...%` span must hold a well-formed expression.

use crate::core::{DiagnosticCode, LineIndex};
use crate::parser::{check_expression, scanner};

use super::ValidationResult;

/// Check every interpolation in `content`. `%%` is a literal percent sign.
pub fn check_interpolations(content: &str, index: &LineIndex<'_>, result: &mut ValidationResult) {
    for interpolation in scanner::interpolations(content) {
        if interpolation.expression.is_empty() {
            continue;
        }

        if let Err(e) = check_expression(interpolation.expression) {
            result.add_error(
                index.range(interpolation.start, interpolation.end),
                DiagnosticCode::ExprSyntaxError,
                format!("Expression syntax error: {}", e),
            );
        }
    }
}
