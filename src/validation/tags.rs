//! Tag and attribute pass.
//!
//! Every opening `<wr-*>` tag must name a registered tag, its attributes must
//! be allowed for that tag, and a non-empty `condition` must be a
//! well-formed expression.

use crate::core::{DiagnosticCode, LineIndex};
use crate::parser::{OpeningTag, check_expression, scanner};
use crate::tags::{TagDef, TagRegistry};

use super::ValidationResult;

/// Check every opening tag in `content`
pub fn check_tags(
    content: &str,
    index: &LineIndex<'_>,
    registry: &TagRegistry,
    result: &mut ValidationResult,
) {
    for tag in scanner::opening_tags(content) {
        match registry.get_tag(tag.name) {
            Some(def) => check_attributes(&tag, def, index, result),
            None => result.add_error(
                index.range(tag.start, tag.name_end()),
                DiagnosticCode::UnknownTag,
                format!("Unknown tag: {}", tag.name),
            ),
        }
    }
}

fn check_attributes(
    tag: &OpeningTag<'_>,
    def: &TagDef,
    index: &LineIndex<'_>,
    result: &mut ValidationResult,
) {
    for attr in scanner::attributes(tag) {
        if !def.allows_attribute(attr.name) {
            result.add_warning(
                index.range(attr.name_start, attr.name_end()),
                DiagnosticCode::UnknownAttribute,
                format!("Unknown attribute '{}' for tag '{}'", attr.name, tag.name),
            );
        }

        if attr.name == "condition"
            && !attr.value.is_empty()
            && let Err(e) = check_expression(attr.value)
        {
            result.add_error(
                index.range(attr.value_start, attr.value_end()),
                DiagnosticCode::ConditionSyntaxError,
                format!("Condition syntax error: {}", e),
            );
        }
    }
}
