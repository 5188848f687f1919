//! Closure pass.
//!
//! Opening and closing `<wr-*>` tags are matched with a stack in source
//! order. Openers come from their own scan, so a tag missing its `>` still
//! counts. Optional-close tags and self-closing openers never take part. A
//! closing tag that does not match the stack top is reported and leaves the
//! stack as it was; the stack is never searched below its top.

use crate::core::{DiagnosticCode, LineIndex};
use crate::parser::{ClosingTag, Opener, scanner};
use crate::tags::TagRegistry;

use super::ValidationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagEvent<'a> {
    Open(Opener<'a>),
    Close(ClosingTag<'a>),
}

/// Check that every `<wr-*>` that needs closing is closed in order
pub fn check_closures(
    content: &str,
    index: &LineIndex<'_>,
    registry: &TagRegistry,
    result: &mut ValidationResult,
) {
    let openers = scanner::openers(content)
        .filter(|tag| !tag.is_self_closing && !registry.is_optional_close(tag.name));
    let closers =
        scanner::closing_tags(content).filter(|tag| !registry.is_optional_close(tag.name));

    let mut stack: Vec<Opener<'_>> = Vec::new();

    for event in in_source_order(openers, closers) {
        match event {
            TagEvent::Open(tag) => stack.push(tag),
            TagEvent::Close(tag) => {
                if stack.last().is_some_and(|top| top.name == tag.name) {
                    stack.pop();
                } else {
                    result.add_error(
                        index.range(tag.start, tag.end),
                        DiagnosticCode::UnmatchedClosingTag,
                        format!("Closing tag '{}' without matching opening tag", tag.name),
                    );
                }
            }
        }
    }

    // Outermost first
    for tag in stack {
        result.add_error(
            index.range(tag.start, tag.name_end()),
            DiagnosticCode::UnclosedTag,
            format!("Unclosed tag '{}'", tag.name),
        );
    }
}

/// Merge the two left-to-right sweeps by source offset
fn in_source_order<'a>(
    openers: impl Iterator<Item = Opener<'a>>,
    closers: impl Iterator<Item = ClosingTag<'a>>,
) -> impl Iterator<Item = TagEvent<'a>> {
    let mut openers = openers.peekable();
    let mut closers = closers.peekable();

    std::iter::from_fn(move || {
        let take_open = match (openers.peek(), closers.peek()) {
            (Some(open), Some(close)) => open.start < close.start,
            (Some(_), None) => true,
            (None, _) => false,
        };

        if take_open {
            openers.next().map(TagEvent::Open)
        } else {
            closers.next().map(TagEvent::Close)
        }
    })
}
