//! Position Resolution
//!
//! Maps byte offsets in a document to zero-based (line, character) pairs.
//! Characters are counted in Unicode code points.

use serde::Serialize;

/// A zero-based position in a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// A half-open range between two positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "range end precedes start");
        Self { start, end }
    }
}

/// Resolve a byte offset to a position by scanning from the start of `text`.
///
/// Offsets past the end of the text clamp to the end.
pub fn position_at(text: &str, offset: usize) -> Position {
    let mut line = 0;
    let mut character = 0;

    for (idx, ch) in text.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            character = 0;
        } else {
            character += 1;
        }
    }

    Position { line, character }
}

/// Precomputed line starts for repeated lookups on the same text.
///
/// Produces the same answers as [`position_at`] without rescanning the whole
/// document for every offset.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(idx, _)| idx + 1),
        );

        Self { text, line_starts }
    }

    /// Position of the given byte offset
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.text.len());
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        let line_start = self.line_starts[line];

        let character = self.text[line_start..]
            .char_indices()
            .take_while(|&(idx, _)| line_start + idx < offset)
            .count();

        Position { line, character }
    }

    /// Range covering `start..end` byte offsets
    pub fn range(&self, start: usize, end: usize) -> Range {
        Range::new(self.position(start), self.position(end))
    }
}
