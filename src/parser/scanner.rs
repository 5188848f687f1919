//! Lexical Scans
//!
//! Regex sweeps over the whole document text. The scans know nothing about
//! nesting, quoting, or comments; every pass that needs a shape re-scans the
//! full text for it. All offsets are byte offsets into the scanned text.

use regex::Regex;
use std::sync::LazyLock;

static INTERPOLATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([^%]*)%").expect("interpolation pattern"));
static OPENING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<wr-(\w+)([^>]*)>").expect("opening tag pattern"));
static OPENER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<wr-(\w+)(?:\s|>|/)").expect("opener pattern"));
static CLOSING_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"</wr-(\w+)>").expect("closing tag pattern"));
static ATTRIBUTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)="([^"]*)""#).expect("attribute pattern"));

/// A `%expression%` span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interpolation<'a> {
    /// Text between the delimiters
    pub expression: &'a str,
    /// Offset of the opening `%`
    pub start: usize,
    /// Offset just past the closing `%`
    pub end: usize,
}

/// An opening `<wr-name ...>` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningTag<'a> {
    /// Full tag name including the `wr-` prefix
    pub name: &'a str,
    /// Raw text between the name and `>`
    pub attributes: &'a str,
    pub attributes_start: usize,
    /// Offset of `<`
    pub start: usize,
    /// Offset just past `>`
    pub end: usize,
}

impl OpeningTag<'_> {
    /// Offset just past the tag name
    pub fn name_end(&self) -> usize {
        self.start + 1 + self.name.len()
    }

    /// `<wr-name .../>`
    pub fn is_self_closing(&self) -> bool {
        self.attributes.trim_end().ends_with('/')
    }
}

/// The start of an opening tag as seen by tag balancing: `<wr-name` followed
/// by whitespace, `>` or `/`. The rest of the tag need not be terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opener<'a> {
    /// Full tag name including the `wr-` prefix
    pub name: &'a str,
    /// Offset of `<`
    pub start: usize,
    /// The next `>` after the name closes the tag as `/>`
    pub is_self_closing: bool,
}

impl Opener<'_> {
    /// Offset just past the tag name
    pub fn name_end(&self) -> usize {
        self.start + 1 + self.name.len()
    }
}

/// A closing `</wr-name>` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosingTag<'a> {
    /// Full tag name including the `wr-` prefix
    pub name: &'a str,
    pub start: usize,
    pub end: usize,
}

/// A `name="value"` attribute pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub name_start: usize,
    pub value_start: usize,
}

impl Attribute<'_> {
    pub fn name_end(&self) -> usize {
        self.name_start + self.name.len()
    }

    pub fn value_end(&self) -> usize {
        self.value_start + self.value.len()
    }
}

/// All `%...%` spans, left to right
pub fn interpolations(text: &str) -> impl Iterator<Item = Interpolation<'_>> {
    INTERPOLATION_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        Some(Interpolation {
            expression: caps.get(1)?.as_str(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// All opening `<wr-*>` tags, left to right
pub fn opening_tags(text: &str) -> impl Iterator<Item = OpeningTag<'_>> {
    OPENING_TAG_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let attributes = caps.get(2)?;
        // "<" + "wr-" + suffix
        let name = &text[whole.start() + 1..caps.get(1)?.end()];
        Some(OpeningTag {
            name,
            attributes: attributes.as_str(),
            attributes_start: attributes.start(),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// All tag openers, left to right. Unlike [`opening_tags`] an opener never
/// runs on into a later tag, and one missing its `>` is still found.
pub fn openers(text: &str) -> impl Iterator<Item = Opener<'_>> {
    OPENER_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name_end = caps.get(1)?.end();
        let is_self_closing = text[name_end..]
            .split_once('>')
            .is_some_and(|(inside, _)| inside.trim_end().ends_with('/'));
        Some(Opener {
            name: &text[whole.start() + 1..name_end],
            start: whole.start(),
            is_self_closing,
        })
    })
}

/// All closing `</wr-*>` tags, left to right
pub fn closing_tags(text: &str) -> impl Iterator<Item = ClosingTag<'_>> {
    CLOSING_TAG_RE.captures_iter(text).filter_map(|caps| {
        let whole = caps.get(0)?;
        let name = &text[whole.start() + 2..caps.get(1)?.end()];
        Some(ClosingTag {
            name,
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// `name="value"` pairs in the attribute text of `tag`, with document offsets
pub fn attributes<'a>(
    tag: &OpeningTag<'a>,
) -> impl Iterator<Item = Attribute<'a>> + use<'a> {
    let base = tag.attributes_start;
    ATTRIBUTE_RE
        .captures_iter(tag.attributes)
        .filter_map(move |caps| {
            let name = caps.get(1)?;
            let value = caps.get(2)?;
            Some(Attribute {
                name: name.as_str(),
                value: value.as_str(),
                name_start: base + name.start(),
                value_start: base + value.start(),
            })
        })
}
