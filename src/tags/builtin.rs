//! Built-in tags and functions of the WebRelease template language.

use super::schema::{FunctionDef, TagDef};

/// (name, attributes, optional close, description, usage)
type TagRow = (
    &'static str,
    &'static [&'static str],
    bool,
    &'static str,
    Option<&'static str>,
);

const TAGS: &[TagRow] = &[
    (
        "wr-if",
        &["condition"],
        false,
        "Conditional rendering. Use with wr-then and wr-else.",
        Some(r#"<wr-if condition="expr">...</wr-if>"#),
    ),
    ("wr-then", &[], true, "Content to render when the wr-if condition is true.", None),
    ("wr-else", &[], true, "Content to render when the wr-if condition is false.", None),
    (
        "wr-switch",
        &["value"],
        false,
        "Switch statement for multiple conditions.",
        Some(r#"<wr-switch value="expr">...</wr-switch>"#),
    ),
    (
        "wr-case",
        &["value"],
        true,
        "Case within a wr-switch block.",
        Some(r#"<wr-case value="val">...</wr-case>"#),
    ),
    ("wr-default", &[], true, "Default case within a wr-switch block.", None),
    (
        "wr-for",
        &["list", "string", "times", "variable", "count", "index"],
        false,
        "Loop over a list, a string, or a number of times.",
        Some(r#"<wr-for list="items" variable="item">...</wr-for>"#),
    ),
    ("wr-break", &["condition"], false, "Break out of a loop.", None),
    (
        "wr-variable",
        &["name", "value"],
        false,
        "Define a variable.",
        Some(r#"<wr-variable name="var" value="expr"/>"#),
    ),
    ("wr-append", &["name", "value"], false, "Append a value to a variable.", None),
    ("wr-clear", &["name"], false, "Clear a variable.", None),
    ("wr-return", &["value"], false, "Return a value.", None),
    (
        "wr-error",
        &["condition", "message"],
        false,
        "Raise an error.",
        Some(r#"<wr-error condition="expr" message="msg"/>"#),
    ),
    ("wr-conditional", &["condition"], false, "Conditional block.", None),
    ("wr-cond", &["condition"], false, "Condition within wr-conditional.", None),
    ("wr-comment", &[], false, "Comment block (not rendered).", None),
];

const FUNCTIONS: &[(&str, &str)] = &[
    ("pageTitle", "Get the page title"),
    ("currentTime", "Get the current time as a timestamp"),
    ("formatDate", "Format a date: formatDate(time, format)"),
    ("isNull", "Check if a value is null"),
    ("isNotNull", "Check if a value is not null"),
    ("isNumber", "Check if a value is a number"),
    ("number", "Convert a value to a number"),
    ("string", "Convert a value to a string"),
    ("length", "Get the length of a string or array"),
    ("substring", "Get a substring: substring(str, start, end)"),
    ("indexOf", "Find the index of a substring"),
    ("contains", "Check if a string contains a substring"),
    ("startsWith", "Check if a string starts with another"),
    ("endsWith", "Check if a string ends with another"),
    ("toUpperCase", "Convert to uppercase"),
    ("toLowerCase", "Convert to lowercase"),
    ("trim", "Trim surrounding whitespace"),
    ("replace", "Replace text: replace(str, from, to)"),
    ("split", "Split a string: split(str, delimiter)"),
    ("join", "Join an array: join(array, delimiter)"),
    ("round", "Round a number"),
    ("floor", "Round a number down"),
    ("ceil", "Round a number up"),
    ("abs", "Absolute value"),
    ("min", "Minimum value: min(a, b)"),
    ("max", "Maximum value: max(a, b)"),
    ("divide", "Divide numbers: divide(a, b, scale, mode)"),
    ("setScale", "Set decimal places: setScale(num, scale)"),
];

pub(super) fn tags() -> impl Iterator<Item = TagDef> {
    TAGS.iter()
        .map(|&(name, attributes, optional_close, description, usage)| TagDef {
            name: name.to_string(),
            attributes: attributes.iter().map(|a| a.to_string()).collect(),
            optional_close,
            description: Some(description.to_string()),
            usage: usage.map(str::to_string),
        })
}

pub(super) fn functions() -> impl Iterator<Item = FunctionDef> {
    FUNCTIONS.iter().map(|&(name, description)| FunctionDef {
        name: name.to_string(),
        description: Some(description.to_string()),
    })
}
