//! Tag Schema Types
//!
//! Definitions for template tags and built-in functions, plus the TOML shape
//! of a registry overlay file.

use serde::Deserialize;

/// Root of a registry overlay file (matches TOML)
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RegistryFile {
    #[serde(default)]
    pub tags: Vec<TagDef>,
    #[serde(default)]
    pub functions: Vec<FunctionDef>,
}

/// Template tag definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TagDef {
    /// Full tag name including the `wr-` prefix
    pub name: String,
    /// Attribute names accepted on the opening tag
    #[serde(default)]
    pub attributes: Vec<String>,
    /// Closing tag may be omitted without unbalancing the document
    #[serde(default)]
    pub optional_close: bool,
    pub description: Option<String>,
    /// Short usage example shown on hover
    pub usage: Option<String>,
}

/// Built-in function definition
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub description: Option<String>,
}

impl TagDef {
    pub fn allows_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| attr == name)
    }

    /// Hover text in markdown
    pub fn hover_text(&self) -> String {
        let description = self.description.as_deref().unwrap_or("WebRelease tag");
        match &self.usage {
            Some(usage) => format!("**{}**\n\n{}\n\n`{}`", self.name, description, usage),
            None => format!("**{}**\n\n{}", self.name, description),
        }
    }
}

impl FunctionDef {
    pub fn hover_text(&self) -> String {
        let description = self.description.as_deref().unwrap_or("Built-in function");
        format!("**{}()**\n\n{}", self.name, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overlay_file() {
        let toml_str = r#"
[[tags]]
name = "wr-include"
attributes = ["src"]
description = "Include another template"

[[tags]]
name = "wr-slot"
optional_close = true

[[functions]]
name = "escapeHtml"
description = "Escape HTML special characters"
"#;
        let file: RegistryFile = toml::from_str(toml_str).unwrap();
        assert_eq!(file.tags.len(), 2);
        assert_eq!(file.tags[0].attributes, vec!["src".to_string()]);
        assert!(!file.tags[0].optional_close);
        assert!(file.tags[1].optional_close);
        assert!(file.tags[1].attributes.is_empty());
        assert_eq!(file.functions[0].name, "escapeHtml");
    }

    #[test]
    fn test_hover_text_includes_usage() {
        let tag = TagDef {
            name: "wr-if".to_string(),
            attributes: vec!["condition".to_string()],
            optional_close: false,
            description: Some("Conditional rendering".to_string()),
            usage: Some("<wr-if condition=\"expr\">...</wr-if>".to_string()),
        };
        let text = tag.hover_text();
        assert!(text.starts_with("**wr-if**"));
        assert!(text.contains("Conditional rendering"));
        assert!(text.contains("`<wr-if condition=\"expr\">...</wr-if>`"));
        assert!(tag.allows_attribute("condition"));
        assert!(!tag.allows_attribute("value"));
    }
}
