//! Tag Registry
//!
//! Immutable lookup tables for tags, their attributes, and built-in functions.
//! Built once at startup, then shared by reference.

use anyhow::{Context, Result, bail};
use std::collections::BTreeMap;
use std::path::Path;

use super::builtin;
use super::schema::{FunctionDef, RegistryFile, TagDef};
use crate::Config;

/// Tag and function registry
#[derive(Debug, Clone)]
pub struct TagRegistry {
    tags: BTreeMap<String, TagDef>,
    functions: BTreeMap<String, FunctionDef>,
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TagRegistry {
    /// Registry with no tags or functions
    pub fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
            functions: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in tags and functions
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for tag in builtin::tags() {
            registry.tags.insert(tag.name.clone(), tag);
        }
        for function in builtin::functions() {
            registry.functions.insert(function.name.clone(), function);
        }
        registry
    }

    /// Built-in registry merged with the overlays named in `config`.
    ///
    /// A broken per-user overlay is logged and skipped. An overlay given
    /// explicitly on the command line must load.
    pub fn from_config(config: &Config) -> Result<Self> {
        let mut registry = Self::builtin();

        if let Some(path) = &config.user_registry
            && path.is_file()
            && let Err(e) = registry.load_overlay(path)
        {
            log::warn!("Ignoring user registry {}: {:#}", path.display(), e);
        }

        if let Some(path) = &config.registry_file {
            registry.load_overlay(path)?;
        }

        Ok(registry)
    }

    /// Merge a TOML overlay file into the registry
    pub fn load_overlay(&mut self, path: &Path) -> Result<()> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registry file {}", path.display()))?;
        let file: RegistryFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse registry file {}", path.display()))?;

        self.merge(file)
            .with_context(|| format!("Invalid registry file {}", path.display()))?;
        log::info!("Loaded tag registry overlay: {}", path.display());
        Ok(())
    }

    /// Merge overlay definitions; entries replace built-ins of the same name
    pub fn merge(&mut self, file: RegistryFile) -> Result<()> {
        for tag in &file.tags {
            validate_tag_name(&tag.name)?;
        }
        for function in &file.functions {
            if function.name.is_empty()
                || !function.name.chars().all(|c| c.is_alphanumeric() || c == '_')
            {
                bail!("Invalid function name '{}'", function.name);
            }
        }

        for tag in file.tags {
            self.tags.insert(tag.name.clone(), tag);
        }
        for function in file.functions {
            self.functions.insert(function.name.clone(), function);
        }
        Ok(())
    }

    pub fn get_tag(&self, name: &str) -> Option<&TagDef> {
        self.tags.get(name)
    }

    pub fn is_known_tag(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    /// Whether the closing tag of `name` may be omitted
    pub fn is_optional_close(&self, name: &str) -> bool {
        self.tags.get(name).is_some_and(|tag| tag.optional_close)
    }

    pub fn get_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.get(name)
    }

    /// All tags, sorted by name
    pub fn tags(&self) -> impl Iterator<Item = &TagDef> {
        self.tags.values()
    }

    /// All built-in functions, sorted by name
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDef> {
        self.functions.values()
    }
}

/// Tag names must survive the `<wr-(\w+)` scan to be usable
fn validate_tag_name(name: &str) -> Result<()> {
    let Some(suffix) = name.strip_prefix("wr-") else {
        bail!("Tag name '{}' must start with 'wr-'", name);
    };
    if suffix.is_empty() || !suffix.chars().all(|c| c.is_alphanumeric() || c == '_') {
        bail!("Tag name '{}' contains invalid characters", name);
    }
    Ok(())
}
