//! Configuration: namespace registry and naming options.
//!
//! Everything has a default, so an empty TOML file (or no file at all) gives
//! the standard SPS setup:
//!
//! ```toml
//! [namespaces]
//! xlink = "http://www.w3.org/1999/xlink"
//!
//! [naming]
//! suffix_order = "variant-then-lang"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Namespace bound to the `xml` prefix by the XML specification.
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// XLink namespace used by JATS for `xlink:href`.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Namespace URIs the asset code resolves attributes against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceRegistry {
    /// Namespace of the link attribute (`xlink:href`).
    pub xlink: String,
    /// Namespace of the language attribute (`xml:lang`).
    pub xml: String,
}

impl Default for NamespaceRegistry {
    fn default() -> Self {
        Self {
            xlink: XLINK_NAMESPACE.to_string(),
            xml: XML_NAMESPACE.to_string(),
        }
    }
}

/// Order of the variant (`content-type`) and language suffixes in canonical
/// names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SuffixOrder {
    /// `{pkg}-g{id}-{content-type}-{lang}.{ext}`
    #[default]
    VariantThenLang,
    /// `{pkg}-g{id}-{lang}-{content-type}.{ext}`
    LangThenVariant,
}

/// Options for canonical name generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingOptions {
    pub suffix_order: SuffixOrder,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub namespaces: NamespaceRegistry,
    pub naming: NamingOptions,
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
