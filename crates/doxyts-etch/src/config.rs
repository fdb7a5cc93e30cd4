//! Run configuration
//!
//! Loaded from an optional TOML file:
//!
//! ```toml
//! file_prefix = "class"
//! sections = ["public-func"]
//! root_namespace = "wkit"
//! indent = 2
//!
//! [type_overrides]
//! ScriptObject = "any"
//! ScriptFunctionWrapper = "any"
//! ```
//!
//! Every key is optional. Without a `[type_overrides]` table the script
//! host handle types `ScriptObject` and `ScriptFunctionWrapper` map to
//! `any`; a table given in the file replaces that default entirely.

use crate::diagnostics::{EtchError, EtchResult};
use doxyts_weld::TypeNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Type overrides applied when the configuration does not name any
pub const DEFAULT_TYPE_OVERRIDES: &[(&str, &str)] =
    &[("ScriptObject", "any"), ("ScriptFunctionWrapper", "any")];

/// Configuration for a doxyts run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtchConfig {
    /// Only `.xml` files whose name starts with this prefix are read
    pub file_prefix: String,
    /// `sectiondef` kinds whose members are extracted
    pub sections: Vec<String>,
    /// Namespace wrapping all emitted declarations
    pub root_namespace: Option<String>,
    /// Spaces per indentation level in declaration output
    pub indent: usize,
    /// Source type name -> TypeScript type name
    pub type_overrides: BTreeMap<String, String>,
}

impl Default for EtchConfig {
    fn default() -> Self {
        Self {
            file_prefix: "class".to_string(),
            sections: vec!["public-func".to_string()],
            root_namespace: None,
            indent: 2,
            type_overrides: DEFAULT_TYPE_OVERRIDES
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }
}

impl EtchConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> EtchResult<Self> {
        let config: EtchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_file(path: impl AsRef<Path>) -> EtchResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Check values that deserialize fine but cannot be used
    pub fn validate(&self) -> EtchResult<()> {
        if self.file_prefix.is_empty() {
            return Err(EtchError::config("file_prefix must not be empty"));
        }
        if self.sections.is_empty() {
            return Err(EtchError::config("sections must name at least one sectiondef kind"));
        }
        if let Some(ref root) = self.root_namespace {
            if root.split('.').any(|segment| segment.trim().is_empty()) {
                return Err(EtchError::config(format!(
                    "root_namespace is not a dotted name: {:?}",
                    root
                )));
            }
        }
        Ok(())
    }

    /// Whether a file name selects an input document
    pub fn matches_file(&self, file_name: &str) -> bool {
        let Some((stem, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        ext.eq_ignore_ascii_case("xml") && stem.starts_with(&self.file_prefix)
    }

    /// Whether members of a `sectiondef` kind are extracted
    pub fn includes_section(&self, kind: &str) -> bool {
        self.sections.iter().any(|s| s == kind)
    }

    /// Type normalizer honouring the configured overrides
    pub fn normalizer(&self) -> TypeNormalizer<'_> {
        TypeNormalizer::with_overrides(&self.type_overrides)
    }
}
