//! Documentation attached to a single overload
//!
//! Resolves the raw [`SymbolDocs`] of a record into the summary, parameter
//! and return lines an overload carries into the declaration output.

use crate::ir::{ParamDoc, ParamRef, SymbolDocs};
use serde::{Deserialize, Serialize};

/// Resolved documentation for one overload
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OverloadDocs {
    /// Summary text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Parameter lines, in parameter order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<ParamDoc>,
    /// Return description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returns: Option<String>,
}

impl OverloadDocs {
    /// Bind raw documentation onto the given parameter list
    ///
    /// - the summary is the brief description, falling back to the detailed one
    /// - a parameter gets a line only when a documentation entry carries its
    ///   exact name and non-empty text
    /// - only the first return entry is used
    pub fn attach(raw: &SymbolDocs, params: &[ParamRef]) -> Self {
        let summary = non_empty(&raw.brief).or_else(|| non_empty(&raw.detailed));

        let params = params
            .iter()
            .filter_map(|param| {
                raw.params
                    .iter()
                    .find(|doc| doc.name == param.name && !doc.text.trim().is_empty())
                    .cloned()
            })
            .collect();

        let returns = raw.returns.first().and_then(|text| non_empty(text));

        Self {
            summary,
            params,
            returns,
        }
    }

    /// Check if there is nothing to put in a comment block
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.params.is_empty() && self.returns.is_none()
    }
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}
