//! Markdown rendering of extracted members
//!
//! Produces a flat API reference: every extracted function, constructors
//! included, in document order. Signatures use the source type tokens, not
//! the TypeScript mapping.

use crate::extract::CompoundDoc;
use doxyts_weld::SymbolRecord;

/// Markdown renderer for an API reference page
pub struct MarkdownRenderer {
    /// Page heading
    pub title: String,
    /// Info string of the fenced signature blocks
    pub code_language: String,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self {
            title: "API Reference".to_string(),
            code_language: "csharp".to_string(),
        }
    }
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page heading
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the code block language
    pub fn with_code_language(mut self, language: impl Into<String>) -> Self {
        self.code_language = language.into();
        self
    }

    /// Render all members of the given compounds
    pub fn render(&self, compounds: &[CompoundDoc]) -> String {
        let mut lines = vec![format!("# {}", self.title), String::new()];

        for record in compounds.iter().flat_map(|c| &c.members) {
            let docs = doc_lines(record);
            if !docs.is_empty() {
                lines.extend(docs.iter().map(|line| format!("> {}", line)));
                lines.push(String::new());
            }

            lines.push(format!("```{}", self.code_language));
            lines.push(signature(record));
            lines.push("```".to_string());
            lines.push(String::new());
        }

        lines.join("\n")
    }
}

/// `Name(p: Type = default) → Return`, arrow omitted without a return type
pub fn signature(record: &SymbolRecord) -> String {
    let params: Vec<String> = record
        .params
        .iter()
        .map(|p| {
            let mut token = format!("{}: {}", p.name, p.source_type);
            if let Some(ref default) = p.default {
                token.push_str(&format!(" = {}", default));
            }
            token
        })
        .collect();

    let mut signature = format!("{}({})", record.name(), params.join(", "));
    if !record.return_token.is_empty() {
        signature.push_str(&format!(" → {}", record.return_token));
    }
    signature
}

/// Brief then detailed paragraphs
fn doc_lines(record: &SymbolRecord) -> Vec<&str> {
    [&record.docs.brief, &record.docs.detailed]
        .into_iter()
        .flat_map(|text| text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
