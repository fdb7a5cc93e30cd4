//! Symbol extraction from Doxygen XML documents
//!
//! Each `class*.xml` file holds one `compounddef`. Its public function
//! members become [`SymbolRecord`]s; absent sub-elements degrade to empty
//! values, while a document that does not parse or has no compound
//! declaration is a [`EtchError::Schema`] error.

use crate::config::EtchConfig;
use crate::diagnostics::{EtchError, EtchResult};
use crate::xml::{child, child_text, children, description_text, inline_text};
use doxyts_weld::{ParamDoc, ParamRef, SymbolDocs, SymbolRecord, TypeNormalizer};
use roxmltree::{Document, Node};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One documented compound and its extracted members
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundDoc {
    /// Source document
    pub file: PathBuf,
    /// Compound kind (`class`, `struct`, `interface`, `namespace`, ...)
    pub kind: String,
    /// Qualified name segments
    pub qualified_name: Vec<String>,
    /// Brief description, falling back to the detailed one
    pub summary: String,
    /// Public function members in document order
    pub members: Vec<SymbolRecord>,
}

impl CompoundDoc {
    /// Whether this compound documents a namespace rather than a type
    pub fn is_namespace(&self) -> bool {
        self.kind == "namespace"
    }

    /// Simple name of the compound
    pub fn name(&self) -> &str {
        self.qualified_name.last().map(String::as_str).unwrap_or("")
    }

    /// Namespace segments enclosing the compound
    pub fn namespace(&self) -> &[String] {
        if self.is_namespace() {
            &self.qualified_name
        } else {
            &self.qualified_name[..self.qualified_name.len().saturating_sub(1)]
        }
    }
}

/// Extract all compounds from a document on disk
pub fn extract_file(path: &Path, config: &EtchConfig) -> EtchResult<Vec<CompoundDoc>> {
    let text = std::fs::read_to_string(path)?;
    extract_str(&text, path, config)
}

/// Extract all compounds from document text
pub fn extract_str(text: &str, file: &Path, config: &EtchConfig) -> EtchResult<Vec<CompoundDoc>> {
    let doc = Document::parse(text).map_err(|e| EtchError::schema(file, e.to_string()))?;
    let normalizer = config.normalizer();

    let root = doc.root_element();
    let compounds: Vec<Node> = if root.has_tag_name("compounddef") {
        vec![root]
    } else {
        children(root, "compounddef").collect()
    };

    if compounds.is_empty() {
        return Err(EtchError::schema(file, "no compounddef element"));
    }

    compounds
        .into_iter()
        .map(|compound| extract_compound(compound, file, config, &normalizer))
        .collect()
}

fn extract_compound(
    compound: Node<'_, '_>,
    file: &Path,
    config: &EtchConfig,
    normalizer: &TypeNormalizer<'_>,
) -> EtchResult<CompoundDoc> {
    let compound_name = child_text(compound, "compoundname");
    if compound_name.is_empty() {
        return Err(EtchError::schema(file, "compounddef has no compoundname"));
    }

    let kind = compound.attribute("kind").unwrap_or("class").to_string();
    let qualified_name = split_qualified_name(&compound_name);
    let summary = summary_text(compound);

    let mut members = Vec::new();
    if kind != "namespace" {
        for section in children(compound, "sectiondef") {
            if !config.includes_section(section.attribute("kind").unwrap_or("")) {
                continue;
            }
            for member in children(section, "memberdef") {
                if member.attribute("kind") != Some("function") {
                    continue;
                }
                if let Some(record) = extract_member(member, &qualified_name, normalizer) {
                    members.push(record);
                }
            }
        }
    }

    debug!(
        file = %file.display(),
        compound = %compound_name,
        members = members.len(),
        "extracted compound"
    );

    Ok(CompoundDoc {
        file: file.to_path_buf(),
        kind,
        qualified_name,
        summary,
        members,
    })
}

fn extract_member(
    member: Node<'_, '_>,
    compound: &[String],
    normalizer: &TypeNormalizer<'_>,
) -> Option<SymbolRecord> {
    let name = child_text(member, "name");
    if name.is_empty() {
        debug!("skipping function member without a name");
        return None;
    }

    let return_token = child_text(member, "type");
    let params: Vec<ParamRef> = children(member, "param")
        .enumerate()
        .filter_map(|(index, param)| extract_param(param, index, normalizer))
        .collect();

    let qualified_name = compound.iter().cloned().chain(std::iter::once(name));

    Some(
        SymbolRecord::new(qualified_name)
            .returns_with(&return_token, normalizer)
            .with_params(params)
            .with_docs(extract_docs(member)),
    )
}

fn extract_param(
    param: Node<'_, '_>,
    index: usize,
    normalizer: &TypeNormalizer<'_>,
) -> Option<ParamRef> {
    let source_type = child_text(param, "type");
    let declname = child_text(param, "declname");

    // C-style `(void)` parameter lists
    if declname.is_empty() && source_type == "void" {
        return None;
    }

    let name = if declname.is_empty() {
        format!("arg{}", index)
    } else {
        declname
    };

    let default = child_text(param, "defval");
    let param = ParamRef::parse_with(name, &source_type, normalizer);
    Some(if default.is_empty() {
        param
    } else {
        param.with_default(default)
    })
}

fn extract_docs(member: Node<'_, '_>) -> SymbolDocs {
    let mut docs = SymbolDocs::new();

    if let Some(brief) = child(member, "briefdescription") {
        docs.brief = description_text(brief);
    }

    let Some(detailed) = child(member, "detaileddescription") else {
        return docs;
    };
    docs.detailed = description_text(detailed);

    for list in detailed.descendants().filter(|n| n.has_tag_name("parameterlist")) {
        if list.attribute("kind") != Some("param") {
            continue;
        }
        for item in children(list, "parameteritem") {
            let text = child(item, "parameterdescription")
                .map(description_text)
                .unwrap_or_default();
            let names = item
                .descendants()
                .filter(|n| n.has_tag_name("parametername"))
                .map(inline_text)
                .filter(|n| !n.is_empty());
            for name in names {
                docs.params.push(ParamDoc::new(name, text.clone()));
            }
        }
    }

    docs.returns = detailed
        .descendants()
        .filter(|n| n.has_tag_name("simplesect") && n.attribute("kind") == Some("return"))
        .map(description_text)
        .collect();

    docs
}

/// Brief description of a compound, else its detailed description
fn summary_text(compound: Node<'_, '_>) -> String {
    let brief = child(compound, "briefdescription")
        .map(description_text)
        .unwrap_or_default();
    if !brief.is_empty() {
        return brief;
    }
    child(compound, "detaileddescription")
        .map(description_text)
        .unwrap_or_default()
}

/// Split `Acme::Ui::Widget` (or `Acme.Ui.Widget`) into segments
fn split_qualified_name(name: &str) -> Vec<String> {
    name.split("::")
        .flat_map(|segment| segment.split('.'))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
