//! EtchBuilder - Main API for a doxyts run
//!
//! This module provides the builder pattern API that discovers input
//! documents, extracts them in order and renders the requested output.

use crate::config::EtchConfig;
use crate::diagnostics::{EtchError, EtchResult};
use crate::extract::{extract_file, CompoundDoc};
use crate::markdown::MarkdownRenderer;
use doxyts_weld::{DeclarationTree, DtsGenerator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// TypeScript ambient declarations (.d.ts)
    #[default]
    Dts,
    /// Flat Markdown API reference
    Markdown,
    /// Declaration tree as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = EtchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dts" | "d.ts" | "typescript" => Ok(OutputFormat::Dts),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(EtchError::config(format!(
                "unknown output format {:?} (expected dts, markdown or json)",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Dts => "dts",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

/// Result of a run
#[derive(Debug)]
pub struct BuildOutput {
    /// Documents read, in processing order
    pub documents: Vec<PathBuf>,
    /// Overloads in the declaration tree
    pub overload_count: usize,
    /// Rendered output, `None` when no document matched
    pub content: Option<String>,
    /// File the output was written to
    pub output_path: Option<PathBuf>,
}

impl BuildOutput {
    /// Whether any output was produced
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
    }
}

/// Builder for configuring a run
///
/// # Example
///
/// ```no_run
/// use doxyts_etch::{EtchBuilder, OutputFormat};
///
/// EtchBuilder::new("docs/xml")
///     .output("types/api.d.ts")
///     .format(OutputFormat::Dts)
///     .build()
///     .expect("Failed to generate declarations");
/// ```
#[derive(Debug)]
pub struct EtchBuilder {
    /// Directory holding the Doxygen XML files
    pub input_dir: PathBuf,
    /// Output file, if any
    pub output: Option<PathBuf>,
    /// Output format
    pub format: OutputFormat,
    /// Run configuration
    pub config: EtchConfig,
}

impl EtchBuilder {
    /// Create a new builder for an input directory
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output: None,
            format: OutputFormat::default(),
            config: EtchConfig::default(),
        }
    }

    /// Set the output file
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the configuration
    pub fn config(mut self, config: EtchConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the configured root namespace
    pub fn root_namespace(mut self, root: impl Into<String>) -> Self {
        self.config.root_namespace = Some(root.into());
        self
    }

    /// List matching input documents in file-name order
    ///
    /// Symlinked documents are followed and read like regular files.
    pub fn discover(&self) -> EtchResult<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(EtchError::InvalidPath(format!(
                "{} is not a directory",
                self.input_dir.display()
            )));
        }

        let mut documents = Vec::new();
        for entry in WalkDir::new(&self.input_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.config.matches_file(name));
            if matches {
                documents.push(entry.into_path());
            }
        }

        Ok(documents)
    }

    /// Extract every document; the first failure aborts the run
    pub fn extract(&self, documents: &[PathBuf]) -> EtchResult<Vec<CompoundDoc>> {
        let mut compounds = Vec::new();
        for path in documents {
            debug!(file = %path.display(), "parsing document");
            compounds.extend(extract_file(path, &self.config)?);
        }
        Ok(compounds)
    }

    /// Render extracted compounds in the configured format
    pub fn render(&self, compounds: &[CompoundDoc]) -> EtchResult<String> {
        self.render_tree(compounds, &build_tree(compounds))
    }

    /// Render using a tree already built from `compounds`
    fn render_tree(
        &self,
        compounds: &[CompoundDoc],
        tree: &DeclarationTree,
    ) -> EtchResult<String> {
        match self.format {
            OutputFormat::Dts => Ok(DtsGenerator::new(tree)
                .with_root_namespace(self.config.root_namespace.clone())
                .with_indent(self.config.indent)
                .generate()),
            OutputFormat::Markdown => Ok(MarkdownRenderer::new().render(compounds)),
            OutputFormat::Json => Ok(tree.to_json()?),
        }
    }

    /// Run the whole pipeline
    pub fn build(self) -> EtchResult<BuildOutput> {
        self.config.validate()?;

        let documents = self.discover()?;
        if documents.is_empty() {
            warn!(
                dir = %self.input_dir.display(),
                prefix = %self.config.file_prefix,
                "no matching documents found"
            );
            return Ok(BuildOutput {
                documents,
                overload_count: 0,
                content: None,
                output_path: None,
            });
        }

        let compounds = self.extract(&documents)?;
        let tree = build_tree(&compounds);
        let overload_count = tree.overload_count();
        let content = self.render_tree(&compounds, &tree)?;

        let output_path = match self.output {
            Some(ref path) => {
                write_output(path, &content)?;
                Some(path.clone())
            }
            None => None,
        };

        info!(
            documents = documents.len(),
            overloads = overload_count,
            format = %self.format,
            "generation complete"
        );

        Ok(BuildOutput {
            documents,
            overload_count,
            content: Some(content),
            output_path,
        })
    }
}

/// Accumulate compounds into a declaration tree, in processing order
pub fn build_tree(compounds: &[CompoundDoc]) -> DeclarationTree {
    let mut tree = DeclarationTree::new();

    for compound in compounds {
        if compound.is_namespace() {
            tree.note_namespace_summary(compound.namespace(), &compound.summary);
            continue;
        }

        tree.note_class_summary(compound.namespace(), compound.name(), &compound.summary);
        tree.extend(compound.members.iter().cloned());
    }

    tree
}

fn write_output(path: &Path, content: &str) -> EtchResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
