//! doxyts-etch: Doxygen extraction and output for doxyts
//!
//! This crate reads a Doxygen XML export and drives doxyts-weld to produce
//! TypeScript declarations:
//! - Discovering `class*.xml` documents in file-name order
//! - Extracting public function members into symbol records
//! - Accumulating records into a declaration tree across documents
//! - Rendering `.d.ts`, a Markdown API reference, or JSON
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ class*.xml      │
//! │ (roxmltree)     │
//! └────────┬────────┘
//!          ▼
//!   ┌──────────────┐     ┌──────────────┐
//!   │ CompoundDoc  │────▶│   Markdown   │
//!   └──────┬───────┘     └──────────────┘
//!          ▼
//!   ┌─────────────────┐
//!   │ DeclarationTree │
//!   └──────┬──────────┘
//!          │
//!     ┌────┴─────┐
//!     ▼          ▼
//! ┌────────┐ ┌────────┐
//! │  .d.ts │ │  JSON  │
//! └────────┘ └────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use doxyts_etch::{EtchBuilder, EtchConfig};
//!
//! let config = EtchConfig::from_file("doxyts.toml").expect("bad config");
//! EtchBuilder::new("docs/xml")
//!     .config(config)
//!     .output("types/api.d.ts")
//!     .build()
//!     .expect("Failed to generate declarations");
//! ```

pub mod builder;
pub mod config;
pub mod diagnostics;
pub mod extract;
pub mod markdown;
pub mod xml;

// Re-exports for convenience
pub use builder::{build_tree, BuildOutput, EtchBuilder, OutputFormat};
pub use config::EtchConfig;
pub use diagnostics::{EtchError, EtchResult};
pub use extract::{extract_file, extract_str, CompoundDoc};
pub use markdown::MarkdownRenderer;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
