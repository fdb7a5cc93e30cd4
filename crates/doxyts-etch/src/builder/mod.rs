//! Builder API for doxyts runs

pub mod etch_builder;

pub use etch_builder::{build_tree, BuildOutput, EtchBuilder, OutputFormat};
