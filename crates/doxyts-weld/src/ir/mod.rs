//! Intermediate Representation (IR) for doxyts
//!
//! This module provides the type system, symbol records and the
//! declaration tree that the extractor feeds and the generators read.

pub mod docs;
pub mod symbol;
pub mod tree;
pub mod types;

pub use docs::*;
pub use symbol::*;
pub use tree::*;
pub use types::*;
