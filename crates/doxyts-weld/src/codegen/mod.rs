//! Code generation for doxyts
//!
//! This module provides generators for:
//! - TypeScript ambient declaration files (.d.ts)

pub mod dts;

pub use dts::DtsGenerator;
