//! doxyts-weld: type mapping and declaration generation for doxyts
//!
//! This crate owns the part of doxyts that decides what a documented C#
//! method looks like in TypeScript. It normalizes source type tokens,
//! groups methods into a namespace / class / overload tree and renders
//! that tree as ambient `.d.ts` declarations.
//!
//! # Architecture
//!
//! - `ir`: type system, symbol records, documentation and declaration tree
//! - `codegen`: TypeScript declaration output
//!
//! # Usage
//!
//! ```rust
//! use doxyts_weld::{DeclarationTree, DtsGenerator, ParamRef, SymbolRecord};
//!
//! let mut tree = DeclarationTree::new();
//! tree.add(
//!     SymbolRecord::new(["Demo", "Widget", "Foo"])
//!         .returns("bool")
//!         .param(ParamRef::parse("x", "int"))
//!         .param(ParamRef::parse("y", "string?").with_default("null")),
//! );
//!
//! let dts = DtsGenerator::new(&tree).generate();
//! assert!(dts.contains("Foo(x: number, y?: string): boolean;"));
//! ```

pub mod codegen;
pub mod ir;

// Re-export commonly used types
pub use codegen::DtsGenerator;
pub use ir::{
    normalize, namespace_key, ClassDecl, DeclarationTree, MapKey, NamespaceDecl, Overload,
    OverloadDocs, ParamDoc, ParamRef, SymbolDocs, SymbolRecord, TsPrimitive, TypeNormalizer,
    TypeRef, NO_NAMESPACE, PRIMITIVES,
};
