//! # structgen
//!
//! Compile JSON Schema and OpenAPI definitions into struct type definitions.
//!
//! structgen walks one or more JSON Schema documents, resolves `$ref`
//! pointers within and across them, and produces a flat, deduplicated set of
//! structs ready for a code generator to render (for example Kubernetes
//! custom resource types).
//!
//! ## Features
//!
//! - **Cross-document references** - `other#/definitions/x` resolves against the
//!   document whose `$id` is `other`
//! - **Identity-based dedup** - a definition reached from many places yields one struct
//! - **Deterministic naming** - titles and property keys become exported identifiers
//! - **Recursive types** - self-referencing objects become pointer types
//!
//! ## Quick Start
//!
//! ```
//! use structgen::prelude::*;
//!
//! let doc = parse_document("", r##"{
//!     "title": "Pet",
//!     "type": "object",
//!     "properties": {
//!         "name": { "type": "string" },
//!         "owner": { "$ref": "#/definitions/person" }
//!     },
//!     "required": ["name"],
//!     "definitions": {
//!         "person": { "type": "object", "properties": { "age": { "type": "integer" } } }
//!     }
//! }"##)?;
//!
//! let structs = Compiler::new().compile(&[doc])?;
//! assert_eq!(structs["Pet"].fields["Owner"].ty.to_string(), "*Person");
//! assert_eq!(structs["Person"].fields["Age"].ty.to_string(), "int");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Schema node model, JSON loading, document initialization
//! - [`transpiler`] - Reference resolution, type synthesis, struct registry

pub mod prelude;

/// Schema node model and document loading.
pub mod schema {
    pub use structgen_schema::*;
}

/// Schema-to-struct compilation.
pub mod transpiler {
    pub use structgen_transpiler::*;
}

// Re-export commonly used items at the crate root
pub use structgen_schema::{Document, ParseError, Schema, parse_document, parse_document_file};
pub use structgen_transpiler::{
    CollisionPolicy, CompileOptions, Compiler, Field, Struct, StructMap, TranspileError, TypeDesc,
    compile, compile_files, compile_json,
};
