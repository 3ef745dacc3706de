//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use structgen::prelude::*;
//! ```

// Schema types
pub use structgen_schema::{
    AdditionalProperties, Document, JsonPointer, ParseError, Schema, TypeValue, parse_document,
    parse_document_file,
};

// Compilation
pub use structgen_transpiler::{
    CollisionPolicy, CompileOptions, Compiler, TranspileError, compile, compile_files,
    compile_json,
};

// Output model
pub use structgen_transpiler::{Field, Primitive, Struct, StructMap, TypeDesc};
