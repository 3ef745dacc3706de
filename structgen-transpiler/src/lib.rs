//! # structgen transpiler
//!
//! Compiles JSON Schema documents into a flat set of struct definitions.
//!
//! This crate provides:
//! - `$ref` resolution within and across documents
//! - Type synthesis from schema nodes to struct/slice/map/primitive types
//! - Deterministic naming of generated types and fields
//! - A registry that deduplicates structs by schema node identity

pub mod compiler;
pub mod error;
pub mod ir;
pub mod kind;
pub mod naming;
pub mod registry;
pub mod resolver;
pub mod synth;

pub use compiler::{CompileOptions, Compiler, DEFAULT_ROOT_NAME};
pub use error::TranspileError;
pub use ir::{Field, Primitive, Struct, StructMap, TypeDesc};
pub use registry::{CollisionPolicy, NodeId};
pub use resolver::Resolver;
pub use synth::Synthesizer;

use std::path::Path;
use structgen_schema::Document;

/// Compiles initialized root documents with default settings.
///
/// # Errors
/// Returns `TranspileError` if resolution or synthesis fails.
pub fn compile(documents: &[Document]) -> Result<StructMap, TranspileError> {
    Compiler::new().compile(documents)
}

/// Parses and compiles JSON Schema sources.
///
/// # Arguments
/// * `sources` - `(source name, JSON content)` pairs; the source name is the
///   identity of a document that declares no `$id`
///
/// # Errors
/// Returns `TranspileError` if parsing, resolution, or synthesis fails.
pub fn compile_json(sources: &[(&str, &str)]) -> Result<StructMap, TranspileError> {
    let documents = sources
        .iter()
        .map(|(name, json)| structgen_schema::parse_document(name, json))
        .collect::<Result<Vec<_>, _>>()?;
    compile(&documents)
}

/// Parses and compiles JSON Schema files.
///
/// # Errors
/// Returns `TranspileError` if reading, parsing, resolution, or synthesis
/// fails.
pub fn compile_files<P: AsRef<Path>>(paths: &[P]) -> Result<StructMap, TranspileError> {
    let documents = paths
        .iter()
        .map(|path| structgen_schema::parse_document_file(path.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    compile(&documents)
}
