//! # structgen schema
//!
//! JSON Schema node model and document loading.
//!
//! This crate provides:
//! - The schema node tree consumed by the transpiler
//! - JSON decoding of schema documents
//! - Document initialization (identity normalization, definition indexing)
//! - Canonical JSON pointers into a document

pub mod document;
pub mod error;
pub mod parser;
pub mod pointer;
pub mod types;

pub use document::{Document, normalize_id};
pub use error::ParseError;
pub use parser::{parse_document, parse_document_file};
pub use pointer::{JsonPointer, Segment};
pub use types::{AdditionalProperties, Schema, TypeValue};
