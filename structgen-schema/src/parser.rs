//! JSON Schema document loader.
//!
//! This module decodes JSON Schema documents into [`Schema`] trees and
//! initializes them as [`Document`]s ready for compilation.

use crate::document::Document;
use crate::error::ParseError;
use crate::types::Schema;
use std::path::Path;

/// Parses a JSON Schema document from a string.
///
/// # Arguments
/// * `source_name` - Identity used when the document declares no `$id`
/// * `json` - JSON Schema content
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed, the root is not a schema
/// object, or initialization fails.
pub fn parse_document(source_name: &str, json: &str) -> Result<Document, ParseError> {
    let schema: Schema = serde_json::from_str(json)?;
    Document::new(source_name, schema)
}

/// Parses a JSON Schema document from a file.
///
/// The file stem is used as the identity when the document declares no
/// `$id`; the file name (`address.json`) is accepted as an alias.
///
/// # Errors
/// Returns `ParseError` if reading, decoding, or initialization fails.
pub fn parse_document_file(path: &Path) -> Result<Document, ParseError> {
    let json = std::fs::read_to_string(path)?;
    let source_name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let doc = parse_document(&source_name, &json)?;
    Ok(match path.file_name() {
        Some(name) => doc.with_alias(&name.to_string_lossy()),
        None => doc,
    })
}
