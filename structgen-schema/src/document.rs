//! Initialized schema documents.
//!
//! A [`Document`] is a root schema whose identity has been normalized and
//! whose definitions have been indexed. The transpiler only accepts
//! documents, so an uninitialized root cannot reach it.

use crate::error::ParseError;
use crate::pointer::{JsonPointer, Segment};
use crate::types::Schema;

/// An initialized root schema.
#[derive(Debug, Clone)]
pub struct Document {
    id: String,
    aliases: Vec<String>,
    root: Schema,
    definitions: Vec<JsonPointer>,
}

impl Document {
    /// Initializes a root schema.
    ///
    /// The identity is the declared `$id`, falling back to `source_name`
    /// when the schema does not declare one.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidStructure` if a definition has an empty key.
    pub fn new(source_name: impl Into<String>, root: Schema) -> Result<Self, ParseError> {
        let id = match root.id.as_deref().map(normalize_id) {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => normalize_id(&source_name.into()).to_string(),
        };

        let mut definitions = Vec::new();
        index_definitions(&id, &root, &JsonPointer::root(), &mut definitions)?;
        definitions.sort();

        Ok(Self {
            id,
            aliases: Vec::new(),
            root,
            definitions,
        })
    }

    /// Adds an alternative identity, such as the file name a document
    /// without `$id` was loaded from. Ignored when `$id` is declared.
    #[must_use]
    pub fn with_alias(mut self, alias: &str) -> Self {
        let alias = normalize_id(alias);
        if !self.declares_id() && !alias.is_empty() && alias != self.id {
            self.aliases.push(alias.to_string());
        }
        self
    }

    /// Returns true if the schema declares its own identity.
    #[must_use]
    pub fn declares_id(&self) -> bool {
        self.root
            .id
            .as_deref()
            .is_some_and(|id| !normalize_id(id).is_empty())
    }

    /// Returns the normalized document identity (may be empty).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the root schema node.
    #[must_use]
    pub fn root(&self) -> &Schema {
        &self.root
    }

    /// Returns the pointers of every definition in the document, sorted.
    #[must_use]
    pub fn definitions(&self) -> &[JsonPointer] {
        &self.definitions
    }

    /// Returns true if the document identity, or one of its aliases,
    /// matches `id` after normalization.
    #[must_use]
    pub fn is_identified_by(&self, id: &str) -> bool {
        let id = normalize_id(id);
        !id.is_empty() && (self.id == id || self.aliases.iter().any(|alias| alias == id))
    }

    /// Follows `pointer` from the document root.
    #[must_use]
    pub fn lookup(&self, pointer: &JsonPointer) -> Option<&Schema> {
        pointer
            .segments()
            .iter()
            .try_fold(&self.root, |node, segment| match segment {
                Segment::Definition(name) => node.definitions.get(name),
                Segment::Property(name) => node.properties.get(name),
                Segment::Items => node.items.as_deref(),
                Segment::AdditionalProperties => node.additional_schema(),
            })
    }

    /// Returns a short name derived from the identity: the last path segment
    /// without its extension (`http://x/schemas/pet.json` gives `pet`).
    #[must_use]
    pub fn stem(&self) -> Option<&str> {
        let last = self
            .id
            .trim_end_matches('/')
            .rsplit(['/', ':'])
            .next()
            .unwrap_or_default();
        let stem = last.split('.').next().unwrap_or_default();
        (!stem.is_empty()).then_some(stem)
    }
}

/// Normalizes a document identity by trimming whitespace and any trailing `#`.
#[must_use]
pub fn normalize_id(id: &str) -> &str {
    id.trim().trim_end_matches('#')
}

fn index_definitions(
    document: &str,
    node: &Schema,
    at: &JsonPointer,
    out: &mut Vec<JsonPointer>,
) -> Result<(), ParseError> {
    for (name, definition) in &node.definitions {
        if name.is_empty() {
            return Err(ParseError::invalid_structure(
                document,
                format!("empty definition key under {at}"),
            ));
        }
        let pointer = at.join(Segment::Definition(name.clone()));
        index_definitions(document, definition, &pointer, out)?;
        out.push(pointer);
    }
    for (name, property) in &node.properties {
        index_definitions(
            document,
            property,
            &at.join(Segment::Property(name.clone())),
            out,
        )?;
    }
    if let Some(items) = &node.items {
        index_definitions(document, items, &at.join(Segment::Items), out)?;
    }
    if let Some(extra) = node.additional_schema() {
        index_definitions(
            document,
            extra,
            &at.join(Segment::AdditionalProperties),
            out,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_document;

    #[test]
    fn test_declared_id_wins() {
        let doc = parse_document("fallback", r##"{"$id": "root2#", "type": "object"}"##)
            .expect("Failed to parse");
        assert_eq!(doc.id(), "root2");
        assert!(doc.is_identified_by("root2#"));
        assert!(!doc.is_identified_by("fallback"));
    }

    #[test]
    fn test_source_name_fallback() {
        let doc = parse_document("pets", r#"{"type": "object"}"#).expect("Failed to parse");
        assert_eq!(doc.id(), "pets");
    }

    #[test]
    fn test_alias_without_declared_id() {
        let doc = parse_document("address", r#"{"type": "object"}"#)
            .unwrap()
            .with_alias("address.json");
        assert!(doc.is_identified_by("address"));
        assert!(doc.is_identified_by("address.json#"));
        assert!(!doc.is_identified_by("person.json"));
    }

    #[test]
    fn test_alias_ignored_with_declared_id() {
        let doc = parse_document("address", r#"{"$id": "urn:address"}"#)
            .unwrap()
            .with_alias("address.json");
        assert!(doc.declares_id());
        assert!(doc.is_identified_by("urn:address"));
        assert!(!doc.is_identified_by("address.json"));
    }

    #[test]
    fn test_empty_id_matches_nothing() {
        let doc = parse_document("", r#"{"type": "object"}"#).expect("Failed to parse");
        assert_eq!(doc.id(), "");
        assert!(!doc.is_identified_by(""));
    }

    #[test]
    fn test_definitions_indexed() {
        let doc = parse_document(
            "",
            r#"{
                "definitions": {
                    "address": {
                        "type": "object",
                        "definitions": { "street": { "type": "string" } }
                    },
                    "city": { "type": "string" }
                },
                "properties": {
                    "inline": { "$defs": { "local": { "type": "integer" } } }
                }
            }"#,
        )
        .expect("Failed to parse");

        let pointers: Vec<String> = doc.definitions().iter().map(ToString::to_string).collect();
        assert_eq!(
            pointers,
            vec![
                "#/definitions/address",
                "#/definitions/address/definitions/street",
                "#/definitions/city",
                "#/properties/inline/definitions/local",
            ]
        );
    }

    #[test]
    fn test_empty_definition_key_rejected() {
        let result = parse_document("bad", r#"{"definitions": {"": {"type": "string"}}}"#);
        assert!(matches!(result, Err(ParseError::InvalidStructure { .. })));
    }

    #[test]
    fn test_lookup() {
        let doc = parse_document(
            "",
            r#"{
                "properties": {
                    "tags": { "additionalProperties": { "items": { "type": "string" } } }
                }
            }"#,
        )
        .expect("Failed to parse");

        let pointer =
            JsonPointer::parse_fragment("/properties/tags/additionalProperties/items").unwrap();
        assert_eq!(doc.lookup(&pointer).map(Schema::type_name), Some("string"));

        let missing = JsonPointer::parse_fragment("/definitions/nope").unwrap();
        assert!(doc.lookup(&missing).is_none());
        assert!(doc.lookup(&JsonPointer::root()).is_some());
    }

    #[test]
    fn test_stem() {
        let doc = parse_document("http://example.com/schemas/pet.json", "{}").unwrap();
        assert_eq!(doc.stem(), Some("pet"));
        let doc = parse_document("urn:root2", "{}").unwrap();
        assert_eq!(doc.stem(), Some("root2"));
        let doc = parse_document("", "{}").unwrap();
        assert_eq!(doc.stem(), None);
    }
}
