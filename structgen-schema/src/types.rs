//! Schema node definitions.
//!
//! This module contains the in-memory representation of a JSON Schema node
//! as consumed by the transpiler. Only the structural keywords are modelled;
//! constraint keywords are ignored during decoding.

use serde::Deserialize;
use std::collections::BTreeMap;

/// One JSON Schema node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawSchema")]
pub struct Schema {
    /// Human readable title, used for type naming.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Declared document identity (`$id`, or draft-04 `id`).
    pub id: Option<String>,
    /// Meta-schema URI (`$schema`).
    pub schema_type: Option<String>,
    /// Declared `type` keyword.
    pub type_value: Option<TypeValue>,
    /// Declared properties, keyed by JSON name.
    pub properties: BTreeMap<String, Schema>,
    /// `additionalProperties` keyword.
    pub additional_properties: Option<AdditionalProperties>,
    /// Item schema for arrays.
    pub items: Option<Box<Schema>>,
    /// `$ref` pointer.
    pub reference: Option<String>,
    /// Names of required properties.
    pub required: Vec<String>,
    /// Reusable definitions scoped to this node (`definitions` and `$defs`).
    pub definitions: BTreeMap<String, Schema>,
}

/// Wire form of [`Schema`], keeping keyword spellings apart.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawSchema {
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "$id")]
    id: Option<String>,
    #[serde(rename = "id")]
    legacy_id: Option<String>,
    #[serde(rename = "$schema")]
    schema_type: Option<String>,
    #[serde(rename = "type")]
    type_value: Option<TypeValue>,
    properties: BTreeMap<String, Schema>,
    #[serde(rename = "additionalProperties")]
    additional_properties: Option<AdditionalProperties>,
    items: Option<Box<Schema>>,
    #[serde(rename = "$ref")]
    reference: Option<String>,
    required: Vec<String>,
    definitions: BTreeMap<String, Schema>,
    #[serde(rename = "$defs")]
    defs: BTreeMap<String, Schema>,
}

impl From<RawSchema> for Schema {
    /// `$id` wins over `id`; on a key present in both, `definitions` wins
    /// over `$defs`.
    fn from(raw: RawSchema) -> Self {
        let mut definitions = raw.defs;
        definitions.extend(raw.definitions);
        Self {
            title: raw.title,
            description: raw.description,
            id: raw.id.or(raw.legacy_id),
            schema_type: raw.schema_type,
            type_value: raw.type_value,
            properties: raw.properties,
            additional_properties: raw.additional_properties,
            items: raw.items,
            reference: raw.reference,
            required: raw.required,
            definitions,
        }
    }
}

impl Schema {
    /// Returns the effective `type` keyword, or `""` when absent.
    ///
    /// For a type array the first non-`null` entry wins, so
    /// `["string", "null"]` reads as `string`.
    #[must_use]
    pub fn type_name(&self) -> &str {
        match &self.type_value {
            None => "",
            Some(TypeValue::Single(t)) => t,
            Some(TypeValue::Multiple(ts)) => ts
                .iter()
                .find(|t| t.as_str() != "null")
                .or_else(|| ts.first())
                .map_or("", String::as_str),
        }
    }

    /// Returns the title if it holds at least one non-whitespace character.
    #[must_use]
    pub fn non_empty_title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Returns true if `name` is listed in `required`.
    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    /// Returns true if the node declares at least one property.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    /// Returns the schema-valued `additionalProperties`, if any.
    #[must_use]
    pub fn additional_schema(&self) -> Option<&Schema> {
        match &self.additional_properties {
            Some(AdditionalProperties::Schema(s)) => Some(s),
            _ => None,
        }
    }
}

/// The `type` keyword: a single name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeValue {
    /// `"type": "object"`
    Single(String),
    /// `"type": ["string", "null"]`
    Multiple(Vec<String>),
}

/// The `additionalProperties` keyword.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` allows untyped extra properties, `false` forbids them.
    Bool(bool),
    /// Extra properties must match this schema.
    Schema(Box<Schema>),
}

impl AdditionalProperties {
    /// Returns true for the boolean `true` form.
    #[must_use]
    pub const fn is_allowed_untyped(&self) -> bool {
        matches!(self, Self::Bool(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(type_name: &str) -> Schema {
        Schema {
            type_value: Some(TypeValue::Single(type_name.to_string())),
            ..Schema::default()
        }
    }

    #[test]
    fn test_type_name_single() {
        assert_eq!(typed("string").type_name(), "string");
        assert_eq!(Schema::default().type_name(), "");
    }

    #[test]
    fn test_type_name_skips_null() {
        let schema = Schema {
            type_value: Some(TypeValue::Multiple(vec![
                "null".to_string(),
                "integer".to_string(),
            ])),
            ..Schema::default()
        };
        assert_eq!(schema.type_name(), "integer");

        let only_null = Schema {
            type_value: Some(TypeValue::Multiple(vec!["null".to_string()])),
            ..Schema::default()
        };
        assert_eq!(only_null.type_name(), "null");
    }

    #[test]
    fn test_non_empty_title() {
        let mut schema = Schema::default();
        assert!(schema.non_empty_title().is_none());
        schema.title = Some("   ".to_string());
        assert!(schema.non_empty_title().is_none());
        schema.title = Some("Address".to_string());
        assert_eq!(schema.non_empty_title(), Some("Address"));
    }

    #[test]
    fn test_additional_schema() {
        let mut schema = typed("object");
        assert!(schema.additional_schema().is_none());

        schema.additional_properties = Some(AdditionalProperties::Bool(true));
        assert!(schema.additional_schema().is_none());
        assert!(
            schema
                .additional_properties
                .as_ref()
                .is_some_and(AdditionalProperties::is_allowed_untyped)
        );

        schema.additional_properties = Some(AdditionalProperties::Schema(Box::new(
            typed("integer"),
        )));
        assert_eq!(
            schema.additional_schema().map(Schema::type_name),
            Some("integer")
        );
    }

    #[test]
    fn test_is_required() {
        let schema = Schema {
            required: vec!["name".to_string()],
            ..Schema::default()
        };
        assert!(schema.is_required("name"));
        assert!(!schema.is_required("age"));
    }

    #[test]
    fn test_both_id_spellings() {
        let schema: Schema =
            serde_json::from_str(r#"{"$id": "current", "id": "legacy"}"#).unwrap();
        assert_eq!(schema.id.as_deref(), Some("current"));

        let schema: Schema = serde_json::from_str(r#"{"id": "legacy"}"#).unwrap();
        assert_eq!(schema.id.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_both_definition_spellings() {
        let schema: Schema = serde_json::from_str(
            r#"{
                "definitions": { "a": { "type": "string" }, "shared": { "type": "integer" } },
                "$defs": { "b": { "type": "boolean" }, "shared": { "type": "number" } }
            }"#,
        )
        .unwrap();

        let keys: Vec<&str> = schema.definitions.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "shared"]);
        assert_eq!(schema.definitions["shared"].type_name(), "integer");
    }
}
