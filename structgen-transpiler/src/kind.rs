//! Node classification.
//!
//! A schema node's kind is implied by which keywords it carries. This module
//! decides it once, so synthesis can dispatch on a closed set of variants.

use crate::ir::Primitive;
use structgen_schema::{AdditionalProperties, Schema};

/// Effective kind of a schema node.
#[derive(Debug, Clone, Copy)]
pub enum NodeKind<'a> {
    /// `$ref` to another node.
    Reference(&'a str),
    /// Scalar type.
    Primitive(Primitive),
    /// Array with optional item schema.
    Array(Option<&'a Schema>),
    /// Object with declared properties and an optional schema for extras.
    Struct {
        /// Schema-valued `additionalProperties`.
        extra: Option<&'a Schema>,
    },
    /// Object with no properties whose values are all alike.
    Map(MapValue<'a>),
    /// Object with neither properties nor additional properties.
    EmptyObject,
    /// No type information at all.
    Any,
}

/// Value type of an object that collapses to a map.
#[derive(Debug, Clone, Copy)]
pub enum MapValue<'a> {
    /// Values must match this schema.
    Schema(&'a Schema),
    /// Values are untyped (`additionalProperties: true`).
    Any,
}

/// Classifies a node.
///
/// Returns `None` when the declared type is unrecognized and no structural
/// keyword disambiguates it.
#[must_use]
pub fn classify(node: &Schema) -> Option<NodeKind<'_>> {
    if let Some(reference) = node.reference.as_deref() {
        return Some(NodeKind::Reference(reference));
    }

    let type_name = node.type_name();
    if let Some(primitive) = Primitive::from_type_name(type_name) {
        return Some(NodeKind::Primitive(primitive));
    }

    match type_name {
        "array" => Some(NodeKind::Array(node.items.as_deref())),
        "object" => Some(classify_object(node)),
        "" | "null" => Some(classify_structural(node).unwrap_or(NodeKind::Any)),
        _ => classify_structural(node),
    }
}

fn classify_structural(node: &Schema) -> Option<NodeKind<'_>> {
    if let Some(items) = node.items.as_deref() {
        Some(NodeKind::Array(Some(items)))
    } else if node.has_properties() || node.additional_properties.is_some() {
        Some(classify_object(node))
    } else {
        None
    }
}

fn classify_object(node: &Schema) -> NodeKind<'_> {
    match (node.has_properties(), &node.additional_properties) {
        (true, Some(AdditionalProperties::Schema(extra))) => NodeKind::Struct {
            extra: Some(extra),
        },
        (true, _) => NodeKind::Struct { extra: None },
        (false, Some(AdditionalProperties::Schema(value))) => {
            NodeKind::Map(MapValue::Schema(value))
        }
        (false, Some(extra)) if extra.is_allowed_untyped() => NodeKind::Map(MapValue::Any),
        (false, _) => NodeKind::EmptyObject,
    }
}
