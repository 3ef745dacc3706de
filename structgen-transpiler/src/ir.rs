//! Output model of a compilation.
//!
//! A compilation produces a flat, name-keyed set of [`Struct`]s whose fields
//! carry [`TypeDesc`] descriptors. Renderers consume this model; the
//! descriptor's `Display` form (`*Address`, `[]any`, `map[string]int`) is the
//! structural type string handed to them.

use std::collections::BTreeMap;
use std::fmt;

/// All structs generated by one compilation, keyed by name.
pub type StructMap = BTreeMap<String, Struct>;

/// Primitive scalar kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `string`
    String,
    /// `integer`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
}

impl Primitive {
    /// Maps a JSON Schema `type` name to a primitive kind.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "number" => Some(Self::Number),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Returns the target type name.
    #[must_use]
    pub const fn target_type(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "int",
            Self::Number => "float64",
            Self::Boolean => "bool",
        }
    }
}

/// A synthesized type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    /// Primitive scalar.
    Primitive(Primitive),
    /// Slice of the inner type.
    Slice(Box<TypeDesc>),
    /// Map from string keys to the inner type.
    Map(Box<TypeDesc>),
    /// Pointer to the named struct.
    Struct(String),
    /// Empty interface.
    Any,
}

impl TypeDesc {
    /// Wraps `inner` in a slice.
    #[must_use]
    pub fn slice_of(inner: TypeDesc) -> Self {
        Self::Slice(Box::new(inner))
    }

    /// Wraps `inner` in a string-keyed map.
    #[must_use]
    pub fn map_of(inner: TypeDesc) -> Self {
        Self::Map(Box::new(inner))
    }
}

impl fmt::Display for TypeDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(p) => f.write_str(p.target_type()),
            Self::Slice(inner) => write!(f, "[]{inner}"),
            Self::Map(inner) => write!(f, "map[string]{inner}"),
            Self::Struct(name) => write!(f, "*{name}"),
            Self::Any => f.write_str("any"),
        }
    }
}

/// A field of a generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Property key, or `-` for the synthesized extra-properties field.
    pub json_name: String,
    /// Exported identifier.
    pub name: String,
    /// Field type.
    pub ty: TypeDesc,
    /// Whether the owning node lists the property as required.
    pub required: bool,
    /// Property description.
    pub description: Option<String>,
}

/// A generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Struct {
    /// Unique type name.
    pub name: String,
    /// Fields keyed by field name.
    pub fields: BTreeMap<String, Field>,
    /// Description of the source node.
    pub description: Option<String>,
    /// Source location as `<document>#<pointer>`.
    pub origin: String,
}

impl Struct {
    /// Gets a field by its exported name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Returns true if the struct has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_mapping() {
        assert_eq!(Primitive::from_type_name("string"), Some(Primitive::String));
        assert_eq!(Primitive::from_type_name("integer"), Some(Primitive::Integer));
        assert_eq!(Primitive::from_type_name("number"), Some(Primitive::Number));
        assert_eq!(Primitive::from_type_name("boolean"), Some(Primitive::Boolean));
        assert_eq!(Primitive::from_type_name("object"), None);
    }

    #[test]
    fn test_type_desc_display() {
        assert_eq!(TypeDesc::Primitive(Primitive::Number).to_string(), "float64");
        assert_eq!(TypeDesc::Struct("Address".into()).to_string(), "*Address");
        assert_eq!(TypeDesc::slice_of(TypeDesc::Any).to_string(), "[]any");
        assert_eq!(
            TypeDesc::map_of(TypeDesc::Primitive(Primitive::Integer)).to_string(),
            "map[string]int"
        );
        assert_eq!(
            TypeDesc::slice_of(TypeDesc::slice_of(TypeDesc::Struct("Inner".into()))).to_string(),
            "[][]*Inner"
        );
    }
}
