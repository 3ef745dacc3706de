//! Identifier derivation for generated types and fields.

use std::collections::BTreeMap;
use structgen_schema::Schema;

/// Name used when neither the title nor the fallback key yields an identifier.
pub const ANONYMOUS: &str = "Anonymous";

/// Field name used when a property key holds no identifier characters.
pub const UNNAMED_FIELD: &str = "Field";

/// Derives the type name for `node`.
///
/// A non-empty title wins (`"Favourite Bars"` gives `FavouriteBars`);
/// otherwise `fallback_key` is capitalized (`property1` gives `Property1`).
#[must_use]
pub fn type_name(node: &Schema, fallback_key: &str) -> String {
    let name = match node.non_empty_title() {
        Some(title) => to_exported(title),
        None => to_exported(fallback_key),
    };
    if name.is_empty() {
        ANONYMOUS.to_string()
    } else {
        name
    }
}

/// Derives the field name for a property key (`barName` gives `BarName`).
///
/// A key without alphanumerics (`"-"`, `""`) gives [`UNNAMED_FIELD`].
#[must_use]
pub fn field_name(key: &str) -> String {
    let name = to_exported(key);
    if name.is_empty() {
        UNNAMED_FIELD.to_string()
    } else {
        name
    }
}

/// Converts free text to an exported identifier.
///
/// Characters other than alphanumerics and `_` are dropped and the character
/// after each of them is upper-cased, as is the first one. Everything else
/// keeps its case.
#[must_use]
pub fn to_exported(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut capitalize_next = true;

    for c in s.chars() {
        if !(c.is_alphanumeric() || c == '_') {
            capitalize_next = true;
        } else if capitalize_next {
            result.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// Returns `base`, or `base` followed by the smallest suffix from 2 upwards
/// that is not yet a key of `taken`.
#[must_use]
pub fn unique_key<V>(taken: &BTreeMap<String, V>, base: &str) -> String {
    if !taken.contains_key(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{base}{n}"))
        .find(|candidate| !taken.contains_key(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Schema {
        Schema {
            title: Some(title.to_string()),
            ..Schema::default()
        }
    }

    #[test]
    fn test_type_name_from_title() {
        assert_eq!(type_name(&titled("Favourite Bars"), "bars"), "FavouriteBars");
        assert_eq!(
            type_name(&titled("Array without defined item"), "x"),
            "ArrayWithoutDefinedItem"
        );
        assert_eq!(type_name(&titled("Artist"), "items"), "Artist");
    }

    #[test]
    fn test_type_name_from_key() {
        assert_eq!(type_name(&Schema::default(), "property1"), "Property1");
        assert_eq!(type_name(&Schema::default(), "SubObj3a"), "SubObj3a");
        assert_eq!(type_name(&titled("  "), "address"), "Address");
    }

    #[test]
    fn test_type_name_anonymous() {
        assert_eq!(type_name(&Schema::default(), ""), ANONYMOUS);
        assert_eq!(type_name(&Schema::default(), "$$"), ANONYMOUS);
    }

    #[test]
    fn test_field_name() {
        assert_eq!(field_name("barName"), "BarName");
        assert_eq!(field_name("name"), "Name");
        assert_eq!(field_name("x-kubernetes-kind"), "XKubernetesKind");
        assert_eq!(field_name("snake_case"), "Snake_case");
    }

    #[test]
    fn test_field_name_without_identifier_chars() {
        assert_eq!(field_name("-"), UNNAMED_FIELD);
        assert_eq!(field_name("+"), UNNAMED_FIELD);
        assert_eq!(field_name(""), UNNAMED_FIELD);
    }

    #[test]
    fn test_determinism() {
        assert_eq!(field_name("birthyear"), field_name("birthyear"));
        assert_eq!(
            type_name(&titled("Postal Address"), "a"),
            type_name(&titled("Postal Address"), "b")
        );
    }

    #[test]
    fn test_unique_key() {
        let mut taken = BTreeMap::new();
        assert_eq!(unique_key(&taken, "Foo"), "Foo");
        taken.insert("Foo".to_string(), ());
        assert_eq!(unique_key(&taken, "Foo"), "Foo2");
        taken.insert("Foo2".to_string(), ());
        assert_eq!(unique_key(&taken, "Foo"), "Foo3");
    }
}
