//! Struct registry keyed by schema node identity.
//!
//! Structs are registered in two steps: [`Registry::declare`] reserves a name
//! for a node before its fields are synthesized, and [`Registry::define`]
//! stores the finished struct. A declared but undefined node is in progress;
//! looking it up yields the forward-declared name, which is what lets
//! self-referencing objects terminate.

use crate::error::TranspileError;
use crate::ir::{Struct, StructMap};
use crate::naming;
use std::collections::HashMap;
use structgen_schema::JsonPointer;

/// Stable identity of a schema node: document index plus canonical pointer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId {
    document: usize,
    pointer: JsonPointer,
}

impl NodeId {
    /// Creates a node identity.
    #[must_use]
    pub fn new(document: usize, pointer: JsonPointer) -> Self {
        Self { document, pointer }
    }

    /// Identity of a document root.
    #[must_use]
    pub fn root(document: usize) -> Self {
        Self::new(document, JsonPointer::root())
    }

    /// Index of the owning document.
    #[must_use]
    pub const fn document(&self) -> usize {
        self.document
    }

    /// Pointer within the owning document.
    #[must_use]
    pub fn pointer(&self) -> &JsonPointer {
        &self.pointer
    }

    /// Returns the identity of a child node.
    #[must_use]
    pub fn join(&self, segment: structgen_schema::Segment) -> Self {
        Self::new(self.document, self.pointer.join(segment))
    }
}

/// How to handle two distinct nodes deriving the same type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Rename the later node: first by prefixing the name of its document
    /// when it lives in a different document than the owner, then by
    /// appending the smallest free numeric suffix.
    #[default]
    Disambiguate,
    /// Fail with `TranspileError::NameCollision`.
    Fail,
}

#[derive(Debug)]
struct Owner {
    id: NodeId,
    origin: String,
}

/// Name-keyed struct namespace shared by all roots of one compilation.
#[derive(Debug)]
pub struct Registry {
    policy: CollisionPolicy,
    structs: StructMap,
    names: HashMap<NodeId, String>,
    owners: HashMap<String, Owner>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            structs: StructMap::new(),
            names: HashMap::new(),
            owners: HashMap::new(),
        }
    }

    /// Returns the name declared for `id`, complete or in progress.
    #[must_use]
    pub fn lookup(&self, id: &NodeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Returns true if the struct for `id` has been defined.
    #[must_use]
    pub fn is_defined(&self, id: &NodeId) -> bool {
        self.lookup(id)
            .is_some_and(|name| self.structs.contains_key(name))
    }

    /// Reserves a type name for `id` and returns the effective name.
    ///
    /// Declaring an identity twice returns the first name.
    ///
    /// # Arguments
    /// * `id` - Node identity
    /// * `base` - Preferred name
    /// * `origin` - Printable node location, for diagnostics
    /// * `qualifier` - Name of the node's document, used to disambiguate
    ///
    /// # Errors
    /// Returns `TranspileError::NameCollision` if `base` is taken by another
    /// node and the policy is [`CollisionPolicy::Fail`].
    pub fn declare(
        &mut self,
        id: NodeId,
        base: &str,
        origin: &str,
        qualifier: Option<&str>,
    ) -> Result<String, TranspileError> {
        if let Some(name) = self.names.get(&id) {
            return Ok(name.clone());
        }

        let name = match self.owners.get(base) {
            None => base.to_string(),
            Some(owner) => match self.policy {
                CollisionPolicy::Fail => {
                    return Err(TranspileError::NameCollision {
                        name: base.to_string(),
                        first: owner.origin.clone(),
                        second: origin.to_string(),
                    });
                }
                CollisionPolicy::Disambiguate => {
                    let name = self.disambiguate(base, owner.id.document(), &id, qualifier);
                    tracing::warn!(
                        "Type name '{}' already used by {}; naming {} '{}'",
                        base,
                        owner.origin,
                        origin,
                        name
                    );
                    name
                }
            },
        };

        self.names.insert(id.clone(), name.clone());
        self.owners.insert(
            name.clone(),
            Owner {
                id,
                origin: origin.to_string(),
            },
        );
        Ok(name)
    }

    /// Stores the finished struct for a declared node.
    pub fn define(&mut self, definition: Struct) {
        tracing::debug!(
            "Registered struct {} ({} fields) from {}",
            definition.name,
            definition.fields.len(),
            definition.origin
        );
        self.structs.insert(definition.name.clone(), definition);
    }

    /// Returns the number of defined structs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.structs.len()
    }

    /// Returns true if no struct has been defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty()
    }

    /// Consumes the registry, returning the defined structs.
    #[must_use]
    pub fn into_structs(self) -> StructMap {
        self.structs
    }

    fn disambiguate(
        &self,
        base: &str,
        owner_document: usize,
        id: &NodeId,
        qualifier: Option<&str>,
    ) -> String {
        if owner_document != id.document() {
            if let Some(prefix) = qualifier.map(naming::to_exported) {
                let qualified = format!("{prefix}{base}");
                if !prefix.is_empty() && !self.owners.contains_key(&qualified) {
                    return qualified;
                }
            }
        }
        (2..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !self.owners.contains_key(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use structgen_schema::Segment;

    fn def(document: usize, name: &str) -> NodeId {
        NodeId::root(document).join(Segment::Definition(name.to_string()))
    }

    fn empty_struct(name: &str) -> Struct {
        Struct {
            name: name.to_string(),
            fields: BTreeMap::new(),
            description: None,
            origin: String::new(),
        }
    }

    #[test]
    fn test_declare_and_define() {
        let mut registry = Registry::new(CollisionPolicy::Fail);
        let id = def(0, "address");

        let name = registry.declare(id.clone(), "Address", "#/definitions/address", None).unwrap();
        assert_eq!(name, "Address");
        assert_eq!(registry.lookup(&id), Some("Address"));
        assert!(!registry.is_defined(&id));
        assert!(registry.is_empty());

        registry.define(empty_struct(&name));
        assert!(registry.is_defined(&id));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_redeclare_same_identity() {
        let mut registry = Registry::new(CollisionPolicy::Fail);
        let id = def(0, "address");
        registry.declare(id.clone(), "Address", "a", None).unwrap();
        let again = registry.declare(id, "Other", "a", None).unwrap();
        assert_eq!(again, "Address");
    }

    #[test]
    fn test_collision_fails() {
        let mut registry = Registry::new(CollisionPolicy::Fail);
        registry
            .declare(def(0, "address"), "Address", "root1#/definitions/address", None)
            .unwrap();
        let err = registry
            .declare(def(1, "address"), "Address", "root2#/definitions/address", None)
            .unwrap_err();

        match err {
            TranspileError::NameCollision {
                name,
                first,
                second,
            } => {
                assert_eq!(name, "Address");
                assert_eq!(first, "root1#/definitions/address");
                assert_eq!(second, "root2#/definitions/address");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_collision_qualified_by_document() {
        let mut registry = Registry::new(CollisionPolicy::Disambiguate);
        registry.declare(def(0, "address"), "Address", "a", Some("billing")).unwrap();
        let name = registry
            .declare(def(1, "address"), "Address", "b", Some("shipping"))
            .unwrap();
        assert_eq!(name, "ShippingAddress");
    }

    #[test]
    fn test_collision_numbered_in_same_document() {
        let mut registry = Registry::new(CollisionPolicy::Disambiguate);
        registry.declare(def(0, "a"), "Address", "a", Some("doc")).unwrap();
        let second = registry.declare(def(0, "b"), "Address", "b", Some("doc")).unwrap();
        let third = registry.declare(def(0, "c"), "Address", "c", Some("doc")).unwrap();
        assert_eq!(second, "Address2");
        assert_eq!(third, "Address3");
    }

    #[test]
    fn test_collision_numbered_without_qualifier() {
        let mut registry = Registry::new(CollisionPolicy::Disambiguate);
        registry.declare(def(0, "a"), "Address", "a", None).unwrap();
        let name = registry.declare(def(1, "a"), "Address", "b", None).unwrap();
        assert_eq!(name, "Address2");
    }
}
