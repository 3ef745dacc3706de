//! Type synthesis.
//!
//! The [`Synthesizer`] walks schema trees, maps every node to a [`TypeDesc`]
//! and registers a struct for each object node it meets. It owns the
//! registry for one compilation and threads it through the recursion.

use crate::compiler::CompileOptions;
use crate::error::TranspileError;
use crate::ir::{Field, Struct, StructMap, TypeDesc};
use crate::kind::{MapValue, NodeKind, classify};
use crate::naming;
use crate::registry::{NodeId, Registry};
use crate::resolver::Resolver;
use std::collections::{BTreeMap, HashMap};
use structgen_schema::{Document, Schema, Segment};

/// JSON name of the synthesized extra-properties field.
pub const ADDITIONAL_PROPERTIES_JSON_NAME: &str = "-";

/// Field name of the synthesized extra-properties field.
pub const ADDITIONAL_PROPERTIES_FIELD: &str = "AdditionalProperties";

/// Recursive schema-to-type synthesizer for one compilation.
pub struct Synthesizer<'a> {
    documents: &'a [Document],
    resolver: Resolver<'a>,
    options: &'a CompileOptions,
    registry: Registry,
    /// Reference targets being synthesized, outermost first, each with the
    /// number of structs that were open when it was entered.
    in_flight: Vec<(NodeId, usize)>,
    /// Structs declared but not yet defined.
    open_structs: usize,
    /// Finished reference targets, so each is synthesized once.
    resolved: HashMap<NodeId, TypeDesc>,
}

impl<'a> Synthesizer<'a> {
    /// Creates a synthesizer over the roots of one compilation.
    #[must_use]
    pub fn new(documents: &'a [Document], options: &'a CompileOptions) -> Self {
        Self {
            documents,
            resolver: Resolver::new(documents),
            options,
            registry: Registry::new(options.collision_policy),
            in_flight: Vec::new(),
            open_structs: 0,
            resolved: HashMap::new(),
        }
    }

    /// Synthesizes the root of document number `document`.
    ///
    /// # Errors
    /// Returns `TranspileError` if any node under the root fails.
    pub fn synthesize_root(&mut self, document: usize) -> Result<TypeDesc, TranspileError> {
        let id = NodeId::root(document);
        let documents = self.documents;
        let Some(doc) = documents.get(document) else {
            return Err(TranspileError::unresolved("#", "", "no such document"));
        };
        let key = self.root_key(doc);
        self.synthesize(doc.root(), &id, &key)
    }

    /// Maps `node`, located at `at`, to a type descriptor.
    ///
    /// `key` is the property or definition key that reached the node; it
    /// names the struct when the node has no title.
    ///
    /// # Errors
    /// Returns `TranspileError` if a reference cannot be resolved, a node has
    /// an unrecognizable shape, a cycle cannot be broken, or a name collides
    /// under [`CollisionPolicy::Fail`](crate::CollisionPolicy::Fail).
    pub fn synthesize(
        &mut self,
        node: &'a Schema,
        at: &NodeId,
        key: &str,
    ) -> Result<TypeDesc, TranspileError> {
        let kind = classify(node)
            .ok_or_else(|| TranspileError::invalid_shape(self.origin(at), node.type_name()))?;

        match kind {
            NodeKind::Reference(reference) => self.synthesize_reference(reference, at),
            NodeKind::Primitive(primitive) => Ok(TypeDesc::Primitive(primitive)),
            NodeKind::Any => Ok(TypeDesc::Any),
            NodeKind::Array(None) => Ok(TypeDesc::slice_of(TypeDesc::Any)),
            NodeKind::Array(Some(items)) => {
                let item = self.synthesize(items, &at.join(Segment::Items), key)?;
                Ok(TypeDesc::slice_of(item))
            }
            NodeKind::Map(MapValue::Any) => Ok(TypeDesc::map_of(TypeDesc::Any)),
            NodeKind::Map(MapValue::Schema(value)) => {
                let value = self.synthesize(value, &at.join(Segment::AdditionalProperties), key)?;
                Ok(TypeDesc::map_of(value))
            }
            NodeKind::Struct { extra } => self.synthesize_struct(node, at, key, extra),
            NodeKind::EmptyObject => self.synthesize_struct(node, at, key, None),
        }
    }

    /// Consumes the synthesizer, returning every registered struct.
    #[must_use]
    pub fn finish(self) -> StructMap {
        self.registry.into_structs()
    }

    fn synthesize_reference(
        &mut self,
        reference: &str,
        from: &NodeId,
    ) -> Result<TypeDesc, TranspileError> {
        let target = self.resolver.resolve(reference, from.document())?;
        if let Some(ty) = self.resolved.get(&target.id) {
            return Ok(ty.clone());
        }

        let entered = self.in_flight.iter().position(|(id, _)| *id == target.id);
        if let Some(start) = entered {
            let opened_since = self.open_structs > self.in_flight[start].1;
            if let Some(name) = self.registry.lookup(&target.id) {
                if self.options.recursive_structs {
                    return Ok(TypeDesc::Struct(name.to_string()));
                }
            } else if !opened_since {
                // Nothing on the path can be forward-declared.
                return Err(self.cycle_error(start, &target.id));
            }
        }

        let key = self.target_key(&target.id);
        self.in_flight.push((target.id.clone(), self.open_structs));
        let result = self.synthesize(target.node, &target.id, &key);
        self.in_flight.pop();
        let ty = result?;
        self.resolved.insert(target.id, ty.clone());
        Ok(ty)
    }

    fn synthesize_struct(
        &mut self,
        node: &'a Schema,
        at: &NodeId,
        key: &str,
        extra: Option<&'a Schema>,
    ) -> Result<TypeDesc, TranspileError> {
        if let Some(name) = self.registry.lookup(at) {
            if !self.options.recursive_structs && !self.registry.is_defined(at) {
                return Err(TranspileError::CyclicReference {
                    chain: format!("{} -> {}", self.origin(at), self.origin(at)),
                });
            }
            return Ok(TypeDesc::Struct(name.to_string()));
        }

        let origin = self.origin(at);
        let qualifier = self.documents.get(at.document()).and_then(Document::stem);
        let name = self.registry.declare(
            at.clone(),
            &naming::type_name(node, key),
            &origin,
            qualifier,
        )?;
        self.open_structs += 1;

        let mut fields = BTreeMap::new();
        for (json_name, property) in &node.properties {
            let ty = self.synthesize(
                property,
                &at.join(Segment::Property(json_name.clone())),
                json_name,
            )?;
            let field_name = naming::unique_key(&fields, &naming::field_name(json_name));
            fields.insert(
                field_name.clone(),
                Field {
                    json_name: json_name.clone(),
                    name: field_name,
                    ty,
                    required: node.is_required(json_name),
                    description: property.description.clone(),
                },
            );
        }

        if let Some(extra) = extra {
            let value = self.synthesize(
                extra,
                &at.join(Segment::AdditionalProperties),
                &format!("{name}Value"),
            )?;
            let field_name = naming::unique_key(&fields, ADDITIONAL_PROPERTIES_FIELD);
            fields.insert(
                field_name.clone(),
                Field {
                    json_name: ADDITIONAL_PROPERTIES_JSON_NAME.to_string(),
                    name: field_name,
                    ty: TypeDesc::map_of(value),
                    required: false,
                    description: extra.description.clone(),
                },
            );
        }

        self.open_structs -= 1;
        self.registry.define(Struct {
            name: name.clone(),
            fields,
            description: node.description.clone(),
            origin,
        });
        Ok(TypeDesc::Struct(name))
    }

    /// Key naming a reference target: its definition or property key, or
    /// for the root or an unnamed node, the nearest named ancestor.
    fn target_key(&self, id: &NodeId) -> String {
        match id.pointer().key() {
            Some(name) => name.to_string(),
            None => self
                .documents
                .get(id.document())
                .map(|doc| self.root_key(doc))
                .unwrap_or_else(|| self.options.root_name.clone()),
        }
    }

    fn root_key(&self, doc: &Document) -> String {
        doc.stem()
            .map_or_else(|| self.options.root_name.clone(), str::to_string)
    }

    fn origin(&self, id: &NodeId) -> String {
        let document = self
            .documents
            .get(id.document())
            .map(Document::id)
            .unwrap_or_default();
        format!("{document}{}", id.pointer())
    }

    fn cycle_error(&self, start: usize, target: &NodeId) -> TranspileError {
        let chain = self.in_flight[start..]
            .iter()
            .map(|(id, _)| id)
            .chain(std::iter::once(target))
            .map(|id| self.origin(id))
            .collect::<Vec<_>>()
            .join(" -> ");
        TranspileError::CyclicReference { chain }
    }
}
