//! `$ref` resolution across the documents of one compilation.
//!
//! References take the form `[<document-id>]#<pointer>`. An empty document
//! part resolves in the referencing document; otherwise the document whose
//! identity matches is searched. Resolution returns the immediate target and
//! never follows a target that is itself a reference.

use crate::error::TranspileError;
use crate::registry::NodeId;
use structgen_schema::{Document, JsonPointer, Schema};

/// A resolved reference target.
#[derive(Debug, Clone)]
pub struct Resolved<'a> {
    /// Identity of the target node.
    pub id: NodeId,
    /// The target node.
    pub node: &'a Schema,
}

/// Resolves references against a fixed set of documents.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    documents: &'a [Document],
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the roots of one compilation.
    #[must_use]
    pub fn new(documents: &'a [Document]) -> Self {
        Self { documents }
    }

    /// Resolves `reference` as written in document number `current`.
    ///
    /// # Errors
    /// Returns `TranspileError::UnresolvedReference` if no document matches
    /// the identifier, the pointer is malformed, or it addresses no node.
    pub fn resolve(&self, reference: &str, current: usize) -> Result<Resolved<'a>, TranspileError> {
        let from = self
            .documents
            .get(current)
            .map(Document::id)
            .unwrap_or_default();
        let (document_id, fragment) = reference.split_once('#').unwrap_or((reference, ""));

        let document = if document_id.is_empty() {
            current
        } else {
            self.documents
                .iter()
                .position(|doc| doc.is_identified_by(document_id))
                .ok_or_else(|| {
                    TranspileError::unresolved(
                        reference,
                        from,
                        format!("no document with identity '{document_id}'"),
                    )
                })?
        };

        let pointer = JsonPointer::parse_fragment(fragment).ok_or_else(|| {
            TranspileError::unresolved(reference, from, "unsupported pointer syntax")
        })?;

        let node = self
            .documents
            .get(document)
            .and_then(|doc| doc.lookup(&pointer))
            .ok_or_else(|| {
                TranspileError::unresolved(reference, from, format!("no node at {pointer}"))
            })?;

        tracing::trace!(
            "Resolved '{}' from '{}' to document #{} at {}",
            reference,
            from,
            document,
            pointer
        );

        Ok(Resolved {
            id: NodeId::new(document, pointer),
            node,
        })
    }
}
