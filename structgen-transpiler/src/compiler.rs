//! Compilation driver and its configuration.

use crate::error::TranspileError;
use crate::ir::StructMap;
use crate::registry::CollisionPolicy;
use crate::synth::Synthesizer;
use std::collections::HashSet;
use structgen_schema::Document;

/// Fallback name for a root with neither a title nor a document identity.
pub const DEFAULT_ROOT_NAME: &str = "Root";

/// Settings for one compilation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// How to handle distinct nodes deriving the same type name.
    pub collision_policy: CollisionPolicy,
    /// Whether a struct may refer to itself through a forward declaration.
    pub recursive_structs: bool,
    /// Name key of a root with neither a title nor a document identity.
    pub root_name: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::default(),
            recursive_structs: true,
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

/// Builder for configuring and running compilations.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    /// Creates a compiler with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name collision policy.
    #[must_use]
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.options.collision_policy = policy;
        self
    }

    /// Allows or forbids self-referencing structs.
    #[must_use]
    pub fn recursive_structs(mut self, allow: bool) -> Self {
        self.options.recursive_structs = allow;
        self
    }

    /// Sets the fallback root name.
    #[must_use]
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.options.root_name = name.into();
        self
    }

    /// Returns the current settings.
    #[must_use]
    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compiles a set of initialized root documents into one struct namespace.
    ///
    /// Roots are walked in order and share one registry, so a definition
    /// referenced from several roots yields a single struct. A root that is
    /// an array contributes only the structs of its items.
    ///
    /// # Errors
    /// Returns the first `TranspileError` met; no partial result is returned.
    pub fn compile(&self, documents: &[Document]) -> Result<StructMap, TranspileError> {
        let mut seen = HashSet::new();
        for doc in documents {
            if !doc.id().is_empty() && !seen.insert(doc.id()) {
                return Err(TranspileError::DuplicateDocument {
                    id: doc.id().to_string(),
                });
            }
        }

        let mut synthesizer = Synthesizer::new(documents, &self.options);
        for index in 0..documents.len() {
            synthesizer.synthesize_root(index)?;
        }

        let definitions: usize = documents.iter().map(|doc| doc.definitions().len()).sum();
        let structs = synthesizer.finish();
        tracing::debug!(
            "Compiled {} root schema(s) with {} definition(s) into {} struct(s)",
            documents.len(),
            definitions,
            structs.len()
        );
        Ok(structs)
    }
}
