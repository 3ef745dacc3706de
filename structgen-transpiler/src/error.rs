//! Error types for compilation.

use thiserror::Error;

/// Error type for compilation operations.
#[derive(Debug, Error)]
pub enum TranspileError {
    /// Schema loading error.
    #[error("schema parse error: {0}")]
    Parse(#[from] structgen_schema::ParseError),

    /// A `$ref` names a document or definition that cannot be found.
    #[error("unresolved reference '{reference}' in document '{document}': {reason}")]
    UnresolvedReference {
        /// Reference as written.
        reference: String,
        /// Identity of the referencing document.
        document: String,
        /// Why resolution failed.
        reason: String,
    },

    /// A node's declared type is unrecognized and nothing else disambiguates it.
    #[error("invalid schema shape at '{location}': unrecognized type '{type_name}'")]
    InvalidSchemaShape {
        /// Node location.
        location: String,
        /// Declared type.
        type_name: String,
    },

    /// A reference chain revisits a node that cannot be forward-declared.
    #[error("cyclic reference detected: {chain}")]
    CyclicReference {
        /// Locations along the cycle.
        chain: String,
    },

    /// Two distinct schema nodes would share one type name.
    #[error("type name '{name}' is claimed by both '{first}' and '{second}'")]
    NameCollision {
        /// Contested name.
        name: String,
        /// Location of the node that owns the name.
        first: String,
        /// Location of the node that wanted it.
        second: String,
    },

    /// Two roots declare the same identity.
    #[error("duplicate document identity '{id}'")]
    DuplicateDocument {
        /// Document identity.
        id: String,
    },
}

impl TranspileError {
    /// Creates an unresolved reference error.
    pub fn unresolved(
        reference: impl Into<String>,
        document: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnresolvedReference {
            reference: reference.into(),
            document: document.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid schema shape error.
    pub fn invalid_shape(location: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::InvalidSchemaShape {
            location: location.into(),
            type_name: type_name.into(),
        }
    }
}
