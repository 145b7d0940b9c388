//! Error types for declaration traversal.

use thiserror::Error;

/// Error that stops a traversal run.
///
/// Item-level mismatches (an untyped field, a multi-case clause, an
/// unresolvable annotation) never surface here; they are dropped.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// Registering a discovered type in the database failed.
    #[error("failed to register '{declaration}': {source}")]
    Registration {
        /// Name of the declaration being registered.
        declaration: String,
        /// Underlying database error.
        #[source]
        source: microscope_core::Error,
    },
}

impl TraversalError {
    /// Creates a registration error for the given declaration.
    pub fn registration(declaration: impl Into<String>, source: microscope_core::Error) -> Self {
        Self::Registration {
            declaration: declaration.into(),
            source,
        }
    }

    /// Returns the name of the declaration that caused the error.
    #[must_use]
    pub fn declaration(&self) -> &str {
        match self {
            Self::Registration { declaration, .. } => declaration,
        }
    }
}
