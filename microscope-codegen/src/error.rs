//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Source parsing error.
    #[error("source parse error: {0}")]
    Parse(#[from] microscope_syntax::ParseError),

    /// Type extraction error.
    #[error("type extraction error: {0}")]
    Traversal(#[from] microscope_extract::TraversalError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Name that cannot be emitted as a Swift identifier.
    #[error("invalid identifier '{identifier}' for {context}")]
    InvalidIdentifier {
        /// Offending name.
        identifier: String,
        /// Where the name was going to be used.
        context: String,
    },
}

impl CodegenError {
    /// Creates an invalid identifier error.
    pub fn invalid_identifier(identifier: impl Into<String>, context: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            identifier: identifier.into(),
            context: context.into(),
        }
    }
}
