//! Error types for Microscope core operations.

use thiserror::Error;

/// Core error type for type database operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A different type is already registered under this name.
    #[error("type name '{name}' is already registered with a different definition")]
    NameCollision {
        /// Colliding type name.
        name: String,
    },
}

/// Result type alias for Microscope core operations.
pub type Result<T> = std::result::Result<T, Error>;
