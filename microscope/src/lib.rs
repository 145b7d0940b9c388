//! # Microscope
//!
//! Type extraction and lens generation for Swift declarations.
//!
//! Microscope reads Swift source declarations, records the types they
//! declare and how those types relate, and generates a lens (a getter plus
//! a whole-value-rebuilding setter) for every stored property.
//!
//! ## Quick Start
//!
//! ```rust
//! use microscope::prelude::*;
//!
//! let factory = OpticsFactory::new();
//! let tree = factory
//!     .parse_source("public struct Point { public let x: Int; public let y: Int }")
//!     .unwrap();
//!
//! let mut database = TypeDatabase::new();
//! factory.convert_types(&mut database, &tree).unwrap();
//!
//! let point = database.named("Point").and_then(LiteralType::as_structure).unwrap();
//! let lenses = factory.generate_structure_microscope("Geometry", point).unwrap();
//! assert!(lenses.contains("return Point(x: value, y: structure.y)"));
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Type model, relations and the type database
//! - [`syntax`] - Declaration tree and the bundled Swift parser
//! - [`extract`] - Declaration traversal and type resolution
//! - [`codegen`] - Lens output model, generator and writer

pub mod factory;
pub mod prelude;

pub use factory::OpticsFactory;

/// Type model, relations and the type database.
pub mod core {
    pub use microscope_core::*;
}

/// Declaration tree and parser.
pub mod syntax {
    pub use microscope_syntax::*;
}

/// Declaration traversal and type resolution.
pub mod extract {
    pub use microscope_extract::*;
}

/// Lens code generation.
pub mod codegen {
    pub use microscope_codegen::*;
}
