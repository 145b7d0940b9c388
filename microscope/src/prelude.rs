//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use microscope::prelude::*;
//! ```

pub use crate::factory::OpticsFactory;

// Type model
pub use microscope_core::{
    Choice, ChoiceOption, Error as CoreError, LiteralType, NamedReference, Property, Relation,
    RelationKind, SType, Structure, TypeDatabase,
};

// Parsing
pub use microscope_syntax::{DeclarationParser, ParseError, SourceFile, SwiftParser};

// Extraction
pub use microscope_extract::{ConversionOptions, ExtractionSummary, TraversalError};

// Generation
pub use microscope_codegen::{CodegenError, GeneratedArtifact, Generator, LensConfig};
