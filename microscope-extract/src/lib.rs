//! # Microscope Extract
//!
//! Declaration traversal and type resolution.
//!
//! This crate provides:
//! - `TypeVisitor`, which walks parsed declarations and fills a `TypeDatabase`
//! - The field type resolver with containment qualification
//! - `ConversionOptions` selecting which declarations are extracted
//!
//! # Relation convention
//!
//! The first supertype listed by a composite is recorded as
//! `Implements(Self, Super)`; every later one as `Inherits(Self, Super)`.
//! The split is positional: the source syntax does not distinguish a
//! superclass from a protocol conformance.

pub mod error;
pub mod options;
pub mod resolver;
pub mod traversal;

pub use error::TraversalError;
pub use options::ConversionOptions;
pub use resolver::resolve_type_annotation;
pub use traversal::{ExtractionSummary, TypeVisitor};

use microscope_core::TypeDatabase;
use microscope_syntax::SourceFile;

/// Extracts the types declared in `file` into `database`.
///
/// # Arguments
/// * `database` - Database receiving literals, names and relations
/// * `file` - Parsed declaration tree
/// * `options` - Extraction options
///
/// # Returns
/// The names registered by this run.
///
/// # Errors
/// Returns `TraversalError` if a registration fault stops the run. The
/// database keeps everything written before the fault.
pub fn convert_types(
    database: &mut TypeDatabase,
    file: &SourceFile,
    options: &ConversionOptions,
) -> Result<ExtractionSummary, TraversalError> {
    let mut visitor = TypeVisitor::new(database, options);
    visitor.visit_source_file(file)?;
    let summary = visitor.finish();

    tracing::info!(
        "Converted {} structures, {} choices, {} new relations",
        summary.structures.len(),
        summary.choices.len(),
        summary.new_relations
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::SType;

    #[test]
    fn test_convert_types_batch() {
        let mut db = TypeDatabase::new();
        let options = ConversionOptions::default();

        let container = microscope_syntax::parse_source(
            "public class Outer { public enum Mode { case on, off\n case idle } }",
        )
        .expect("Failed to parse");
        let user = microscope_syntax::parse_source("struct User { let mode: Mode }")
            .expect("Failed to parse");

        let first = convert_types(&mut db, &container, &options).expect("Failed to convert");
        assert_eq!(first.structures, vec!["Outer"]);
        assert_eq!(first.choices, vec!["Mode"]);

        convert_types(&mut db, &user, &options).expect("Failed to convert");
        let user = db
            .named("User")
            .and_then(|t| t.as_structure())
            .expect("structure registered");
        assert_eq!(user.properties[0].ty, SType::named("Outer.Mode"));
    }
}
