//! # Microscope Codegen
//!
//! Lens code generation for extracted structures.
//!
//! This crate provides:
//! - A Swift output model rendering one lens class per structure
//! - Identifier validation for every emitted name
//! - An artifact writer producing `<Name>Microscope.swift` files
//! - In-memory lens evaluation over [`swift::Record`] values

pub mod config;
pub mod error;
pub mod generator;
pub mod ident;
pub mod swift;
pub mod writer;

pub use config::LensConfig;
pub use error::CodegenError;
pub use generator::{GeneratedArtifact, Generator};
pub use writer::write_structure_microscope;

use microscope_core::TypeDatabase;
use microscope_extract::ConversionOptions;

/// Generates lens artifacts for the structures declared in Swift source.
///
/// # Arguments
/// * `source` - Swift source content
/// * `package` - Module imported by every artifact
///
/// # Returns
/// Generated artifacts ordered by file name.
///
/// # Errors
/// Returns `CodegenError` if parsing, extraction, or generation fails.
pub fn generate_from_source(
    source: &str,
    package: &str,
) -> Result<Vec<GeneratedArtifact>, CodegenError> {
    let file = microscope_syntax::parse_source(source)?;
    let mut database = TypeDatabase::new();
    microscope_extract::convert_types(&mut database, &file, &ConversionOptions::default())?;

    let config = LensConfig::default();
    let generator = Generator::new(&config);
    let mut artifacts = generator.generate_all(package, &database.literal_stypes())?;
    artifacts.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(artifacts)
}

/// Generates lens artifacts for the structures declared in a Swift file.
///
/// # Arguments
/// * `path` - Path to the Swift source file
/// * `package` - Module imported by every artifact
///
/// # Returns
/// Generated artifacts ordered by file name.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, extraction, or generation fails.
pub fn generate_from_file(
    path: &std::path::Path,
    package: &str,
) -> Result<Vec<GeneratedArtifact>, CodegenError> {
    let source = std::fs::read_to_string(path)?;
    generate_from_source(&source, package)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHAPES: &str = r#"
import Foundation

public struct Size {
    public let width: Double
    public let height: Double
}

public struct Shape {
    public enum Kind {
        case circle
        case square
    }

    public let kind: Kind
    public let size: Size?
    public var area: Double { size.map { $0.width * $0.height } ?? 0 }
}
"#;

    #[test]
    fn test_generate_from_source() {
        let artifacts = generate_from_source(SHAPES, "Shapes").expect("Failed to generate");
        let names: Vec<_> = artifacts.iter().map(|a| a.file_name.as_str()).collect();
        assert_eq!(names, vec!["ShapeMicroscope.swift", "SizeMicroscope.swift"]);

        let shape = &artifacts[0].contents;
        assert!(shape.contains("import Shapes\n"));
        assert!(shape.contains("var kind: SimpleLens<Shape, Shape.Kind>"));
        assert!(shape.contains("var size: SimpleLens<Shape, Size?>"));
        assert!(shape.contains("return Shape(kind: value, size: structure.size)"));
        assert!(!shape.contains("var area"));
    }

    #[test]
    fn test_generate_from_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("Shapes.swift");
        std::fs::write(&path, SHAPES).expect("Failed to write source");

        let artifacts = generate_from_file(&path, "Shapes").expect("Failed to generate");
        assert_eq!(artifacts.len(), 2);
    }

    #[test]
    fn test_generate_from_source_parse_error() {
        let result = generate_from_source("struct Broken {", "Shapes");
        assert!(matches!(result, Err(CodegenError::Parse(_))));
    }

    #[test]
    fn test_generate_from_missing_file() {
        let path = std::path::Path::new("/nonexistent/Shapes.swift");
        let result = generate_from_file(path, "Shapes");
        assert!(matches!(result, Err(CodegenError::Io(_))));
    }
}
