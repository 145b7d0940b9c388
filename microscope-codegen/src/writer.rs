//! Artifact writer.

use crate::config::LensConfig;
use crate::error::CodegenError;
use crate::generator::Generator;
use microscope_core::SType;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes one lens artifact per structure among `types` into `output_dir`.
///
/// The directory is created when absent. Existing artifacts are
/// overwritten. Types other than structure literals are skipped.
///
/// # Arguments
/// * `output_dir` - Directory receiving the artifacts
/// * `package` - Module imported by every artifact
/// * `types` - Candidate types, typically `TypeDatabase::literal_stypes`
/// * `config` - Naming and template settings
///
/// # Returns
/// Paths of the written files.
///
/// # Errors
/// Returns `CodegenError` if the directory cannot be created, a file
/// cannot be written, or `package` is not a valid module name.
pub fn write_structure_microscope(
    output_dir: &Path,
    package: &str,
    types: &[SType],
    config: &LensConfig,
) -> Result<Vec<PathBuf>, CodegenError> {
    let artifacts = Generator::new(config).generate_all(package, types)?;
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let path = output_dir.join(&artifact.file_name);
        fs::write(&path, artifact.contents)?;
        tracing::info!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::{Choice, LiteralType, Property, Structure, TypeDatabase};
    use microscope_extract::ConversionOptions;
    use tempfile::TempDir;

    fn structure(name: &str, fields: &[&str]) -> SType {
        let properties = fields
            .iter()
            .map(|f| Property::new(*f, SType::named("Int")))
            .collect();
        SType::Literal(LiteralType::Structure(Structure::new(name, properties)))
    }

    #[test]
    fn test_writes_one_file_per_structure() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let types = vec![
            structure("Point", &["x", "y"]),
            structure("Size", &["width"]),
            SType::Literal(LiteralType::Choice(Choice::new("Mode", vec![]))),
            SType::named("Int"),
        ];

        let mut written =
            write_structure_microscope(dir.path(), "Geometry", &types, &LensConfig::default())
                .expect("Failed to write");
        written.sort();

        assert_eq!(
            written,
            vec![
                dir.path().join("PointMicroscope.swift"),
                dir.path().join("SizeMicroscope.swift"),
            ]
        );
        let contents = fs::read_to_string(&written[0]).expect("Failed to read");
        assert!(contents.contains("return Point(x: value, y: structure.y)"));
        assert_eq!(fs::read_dir(dir.path()).expect("Failed to list").count(), 2);
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let nested = dir.path().join("Sources").join("Optics");

        write_structure_microscope(
            &nested,
            "Geometry",
            &[structure("Point", &["x"])],
            &LensConfig::default(),
        )
        .expect("Failed to write");
        assert!(nested.join("PointMicroscope.swift").is_file());
    }

    #[test]
    fn test_overwrites_existing_artifact() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("PointMicroscope.swift");
        fs::write(&path, "stale").expect("Failed to seed");

        write_structure_microscope(
            dir.path(),
            "Geometry",
            &[structure("Point", &["x"])],
            &LensConfig::default(),
        )
        .expect("Failed to write");
        let contents = fs::read_to_string(&path).expect("Failed to read");
        assert!(contents.starts_with("import Foundation\n"));
    }

    #[test]
    fn test_skips_invalid_structure() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let types = vec![structure("Point", &["x"]), structure("Bad", &["not valid"])];

        let written =
            write_structure_microscope(dir.path(), "Geometry", &types, &LensConfig::default())
                .expect("Failed to write");
        assert_eq!(written, vec![dir.path().join("PointMicroscope.swift")]);
    }

    #[test]
    fn test_unusable_directory_writes_nothing() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = dir.path().join("taken");
        fs::write(&blocker, "file").expect("Failed to seed");

        let result = write_structure_microscope(
            &blocker.join("out"),
            "Geometry",
            &[structure("Point", &["x"])],
            &LensConfig::default(),
        );
        assert!(matches!(result, Err(CodegenError::Io(_))));
        assert_eq!(fs::read_dir(dir.path()).expect("Failed to list").count(), 1);
    }

    #[test]
    fn test_invalid_package_is_rejected() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let out = dir.path().join("out");
        let result = write_structure_microscope(
            &out,
            "not a module",
            &[structure("Point", &["x"])],
            &LensConfig::default(),
        );
        assert!(matches!(result, Err(CodegenError::InvalidIdentifier { .. })));
        assert!(!out.exists());
    }

    #[test]
    fn test_redeclared_structure_writes_current_registration() {
        let file = microscope_syntax::parse_source(
            "struct Dup { let a: Int }\nstruct Dup { let b: Int }",
        )
        .expect("Failed to parse");
        let mut db = TypeDatabase::new();
        microscope_extract::convert_types(&mut db, &file, &ConversionOptions::default())
            .expect("Failed to convert");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let types = db.literal_stypes();
        let written = write_structure_microscope(dir.path(), "P", &types, &LensConfig::default())
            .expect("Failed to write");
        assert_eq!(written, vec![dir.path().join("DupMicroscope.swift")]);

        let current = db
            .named("Dup")
            .and_then(LiteralType::as_structure)
            .expect("Dup registered");
        let expected = Generator::new(&LensConfig::default())
            .generate("P", current)
            .expect("Failed to generate");
        let contents = fs::read_to_string(&written[0]).expect("Failed to read");
        assert_eq!(contents, expected);
        assert!(contents.contains("var b: SimpleLens<Dup, Int>"));
    }

    #[test]
    fn test_custom_suffix_and_extension() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = LensConfig::new().suffix("Lenses").extension("generated.swift");

        let written = write_structure_microscope(
            dir.path(),
            "Geometry",
            &[structure("Point", &["x"])],
            &config,
        )
        .expect("Failed to write");
        assert_eq!(written, vec![dir.path().join("PointLenses.generated.swift")]);
    }
}
