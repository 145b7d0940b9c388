//! End-to-end entry points.
//!
//! [`OpticsFactory`] wires a declaration parser, type extraction and lens
//! generation together. Loading and conversion failures collapse to `None`
//! with a log event; generation and writing return [`CodegenError`].

use microscope_codegen::{CodegenError, Generator, LensConfig};
use microscope_core::{SType, Structure, TypeDatabase};
use microscope_extract::{ConversionOptions, ExtractionSummary};
use microscope_syntax::{DeclarationParser, SourceFile, SwiftParser};
use std::path::{Path, PathBuf};

/// File extension accepted by [`OpticsFactory::parse_file`].
pub const SOURCE_EXTENSION: &str = "swift";

/// Parser, extraction options and lens settings bundled together.
#[derive(Debug, Clone, Default)]
pub struct OpticsFactory<P: DeclarationParser = SwiftParser> {
    parser: P,
    options: ConversionOptions,
    config: LensConfig,
}

impl OpticsFactory<SwiftParser> {
    /// Creates a factory using the bundled Swift parser and default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: DeclarationParser> OpticsFactory<P> {
    /// Creates a factory around an external parser.
    #[must_use]
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            options: ConversionOptions::default(),
            config: LensConfig::default(),
        }
    }

    /// Sets the extraction options.
    #[must_use]
    pub fn options(mut self, options: ConversionOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the lens generation settings.
    #[must_use]
    pub fn lens_config(mut self, config: LensConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the extraction options.
    #[must_use]
    pub fn conversion_options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Returns the lens generation settings.
    #[must_use]
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// Loads and parses a Swift source file.
    ///
    /// The path must exist and its file name must be exactly
    /// `<stem>.swift`. A missing file, a wrong name, an unreadable file and
    /// a parse failure all yield `None`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Option<SourceFile> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::debug!("No source file at {}", path.display());
            return None;
        }
        if !has_source_name(path) {
            tracing::debug!("Not a .{} file: {}", SOURCE_EXTENSION, path.display());
            return None;
        }

        let source = match std::fs::read_to_string(path) {
            Ok(source) => source,
            Err(e) => {
                tracing::debug!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };
        self.parse_source(&source)
    }

    /// Parses source text.
    pub fn parse_source(&self, source: &str) -> Option<SourceFile> {
        match self.parser.parse(source) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::debug!("Failed to parse source: {}", e);
                None
            }
        }
    }

    /// Extracts the types declared in `tree` into `database`.
    ///
    /// Returns `None` when a registration fault stops the run; the database
    /// keeps what was written before the fault.
    pub fn convert_types(
        &self,
        database: &mut TypeDatabase,
        tree: &SourceFile,
    ) -> Option<ExtractionSummary> {
        match microscope_extract::convert_types(database, tree, &self.options) {
            Ok(summary) => Some(summary),
            Err(e) => {
                tracing::warn!("Type conversion stopped: {}", e);
                None
            }
        }
    }

    /// Renders the lens source for one structure.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidIdentifier` if a name cannot be emitted.
    pub fn generate_structure_microscope(
        &self,
        package: &str,
        structure: &Structure,
    ) -> Result<String, CodegenError> {
        Generator::new(&self.config).generate(package, structure)
    }

    /// Writes one lens artifact per structure among `types` into `output_dir`.
    ///
    /// # Errors
    /// Returns `CodegenError` if `package` is invalid or writing fails.
    pub fn write_structure_microscope(
        &self,
        output_dir: impl AsRef<Path>,
        package: &str,
        types: &[SType],
    ) -> Result<Vec<PathBuf>, CodegenError> {
        microscope_codegen::write_structure_microscope(
            output_dir.as_ref(),
            package,
            types,
            &self.config,
        )
    }
}

fn has_source_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let mut parts = name.split('.');
    matches!(
        (parts.next(), parts.next(), parts.next()),
        (Some(stem), Some(SOURCE_EXTENSION), None) if !stem.is_empty()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::{LiteralType, RelationKind};
    use microscope_syntax::ParseError;
    use std::fs;
    use tempfile::TempDir;

    const SOURCE: &str = "
public struct IfStatement {
    public enum ElseClause {
        case elseIf(IfStatement)
        case `else`(CodeBlock)
    }
    public let condition: Expression
    public let elseClause: ElseClause?
}
";

    struct FailingParser;

    impl DeclarationParser for FailingParser {
        fn parse(&self, _source: &str) -> Result<SourceFile, ParseError> {
            Err(ParseError::eof("declaration"))
        }
    }

    #[test]
    fn test_source_name_validation() {
        assert!(has_source_name(Path::new("dir/Point.swift")));
        assert!(!has_source_name(Path::new("Point.swift.bak")));
        assert!(!has_source_name(Path::new("Point.tar.swift")));
        assert!(!has_source_name(Path::new(".swift")));
        assert!(!has_source_name(Path::new("Point.rs")));
        assert!(!has_source_name(Path::new("Point")));
    }

    #[test]
    fn test_parse_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("IfStatement.swift");
        fs::write(&path, SOURCE).expect("Failed to write source");

        let factory = OpticsFactory::new();
        let tree = factory.parse_file(&path).expect("Failed to parse");
        assert_eq!(tree.declarations.len(), 1);
    }

    #[test]
    fn test_parse_file_rejections() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let factory = OpticsFactory::new();

        assert!(factory.parse_file(dir.path().join("Missing.swift")).is_none());

        let wrong_extension = dir.path().join("IfStatement.txt");
        fs::write(&wrong_extension, SOURCE).expect("Failed to write source");
        assert!(factory.parse_file(&wrong_extension).is_none());

        let broken = dir.path().join("Broken.swift");
        fs::write(&broken, "struct {").expect("Failed to write source");
        assert!(factory.parse_file(&broken).is_none());

        let dir_named_swift = dir.path().join("Nested.swift");
        fs::create_dir(&dir_named_swift).expect("Failed to create dir");
        assert!(factory.parse_file(&dir_named_swift).is_none());
    }

    #[test]
    fn test_external_parser_failure() {
        let factory = OpticsFactory::with_parser(FailingParser);
        assert!(factory.parse_source(SOURCE).is_none());
    }

    #[test]
    fn test_convert_nested_types() {
        let factory = OpticsFactory::new();
        let tree = factory.parse_source(SOURCE).expect("Failed to parse");
        let mut db = TypeDatabase::new();

        let summary = factory.convert_types(&mut db, &tree).expect("Failed to convert");
        assert_eq!(summary.structures, vec!["IfStatement".to_string()]);
        assert_eq!(summary.choices, vec!["ElseClause".to_string()]);

        let containers =
            db.query_by_right(RelationKind::Encapsulates, &SType::named("ElseClause"));
        assert_eq!(containers, vec![SType::named("IfStatement")]);

        let structure = db
            .named("IfStatement")
            .and_then(LiteralType::as_structure)
            .expect("IfStatement registered");
        assert_eq!(
            structure.properties[1].ty,
            SType::optional(SType::named("IfStatement.ElseClause"))
        );
    }

    #[test]
    fn test_convert_strict_names_collision() {
        let factory = OpticsFactory::new().options(ConversionOptions::new().strict_names(true));
        let tree = factory
            .parse_source("struct Point { let x: Int }\nstruct Point { let y: Int }")
            .expect("Failed to parse");
        let mut db = TypeDatabase::new();

        assert!(factory.convert_types(&mut db, &tree).is_none());
        assert!(db.has_named("Point"));
    }

    #[test]
    fn test_generate_and_write() {
        let factory = OpticsFactory::new();
        let tree = factory
            .parse_source("struct Point { let x: Int; let y: Int }")
            .expect("Failed to parse");
        let mut db = TypeDatabase::new();
        factory.convert_types(&mut db, &tree).expect("Failed to convert");

        let point = db
            .named("Point")
            .and_then(LiteralType::as_structure)
            .expect("Point registered");
        let source = factory
            .generate_structure_microscope("Geometry", point)
            .expect("Failed to generate");
        assert!(source.contains("public class PointMicroscope"));
        assert!(source.contains("return Point(x: structure.x, y: value)"));

        let dir = TempDir::new().expect("Failed to create temp dir");
        let out = dir.path().join("Generated");
        let written = factory
            .write_structure_microscope(&out, "Geometry", &db.literal_stypes())
            .expect("Failed to write");
        assert_eq!(written, vec![out.join("PointMicroscope.swift")]);
        assert_eq!(
            fs::read_to_string(&written[0]).expect("Failed to read"),
            source
        );
    }

    #[test]
    fn test_invalid_package_writes_nothing() {
        let factory = OpticsFactory::new();
        let dir = TempDir::new().expect("Failed to create temp dir");
        let out = dir.path().join("Generated");

        let result = factory.write_structure_microscope(&out, "not valid", &[]);
        assert!(matches!(result, Err(CodegenError::InvalidIdentifier { .. })));
        assert!(!out.exists());
    }
}
