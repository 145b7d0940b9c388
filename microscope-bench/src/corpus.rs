//! Synthetic Swift sources for benchmarks.

/// Builds a source file with `structures` public structs of `fields` stored
/// properties each. Every struct nests a choice and conforms to a protocol.
/// Nested choice names are unique so every field resolves.
#[must_use]
pub fn swift_source(structures: usize, fields: usize) -> String {
    let mut source = String::from("import Foundation\n\npublic protocol Node {}\n");

    for s in 0..structures {
        source.push_str(&format!("\npublic struct Type{s}: Node, Base {{\n"));
        source.push_str(&format!("    public enum Kind{s} {{\n"));
        source.push_str("        case leaf\n");
        source.push_str(&format!("        case branch(Type{s}, Int)\n"));
        source.push_str("    }\n");
        for f in 0..fields {
            let ty = match f % 3 {
                0 => "Int".to_string(),
                1 => "String?".to_string(),
                _ => format!("Kind{s}"),
            };
            source.push_str(&format!("    public let field{f}: {ty}\n"));
        }
        source.push_str("    public var total: Int { return 0 }\n");
        source.push_str("    func describe() -> String { return \"\" }\n");
        source.push_str("}\n");
    }
    source
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::TypeDatabase;
    use microscope_extract::ConversionOptions;

    #[test]
    fn test_corpus_extracts_every_structure() {
        let source = swift_source(4, 5);
        let file = microscope_syntax::parse_source(&source).expect("Failed to parse");
        let mut db = TypeDatabase::new();
        let summary =
            microscope_extract::convert_types(&mut db, &file, &ConversionOptions::default())
                .expect("Failed to convert");

        assert_eq!(summary.structures.len(), 4);
        assert_eq!(db.structures().count(), 4);
        assert!(db.structures().all(|s| s.properties.len() == 5));
    }
}
