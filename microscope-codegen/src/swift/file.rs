//! Generated artifact layout.

use super::lens::LensDecl;
use std::fmt;

/// One generated source file holding the lenses of a structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroscopeFile {
    /// Imported modules in order.
    pub imports: Vec<String>,
    /// Access level of the generated class.
    pub access_level: String,
    /// Generated class name.
    pub class_name: String,
    /// One lens per property, in declared order.
    pub lenses: Vec<LensDecl>,
}

impl fmt::Display for MicroscopeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for import in &self.imports {
            writeln!(f, "import {import}")?;
        }
        writeln!(f)?;

        if self.access_level.is_empty() {
            writeln!(f, "class {}", self.class_name)?;
        } else {
            writeln!(f, "{} class {}", self.access_level, self.class_name)?;
        }
        writeln!(f, "{{")?;
        for (i, lens) in self.lenses.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{lens}")?;
        }
        writeln!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = MicroscopeFile {
            imports: vec!["Foundation".to_string(), "Focus".to_string(), "AST".to_string()],
            access_level: "public".to_string(),
            class_name: "EmptyMicroscope".to_string(),
            lenses: Vec::new(),
        };
        assert_eq!(
            file.to_string(),
            "import Foundation\nimport Focus\nimport AST\n\npublic class EmptyMicroscope\n{\n}\n"
        );
    }

    #[test]
    fn test_internal_class_without_modifier() {
        let file = MicroscopeFile {
            imports: vec!["Focus".to_string()],
            access_level: String::new(),
            class_name: "PointMicroscope".to_string(),
            lenses: Vec::new(),
        };
        assert!(file.to_string().contains("\nclass PointMicroscope\n"));
    }
}
