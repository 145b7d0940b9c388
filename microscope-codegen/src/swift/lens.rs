//! Lens declarations.

use crate::ident::{escape_declaration, escape_label};
use std::fmt;

/// Where a reconstructed property value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentSource {
    /// The value passed to the setter.
    NewValue,
    /// The property of the structure being updated.
    Existing,
}

/// One labelled argument of the memberwise initializer call in a setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorArgument {
    /// Argument label, equal to the property name.
    pub label: String,
    /// Value source.
    pub source: ArgumentSource,
}

impl ConstructorArgument {
    /// Creates a new argument.
    #[must_use]
    pub fn new(label: impl Into<String>, source: ArgumentSource) -> Self {
        Self {
            label: label.into(),
            source,
        }
    }
}

impl fmt::Display for ConstructorArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = escape_label(&self.label);
        match self.source {
            ArgumentSource::NewValue => write!(f, "{label}: value"),
            ArgumentSource::Existing => write!(f, "{label}: structure.{}", self.label),
        }
    }
}

/// Getter/setter pair focusing one property of a structure.
///
/// The setter rebuilds the whole structure positionally, in declared
/// property order, replacing only the focused property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensDecl {
    /// Generic lens type name.
    pub lens_type: String,
    /// Structure type name.
    pub structure: String,
    /// Focused property name.
    pub property: String,
    /// Rendered type of the focused property.
    pub field_type: String,
    /// Initializer arguments in declared property order.
    pub arguments: Vec<ConstructorArgument>,
}

impl LensDecl {
    /// Applies the getter to an in-memory record.
    ///
    /// Returns `None` if the record is of another type or lacks the property.
    #[must_use]
    pub fn get<'r, V>(&self, record: &'r Record<V>) -> Option<&'r V> {
        if record.type_name != self.structure {
            return None;
        }
        record.field(&self.property)
    }

    /// Applies the setter to an in-memory record, producing a new record.
    ///
    /// Returns `None` if the record is of another type or lacks a property
    /// the initializer call reads.
    #[must_use]
    pub fn set<V: Clone>(&self, record: &Record<V>, value: V) -> Option<Record<V>> {
        if record.type_name != self.structure {
            return None;
        }

        let mut fields = Vec::with_capacity(self.arguments.len());
        for argument in &self.arguments {
            let field = match argument.source {
                ArgumentSource::NewValue => value.clone(),
                ArgumentSource::Existing => record.field(&argument.label)?.clone(),
            };
            fields.push((argument.label.clone(), field));
        }

        Some(Record {
            type_name: self.structure.clone(),
            fields,
        })
    }

    fn lens_type_expr(&self) -> String {
        format!("{}<{}, {}>", self.lens_type, self.structure, self.field_type)
    }
}

impl fmt::Display for LensDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lens = self.lens_type_expr();
        let arguments = self
            .arguments
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");

        writeln!(
            f,
            "    var {}: {lens} = {lens}(",
            escape_declaration(&self.property)
        )?;
        writeln!(f, "        get:")?;
        writeln!(f, "        {{")?;
        writeln!(
            f,
            "            (structure: {}) -> {} in",
            self.structure, self.field_type
        )?;
        writeln!(f)?;
        writeln!(f, "            return structure.{}", self.property)?;
        writeln!(f, "        }},")?;
        writeln!(f)?;
        writeln!(f, "        set:")?;
        writeln!(f, "        {{")?;
        writeln!(
            f,
            "            (structure: {}, value: {}) -> {} in",
            self.structure, self.field_type, self.structure
        )?;
        writeln!(f)?;
        writeln!(f, "            return {}({arguments})", self.structure)?;
        writeln!(f, "        }}")?;
        writeln!(f, "    )")
    }
}

/// In-memory stand-in for a structure value, used to evaluate lenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<V> {
    /// Structure type name.
    pub type_name: String,
    /// Property values in declared order.
    pub fields: Vec<(String, V)>,
}

impl<V> Record<V> {
    /// Creates a record without fields.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: V) -> Self {
        self.fields.push((name.into(), value));
        self
    }

    /// Looks up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&V> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x_lens() -> LensDecl {
        LensDecl {
            lens_type: "SimpleLens".to_string(),
            structure: "Point".to_string(),
            property: "x".to_string(),
            field_type: "Int".to_string(),
            arguments: vec![
                ConstructorArgument::new("x", ArgumentSource::NewValue),
                ConstructorArgument::new("y", ArgumentSource::Existing),
            ],
        }
    }

    fn point(x: i64, y: i64) -> Record<i64> {
        Record::new("Point").with_field("x", x).with_field("y", y)
    }

    #[test]
    fn test_argument_display() {
        assert_eq!(
            ConstructorArgument::new("x", ArgumentSource::NewValue).to_string(),
            "x: value"
        );
        assert_eq!(
            ConstructorArgument::new("y", ArgumentSource::Existing).to_string(),
            "y: structure.y"
        );
        assert_eq!(
            ConstructorArgument::new("var", ArgumentSource::Existing).to_string(),
            "`var`: structure.var"
        );
    }

    #[test]
    fn test_lens_display() {
        let expected = "    var x: SimpleLens<Point, Int> = SimpleLens<Point, Int>(
        get:
        {
            (structure: Point) -> Int in

            return structure.x
        },

        set:
        {
            (structure: Point, value: Int) -> Point in

            return Point(x: value, y: structure.y)
        }
    )
";
        assert_eq!(x_lens().to_string(), expected);
    }

    #[test]
    fn test_keyword_property_is_escaped() {
        let lens = LensDecl {
            property: "default".to_string(),
            arguments: vec![ConstructorArgument::new("default", ArgumentSource::NewValue)],
            ..x_lens()
        };
        let rendered = lens.to_string();
        assert!(rendered.starts_with("    var `default`: SimpleLens<Point, Int>"));
        assert!(rendered.contains("return structure.default"));
        assert!(rendered.contains("return Point(default: value)"));
    }

    #[test]
    fn test_get_and_set() {
        let lens = x_lens();
        let original = point(1, 2);

        assert_eq!(lens.get(&original), Some(&1));
        assert_eq!(lens.set(&original, 10), Some(point(10, 2)));
        assert_eq!(original, point(1, 2));
    }

    #[test]
    fn test_lens_laws() {
        let lens = x_lens();
        for (x, y, v) in [(0, 0, 5), (-3, 7, -3), (i64::MAX, 1, i64::MIN)] {
            let s = point(x, y);
            let updated = lens.set(&s, v).expect("set");
            assert_eq!(lens.get(&updated), Some(&v));

            let current = *lens.get(&s).expect("get");
            assert_eq!(lens.set(&s, current), Some(s));
        }
    }

    #[test]
    fn test_mismatched_record() {
        let lens = x_lens();
        let other = Record::new("Size").with_field("x", 1).with_field("y", 2);
        assert_eq!(lens.get(&other), None);
        assert_eq!(lens.set(&other, 3), None);

        let partial = Record::new("Point").with_field("x", 1);
        assert_eq!(lens.set(&partial, 3), None);
    }
}
