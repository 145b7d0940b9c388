//! Semantic type definitions.
//!
//! This module contains the data structures describing the types discovered
//! in source declarations: named references, structures, choices and
//! optionals. Equality and hashing are structural so that identical types
//! collapse when stored in a set.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A semantic type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SType {
    /// Reference to a type by its (possibly qualified) name.
    Named(NamedReference),
    /// Inline literal type.
    Literal(LiteralType),
}

impl SType {
    /// Creates a named type reference.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedReference::new(name))
    }

    /// Wraps a type in an optional literal.
    #[must_use]
    pub fn optional(inner: SType) -> Self {
        Self::Literal(LiteralType::Optional(Box::new(inner)))
    }

    /// Returns the referenced name for a named type.
    #[must_use]
    pub fn as_named(&self) -> Option<&str> {
        match self {
            Self::Named(named) => Some(&named.name),
            Self::Literal(_) => None,
        }
    }

    /// Returns the literal type, if this is one.
    #[must_use]
    pub fn as_literal(&self) -> Option<&LiteralType> {
        match self {
            Self::Named(_) => None,
            Self::Literal(literal) => Some(literal),
        }
    }

    /// Returns the structure, if this is a structure literal.
    #[must_use]
    pub fn as_structure(&self) -> Option<&Structure> {
        self.as_literal().and_then(LiteralType::as_structure)
    }
}

impl From<LiteralType> for SType {
    fn from(literal: LiteralType) -> Self {
        Self::Literal(literal)
    }
}

impl From<NamedReference> for SType {
    fn from(named: NamedReference) -> Self {
        Self::Named(named)
    }
}

impl fmt::Display for SType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(named) => write!(f, "{}", named.name),
            Self::Literal(literal) => write!(f, "{literal}"),
        }
    }
}

/// Named type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NamedReference {
    /// Type name, dot-qualified when nested (`Container.Member`).
    pub name: String,
}

impl NamedReference {
    /// Creates a new named reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns a reference qualified by its container (`Container.Name`).
    #[must_use]
    pub fn qualified(container: &str, name: &str) -> Self {
        Self::new(format!("{container}.{name}"))
    }
}

/// Literal type variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LiteralType {
    /// Product type with ordered fields.
    Structure(Structure),
    /// Sum type with ordered cases.
    Choice(Choice),
    /// Optional wrapper around another type.
    Optional(Box<SType>),
}

impl LiteralType {
    /// Returns the declared name for structures and choices.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Structure(s) => Some(&s.name),
            Self::Choice(c) => Some(&c.name),
            Self::Optional(_) => None,
        }
    }

    /// Returns the structure, if this is one.
    #[must_use]
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the choice, if this is one.
    #[must_use]
    pub fn as_choice(&self) -> Option<&Choice> {
        match self {
            Self::Choice(c) => Some(c),
            _ => None,
        }
    }

    /// Returns true if this is a structure.
    #[must_use]
    pub const fn is_structure(&self) -> bool {
        matches!(self, Self::Structure(_))
    }

    /// Returns true if this is a choice.
    #[must_use]
    pub const fn is_choice(&self) -> bool {
        matches!(self, Self::Choice(_))
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure(s) => write!(f, "{}", s.name),
            Self::Choice(c) => write!(f, "{}", c.name),
            Self::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

/// Extracted composite (record) type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Structure {
    /// Type name.
    pub name: String,
    /// Stored properties in declaration order.
    pub properties: Vec<Property>,
}

impl Structure {
    /// Creates a new structure.
    #[must_use]
    pub fn new(name: impl Into<String>, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Looks up a property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// A stored property of a structure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Property {
    /// Property name.
    pub name: String,
    /// Property type.
    pub ty: SType,
}

impl Property {
    /// Creates a new property.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: SType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Extracted sum type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Choice {
    /// Type name.
    pub name: String,
    /// Cases in declaration order.
    pub options: Vec<ChoiceOption>,
}

impl Choice {
    /// Creates a new choice.
    #[must_use]
    pub fn new(name: impl Into<String>, options: Vec<ChoiceOption>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }
}

/// A single case of a choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChoiceOption {
    /// Case name.
    pub name: String,
    /// Payload types; empty for a case without payload.
    pub payload: Vec<SType>,
}

impl ChoiceOption {
    /// Creates a new case.
    #[must_use]
    pub fn new(name: impl Into<String>, payload: Vec<SType>) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Returns true if the case carries no payload.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        self.payload.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_structural_equality() {
        let a = Structure::new("Point", vec![Property::new("x", SType::named("Int"))]);
        let b = Structure::new("Point", vec![Property::new("x", SType::named("Int"))]);
        let c = Structure::new("Point", vec![Property::new("y", SType::named("Int"))]);

        assert_eq!(a, b);
        assert_ne!(a, c);

        let mut set = HashSet::new();
        set.insert(LiteralType::Structure(a));
        set.insert(LiteralType::Structure(b));
        set.insert(LiteralType::Structure(c));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_property_order_is_significant() {
        let xy = Structure::new(
            "Point",
            vec![
                Property::new("x", SType::named("Int")),
                Property::new("y", SType::named("Int")),
            ],
        );
        let yx = Structure::new(
            "Point",
            vec![
                Property::new("y", SType::named("Int")),
                Property::new("x", SType::named("Int")),
            ],
        );
        assert_ne!(xy, yx);
    }

    #[test]
    fn test_display() {
        assert_eq!(SType::named("Int").to_string(), "Int");
        assert_eq!(SType::optional(SType::named("Label")).to_string(), "Label?");

        let choice = LiteralType::Choice(Choice::new("Kind", vec![]));
        assert_eq!(SType::from(choice).to_string(), "Kind");
    }

    #[test]
    fn test_qualified_reference() {
        let named = NamedReference::qualified("IfStatement", "ElseClause");
        assert_eq!(named.name, "IfStatement.ElseClause");
    }

    #[test]
    fn test_accessors() {
        let structure = Structure::new("S", vec![Property::new("a", SType::named("A"))]);
        let ty = SType::from(LiteralType::Structure(structure.clone()));

        assert_eq!(ty.as_structure(), Some(&structure));
        assert!(ty.as_named().is_none());
        assert_eq!(structure.property("a").map(|p| &p.ty), Some(&SType::named("A")));
        assert!(structure.property("b").is_none());
        assert!(ChoiceOption::new("none", vec![]).is_unit());
    }
}
