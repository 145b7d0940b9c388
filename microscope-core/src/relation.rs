//! Directed type relations.

use crate::types::SType;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relation kind.
///
/// For a composite with supertype list `[A, B, C]` the first entry is the
/// primary conformance and yields `Implements`; every later entry yields
/// `Inherits`. The split is positional only and does not reflect whether a
/// supertype is a class or a protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RelationKind {
    /// Primary declared conformance (first supertype).
    Implements,
    /// Secondary listed supertype.
    Inherits,
    /// Container to nested type containment.
    Encapsulates,
}

impl RelationKind {
    /// Returns the relation kind name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Implements => "implements",
            Self::Inherits => "inherits",
            Self::Encapsulates => "encapsulates",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge between two types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Relation {
    /// Relation kind.
    pub kind: RelationKind,
    /// Source endpoint.
    pub left: SType,
    /// Target endpoint.
    pub right: SType,
}

impl Relation {
    /// Creates a new relation.
    #[must_use]
    pub fn new(kind: RelationKind, left: SType, right: SType) -> Self {
        Self { kind, left, right }
    }

    /// Creates an `Implements(left, right)` relation.
    #[must_use]
    pub fn implements(left: SType, right: SType) -> Self {
        Self::new(RelationKind::Implements, left, right)
    }

    /// Creates an `Inherits(left, right)` relation.
    #[must_use]
    pub fn inherits(left: SType, right: SType) -> Self {
        Self::new(RelationKind::Inherits, left, right)
    }

    /// Creates an `Encapsulates(container, member)` relation.
    #[must_use]
    pub fn encapsulates(container: SType, member: SType) -> Self {
        Self::new(RelationKind::Encapsulates, container, member)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.kind, self.right)
    }
}
