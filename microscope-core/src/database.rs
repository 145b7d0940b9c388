//! In-memory type relation database.
//!
//! The database is populated by a single traversal pass and read afterwards
//! by the resolver and the code generator. It has no removal operation; a
//! fresh instance is built for every run. Literal types keep their
//! insertion order.

use crate::error::{Error, Result};
use crate::relation::{Relation, RelationKind};
use crate::types::{Choice, LiteralType, SType, Structure};
use std::collections::{HashMap, HashSet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Store of discovered literal types, named registrations and relations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeDatabase {
    literals: Vec<LiteralType>,
    named: HashMap<String, LiteralType>,
    relations: HashSet<Relation>,
}

impl TypeDatabase {
    /// Creates an empty database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a literal type. Returns `false` if an identical type was
    /// already present.
    pub fn add_literal_type(&mut self, ty: LiteralType) -> bool {
        if self.literals.contains(&ty) {
            return false;
        }
        self.literals.push(ty);
        true
    }

    /// Registers a type under a name, replacing any earlier registration.
    ///
    /// Returns the registration that was replaced, if any.
    pub fn add_named_type(
        &mut self,
        name: impl Into<String>,
        ty: LiteralType,
    ) -> Option<LiteralType> {
        self.named.insert(name.into(), ty)
    }

    /// Registers a type under a name, rejecting a conflicting registration.
    ///
    /// Registering an identical type under the same name again succeeds.
    ///
    /// # Errors
    /// Returns `Error::NameCollision` if a different type already holds the name.
    pub fn try_add_named_type(&mut self, name: impl Into<String>, ty: LiteralType) -> Result<()> {
        let name = name.into();
        match self.named.get(&name) {
            Some(existing) if *existing != ty => Err(Error::NameCollision { name }),
            Some(_) => Ok(()),
            None => {
                self.named.insert(name, ty);
                Ok(())
            }
        }
    }

    /// Inserts a relation. Returns `false` if it was already present.
    pub fn add_relation(&mut self, relation: Relation) -> bool {
        self.relations.insert(relation)
    }

    /// Returns the left endpoints of all relations of `kind` whose right
    /// endpoint equals `right`.
    #[must_use]
    pub fn query_by_right(&self, kind: RelationKind, right: &SType) -> Vec<SType> {
        self.relations
            .iter()
            .filter(|r| r.kind == kind && r.right == *right)
            .map(|r| r.left.clone())
            .collect()
    }

    /// Returns the right endpoints of all relations of `kind` whose left
    /// endpoint equals `left`.
    #[must_use]
    pub fn query_by_left(&self, kind: RelationKind, left: &SType) -> Vec<SType> {
        self.relations
            .iter()
            .filter(|r| r.kind == kind && r.left == *left)
            .map(|r| r.right.clone())
            .collect()
    }

    /// Looks up a type by its registered name.
    #[must_use]
    pub fn named(&self, name: &str) -> Option<&LiteralType> {
        self.named.get(name)
    }

    /// Returns true if a type is registered under the name.
    #[must_use]
    pub fn has_named(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Returns true if the literal type is present.
    #[must_use]
    pub fn contains_literal(&self, ty: &LiteralType) -> bool {
        self.literals.contains(ty)
    }

    /// Returns true if the relation is present.
    #[must_use]
    pub fn contains_relation(&self, relation: &Relation) -> bool {
        self.relations.contains(relation)
    }

    /// Iterates over all literal types in insertion order.
    pub fn literals(&self) -> impl Iterator<Item = &LiteralType> {
        self.literals.iter()
    }

    /// Iterates over all named registrations.
    pub fn named_types(&self) -> impl Iterator<Item = (&str, &LiteralType)> {
        self.named.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    /// Iterates over all relations.
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Iterates over all structure literals.
    pub fn structures(&self) -> impl Iterator<Item = &Structure> {
        self.literals.iter().filter_map(LiteralType::as_structure)
    }

    /// Iterates over all choice literals.
    pub fn choices(&self) -> impl Iterator<Item = &Choice> {
        self.literals.iter().filter_map(LiteralType::as_choice)
    }

    /// Returns the current literal types wrapped as `SType`, the input shape
    /// the lens writer consumes.
    ///
    /// A literal whose name now maps to a different registration is
    /// superseded and left out, so every name appears at most once.
    #[must_use]
    pub fn literal_stypes(&self) -> Vec<SType> {
        self.literals
            .iter()
            .filter(|ty| !self.is_superseded(ty))
            .cloned()
            .map(SType::Literal)
            .collect()
    }

    fn is_superseded(&self, ty: &LiteralType) -> bool {
        ty.name()
            .and_then(|name| self.named.get(name))
            .is_some_and(|current| current != ty)
    }

    /// Number of literal types.
    #[must_use]
    pub fn literal_count(&self) -> usize {
        self.literals.len()
    }

    /// Number of named registrations.
    #[must_use]
    pub fn named_count(&self) -> usize {
        self.named.len()
    }

    /// Number of relations.
    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty() && self.named.is_empty() && self.relations.is_empty()
    }
}
