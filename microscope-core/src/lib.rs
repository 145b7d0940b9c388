//! # Microscope Core
//!
//! Semantic type model and type relation database.
//!
//! This crate provides:
//! - `SType` / `LiteralType` descriptors with structural equality
//! - Directed relations (`Implements`, `Inherits`, `Encapsulates`)
//! - `TypeDatabase`, the store populated by declaration traversal

pub mod database;
pub mod error;
pub mod relation;
pub mod types;

pub use database::TypeDatabase;
pub use error::{Error, Result};
pub use relation::{Relation, RelationKind};
pub use types::{Choice, ChoiceOption, LiteralType, NamedReference, Property, SType, Structure};
