//! Type annotation resolution.
//!
//! Maps the annotation of a stored field to an [`SType`]. A nested type
//! looks exactly like a top-level one at the point of use, so the resolver
//! consults the `Encapsulates` edges already recorded in the database to
//! qualify it with its container (`Container.Member`).

use microscope_core::{NamedReference, RelationKind, SType, TypeDatabase};
use microscope_syntax::{TypeIdentifier, TypeSyntax};

/// Resolves a field type annotation against the current database state.
///
/// Accepted shapes are a single named type `T` and its optional `T?`. The
/// name is qualified when exactly one container encapsulates it; with more
/// than one container the annotation is ambiguous and unresolved.
///
/// Returns `None` for every other shape (tuples, functions, collections,
/// generic types, nested optionals, metatypes, compositions).
#[must_use]
pub fn resolve_type_annotation(annotation: &TypeSyntax, database: &TypeDatabase) -> Option<SType> {
    match annotation {
        TypeSyntax::Identifier(identifier) => resolve_named(identifier, database),
        TypeSyntax::Optional(inner) => match inner.as_ref() {
            TypeSyntax::Identifier(identifier) => {
                resolve_named(identifier, database).map(SType::optional)
            }
            _ => None,
        },
        TypeSyntax::ImplicitlyUnwrapped(_)
        | TypeSyntax::Array(_)
        | TypeSyntax::Dictionary { .. }
        | TypeSyntax::Tuple(_)
        | TypeSyntax::Function { .. }
        | TypeSyntax::Metatype { .. }
        | TypeSyntax::Composition(_)
        | TypeSyntax::Opaque(_)
        | TypeSyntax::Existential(_) => None,
    }
}

/// Returns the name of a single-component identifier without generic
/// arguments.
#[must_use]
pub fn simple_type_name(identifier: &TypeIdentifier) -> Option<&str> {
    let component = identifier.single_component()?;
    if !component.generic_arguments.is_empty() {
        return None;
    }
    component.name.as_name()
}

fn resolve_named(identifier: &TypeIdentifier, database: &TypeDatabase) -> Option<SType> {
    let name = simple_type_name(identifier)?;
    let containers = database.query_by_right(RelationKind::Encapsulates, &SType::named(name));

    match containers.as_slice() {
        [] => Some(SType::named(name)),
        [container] => container
            .as_named()
            .map(|container| SType::Named(NamedReference::qualified(container, name))),
        _ => None,
    }
}
