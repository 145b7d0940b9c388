//! Declaration tree.
//!
//! This module contains the data structures produced by the declaration
//! parser: top-level declarations, members, patterns and type syntax.
//! Expressions and function bodies are not modelled; initializer
//! expressions are kept as raw source text.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A parsed source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SourceFile {
    /// Top-level declarations in source order.
    pub declarations: Vec<Declaration>,
}

impl SourceFile {
    /// Creates a source file from its declarations.
    #[must_use]
    pub fn new(declarations: Vec<Declaration>) -> Self {
        Self { declarations }
    }

    /// Iterates over the top-level composite declarations.
    pub fn composites(&self) -> impl Iterator<Item = &CompositeDeclaration> {
        self.declarations.iter().filter_map(|d| match d {
            Declaration::Composite(c) => Some(c),
            _ => None,
        })
    }
}

/// Declaration name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Identifier {
    /// Plain identifier.
    Name(String),
    /// Backtick-escaped identifier, stored without the backticks.
    Backticked(String),
    /// The `_` wildcard.
    Wildcard,
}

impl Identifier {
    /// Creates a plain identifier.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::Name(name.into())
    }

    /// Returns the usable name, or `None` for the wildcard.
    #[must_use]
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Self::Name(name) | Self::Backticked(name) => Some(name),
            Self::Wildcard => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => f.write_str(name),
            Self::Backticked(name) => write!(f, "`{name}`"),
            Self::Wildcard => f.write_str("_"),
        }
    }
}

/// Access level modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccessLevel {
    /// `private`
    Private,
    /// `fileprivate`
    Fileprivate,
    /// `internal`
    Internal,
    /// `package`
    Package,
    /// `public`
    Public,
    /// `open`
    Open,
}

impl AccessLevel {
    /// Parses an access level keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Self::Private),
            "fileprivate" => Some(Self::Fileprivate),
            "internal" => Some(Self::Internal),
            "package" => Some(Self::Package),
            "public" => Some(Self::Public),
            "open" => Some(Self::Open),
            _ => None,
        }
    }

    /// Returns the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Fileprivate => "fileprivate",
            Self::Internal => "internal",
            Self::Package => "package",
            Self::Public => "public",
            Self::Open => "open",
        }
    }

    /// Returns true for `public` and `open`.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Public | Self::Open)
    }
}

/// Declaration modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Modifier {
    /// Access level (`public`, `private`, ...).
    Access(AccessLevel),
    /// Setter access level (`private(set)`).
    AccessSetter(AccessLevel),
    Static,
    Class,
    Final,
    Override,
    Lazy,
    Weak,
    Unowned,
    Mutating,
    Nonmutating,
    Indirect,
    Required,
    Convenience,
    Dynamic,
    Optional,
    Nonisolated,
    Prefix,
    Postfix,
    Infix,
}

impl Modifier {
    /// Parses a non-access modifier keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "static" => Some(Self::Static),
            "class" => Some(Self::Class),
            "final" => Some(Self::Final),
            "override" => Some(Self::Override),
            "lazy" => Some(Self::Lazy),
            "weak" => Some(Self::Weak),
            "unowned" => Some(Self::Unowned),
            "mutating" => Some(Self::Mutating),
            "nonmutating" => Some(Self::Nonmutating),
            "indirect" => Some(Self::Indirect),
            "required" => Some(Self::Required),
            "convenience" => Some(Self::Convenience),
            "dynamic" => Some(Self::Dynamic),
            "optional" => Some(Self::Optional),
            "nonisolated" => Some(Self::Nonisolated),
            "prefix" => Some(Self::Prefix),
            "postfix" => Some(Self::Postfix),
            "infix" => Some(Self::Infix),
            _ => None,
        }
    }

    /// Returns true for `static` and `class`, which make a member type-level.
    #[must_use]
    pub const fn is_type_level(&self) -> bool {
        matches!(self, Self::Static | Self::Class)
    }
}

/// Returns the declared access level among `modifiers`, if any.
#[must_use]
pub fn access_level(modifiers: &[Modifier]) -> Option<AccessLevel> {
    modifiers.iter().find_map(|m| match m {
        Modifier::Access(level) => Some(*level),
        _ => None,
    })
}

/// Attribute such as `@objc` or `@available(...)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    /// Attribute name without the `@`.
    pub name: String,
    /// Raw argument text between the parentheses, if present.
    pub arguments: Option<String>,
}

/// Declaration variants.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Declaration {
    /// `import` declaration.
    Import(ImportDeclaration),
    /// `class`, `struct` or `actor` declaration.
    Composite(CompositeDeclaration),
    /// `enum` declaration.
    Enum(EnumDeclaration),
    /// `protocol` declaration.
    Protocol(ProtocolDeclaration),
    /// `extension` declaration.
    Extension(ExtensionDeclaration),
    /// `let` declaration.
    Constant(ConstantDeclaration),
    /// `var` declaration.
    Variable(VariableDeclaration),
    /// `func` declaration.
    Function(FunctionDeclaration),
    /// `init` declaration.
    Initializer(InitializerDeclaration),
    /// `deinit` declaration.
    Deinitializer,
    /// `subscript` declaration.
    Subscript(SubscriptDeclaration),
    /// `typealias` declaration.
    TypeAlias(TypeAliasDeclaration),
    /// `associatedtype` declaration.
    AssociatedType(Identifier),
    /// `operator` or `precedencegroup` declaration.
    Operator(String),
    /// Compiler-control line (`#if`, `#endif`, ...).
    CompilerControl(CompilerControl),
}

/// `import` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImportDeclaration {
    /// Import kind keyword (`struct`, `func`, ...) for scoped imports.
    pub kind: Option<String>,
    /// Module path components.
    pub path: Vec<String>,
}

/// Kind of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CompositeKind {
    Class,
    Struct,
    Actor,
}

impl CompositeKind {
    /// Parses a composite keyword.
    #[must_use]
    pub fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "class" => Some(Self::Class),
            "struct" => Some(Self::Struct),
            "actor" => Some(Self::Actor),
            _ => None,
        }
    }

    /// Returns the keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Struct => "struct",
            Self::Actor => "actor",
        }
    }
}

/// Supertype list following a `:`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeInheritanceClause {
    /// Listed supertypes in source order.
    pub types: Vec<TypeIdentifier>,
}

/// `class`, `struct` or `actor` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompositeDeclaration {
    /// Declaration keyword.
    pub kind: CompositeKind,
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Type name.
    pub name: Identifier,
    /// Generic parameter names.
    pub generic_parameters: Vec<String>,
    /// Supertype list.
    pub inheritance: Option<TypeInheritanceClause>,
    /// Body members.
    pub members: Vec<Declaration>,
}

impl CompositeDeclaration {
    /// Creates an empty composite declaration.
    #[must_use]
    pub fn new(kind: CompositeKind, name: Identifier) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name,
            generic_parameters: Vec::new(),
            inheritance: None,
            members: Vec::new(),
        }
    }

    /// Returns the declared access level.
    #[must_use]
    pub fn access_level(&self) -> Option<AccessLevel> {
        access_level(&self.modifiers)
    }
}

/// `enum` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Type name.
    pub name: Identifier,
    /// Generic parameter names.
    pub generic_parameters: Vec<String>,
    /// Raw type and conformances.
    pub inheritance: Option<TypeInheritanceClause>,
    /// Body members.
    pub members: Vec<EnumMember>,
}

impl EnumDeclaration {
    /// Creates an empty enum declaration.
    #[must_use]
    pub fn new(name: Identifier) -> Self {
        Self {
            attributes: Vec::new(),
            modifiers: Vec::new(),
            name,
            generic_parameters: Vec::new(),
            inheritance: None,
            members: Vec::new(),
        }
    }

    /// Returns the declared access level.
    #[must_use]
    pub fn access_level(&self) -> Option<AccessLevel> {
        access_level(&self.modifiers)
    }
}

/// Member of an enum body.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EnumMember {
    /// `case` clause.
    Cases(EnumCaseClause),
    /// Any other member declaration.
    Declaration(Declaration),
}

/// A `case` clause, possibly declaring several cases.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumCaseClause {
    /// Whether the clause is marked `indirect`.
    pub indirect: bool,
    /// Cases declared by this clause.
    pub cases: Vec<EnumCase>,
}

/// A single enum case.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumCase {
    /// Case name.
    pub name: Identifier,
    /// Associated value tuple.
    pub payload: Option<TupleType>,
    /// Raw value expression text.
    pub raw_value: Option<String>,
}

/// `protocol` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProtocolDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Protocol name.
    pub name: Identifier,
    /// Inherited protocols.
    pub inheritance: Option<TypeInheritanceClause>,
    /// Requirements.
    pub members: Vec<Declaration>,
}

/// `extension` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExtensionDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Extended type.
    pub extended_type: TypeIdentifier,
    /// Added conformances.
    pub inheritance: Option<TypeInheritanceClause>,
    /// Body members.
    pub members: Vec<Declaration>,
}

/// One `pattern [= initializer]` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternInitializer {
    /// Bound pattern.
    pub pattern: Pattern,
    /// Initializer expression text.
    pub initializer: Option<String>,
}

/// Binding pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Pattern {
    /// Named binding with an optional type annotation.
    Identifier {
        identifier: Identifier,
        annotation: Option<TypeSyntax>,
    },
    /// Tuple destructuring.
    Tuple {
        elements: Vec<Pattern>,
        annotation: Option<TypeSyntax>,
    },
    /// `_` binding.
    Wildcard { annotation: Option<TypeSyntax> },
}

/// `let` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConstantDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Bound patterns.
    pub initializers: Vec<PatternInitializer>,
}

/// `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VariableDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Declaration body.
    pub body: VariableBody,
}

/// Body of a `var` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariableBody {
    /// Stored variables.
    InitializerList(Vec<PatternInitializer>),
    /// Computed property with a getter block.
    Computed {
        identifier: Identifier,
        annotation: TypeSyntax,
    },
    /// Stored property with `willSet`/`didSet` observers.
    Observed {
        identifier: Identifier,
        annotation: Option<TypeSyntax>,
        initializer: Option<String>,
    },
}

/// `func` declaration; the body is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FunctionDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Function name (identifier or operator).
    pub name: String,
    /// Whether a body was present.
    pub has_body: bool,
}

/// `init` declaration; the body is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InitializerDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// `init?` or `init!`.
    pub failable: bool,
}

/// `subscript` declaration; the body is not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SubscriptDeclaration {
    /// Attributes.
    pub attributes: Vec<Attribute>,
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
}

/// `typealias` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeAliasDeclaration {
    /// Modifiers.
    pub modifiers: Vec<Modifier>,
    /// Alias name.
    pub name: Identifier,
    /// Aliased type.
    pub ty: TypeSyntax,
}

/// Compiler-control directive line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompilerControl {
    /// Directive name without the `#`.
    pub directive: String,
    /// Remaining text on the line.
    pub condition: Option<String>,
}

/// Dotted type identifier such as `Swift.Array<Int>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeIdentifier {
    /// Dot-separated components.
    pub names: Vec<TypeName>,
}

impl TypeIdentifier {
    /// Creates a single-component identifier without generic arguments.
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            names: vec![TypeName::new(Identifier::Name(name.into()))],
        }
    }

    /// Returns the name if this identifier has exactly one component.
    ///
    /// Generic arguments are ignored.
    #[must_use]
    pub fn single_component(&self) -> Option<&TypeName> {
        match self.names.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{name}")?;
        }
        Ok(())
    }
}

/// One component of a type identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeName {
    /// Component name.
    pub name: Identifier,
    /// Generic arguments.
    pub generic_arguments: Vec<TypeSyntax>,
}

impl TypeName {
    /// Creates a component without generic arguments.
    #[must_use]
    pub fn new(name: Identifier) -> Self {
        Self {
            name,
            generic_arguments: Vec::new(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.generic_arguments.is_empty() {
            f.write_str("<")?;
            write_joined(f, &self.generic_arguments, ", ")?;
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// Tuple type `(label: T, U)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TupleType {
    /// Elements in order.
    pub elements: Vec<TupleTypeElement>,
}

impl fmt::Display for TupleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        write_joined(f, &self.elements, ", ")?;
        f.write_str(")")
    }
}

/// Tuple type element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TupleTypeElement {
    /// Element label.
    pub label: Option<String>,
    /// Element type.
    pub ty: TypeSyntax,
}

impl fmt::Display for TupleTypeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(f, "{label}: {}", self.ty),
            None => write!(f, "{}", self.ty),
        }
    }
}

/// Metatype suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MetatypeKind {
    /// `.Type`
    Type,
    /// `.Protocol`
    Protocol,
}

/// Type annotation syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TypeSyntax {
    /// Named type, possibly dotted and generic.
    Identifier(TypeIdentifier),
    /// `T?`
    Optional(Box<TypeSyntax>),
    /// `T!`
    ImplicitlyUnwrapped(Box<TypeSyntax>),
    /// `[T]`
    Array(Box<TypeSyntax>),
    /// `[K: V]`
    Dictionary {
        key: Box<TypeSyntax>,
        value: Box<TypeSyntax>,
    },
    /// `(A, b: B)`
    Tuple(TupleType),
    /// `(A) async throws -> B`
    Function {
        parameters: TupleType,
        result: Box<TypeSyntax>,
        is_async: bool,
        throws: bool,
    },
    /// `T.Type` / `T.Protocol`
    Metatype {
        base: Box<TypeSyntax>,
        kind: MetatypeKind,
    },
    /// `A & B`
    Composition(Vec<TypeSyntax>),
    /// `some T`
    Opaque(Box<TypeSyntax>),
    /// `any T`
    Existential(Box<TypeSyntax>),
}

impl TypeSyntax {
    /// Creates a single-component named type.
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Identifier(TypeIdentifier::simple(name))
    }

    /// Wraps a type in an optional.
    #[must_use]
    pub fn optional(inner: TypeSyntax) -> Self {
        Self::Optional(Box::new(inner))
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => write!(f, "{id}"),
            Self::Optional(inner) => write!(f, "{inner}?"),
            Self::ImplicitlyUnwrapped(inner) => write!(f, "{inner}!"),
            Self::Array(inner) => write!(f, "[{inner}]"),
            Self::Dictionary { key, value } => write!(f, "[{key}: {value}]"),
            Self::Tuple(tuple) => write!(f, "{tuple}"),
            Self::Function {
                parameters,
                result,
                is_async,
                throws,
            } => {
                write!(f, "{parameters}")?;
                if *is_async {
                    f.write_str(" async")?;
                }
                if *throws {
                    f.write_str(" throws")?;
                }
                write!(f, " -> {result}")
            }
            Self::Metatype { base, kind } => match kind {
                MetatypeKind::Type => write!(f, "{base}.Type"),
                MetatypeKind::Protocol => write!(f, "{base}.Protocol"),
            },
            Self::Composition(parts) => write_joined(f, parts, " & "),
            Self::Opaque(inner) => write!(f, "some {inner}"),
            Self::Existential(inner) => write!(f, "any {inner}"),
        }
    }
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_as_name() {
        assert_eq!(Identifier::name("Foo").as_name(), Some("Foo"));
        assert_eq!(
            Identifier::Backticked("default".to_string()).as_name(),
            Some("default")
        );
        assert_eq!(Identifier::Wildcard.as_name(), None);
    }

    #[test]
    fn test_access_level() {
        assert_eq!(AccessLevel::parse("public"), Some(AccessLevel::Public));
        assert_eq!(AccessLevel::parse("static"), None);
        assert!(AccessLevel::Open.is_public());
        assert!(!AccessLevel::Internal.is_public());

        let modifiers = [Modifier::Final, Modifier::Access(AccessLevel::Public)];
        assert_eq!(access_level(&modifiers), Some(AccessLevel::Public));
        assert_eq!(access_level(&[Modifier::Static]), None);
    }

    #[test]
    fn test_type_syntax_display() {
        let dict = TypeSyntax::Dictionary {
            key: Box::new(TypeSyntax::simple("String")),
            value: Box::new(TypeSyntax::Array(Box::new(TypeSyntax::simple("Int")))),
        };
        assert_eq!(dict.to_string(), "[String: [Int]]");

        let generic = TypeSyntax::Identifier(TypeIdentifier {
            names: vec![TypeName {
                name: Identifier::name("Result"),
                generic_arguments: vec![TypeSyntax::simple("Int"), TypeSyntax::simple("Error")],
            }],
        });
        assert_eq!(TypeSyntax::optional(generic).to_string(), "Result<Int, Error>?");

        let function = TypeSyntax::Function {
            parameters: TupleType {
                elements: vec![TupleTypeElement {
                    label: None,
                    ty: TypeSyntax::simple("Int"),
                }],
            },
            result: Box::new(TypeSyntax::simple("Void")),
            is_async: false,
            throws: true,
        };
        assert_eq!(function.to_string(), "(Int) throws -> Void");
    }

    #[test]
    fn test_single_component() {
        let simple = TypeIdentifier::simple("Label");
        assert!(simple.single_component().is_some());

        let dotted = TypeIdentifier {
            names: vec![
                TypeName::new(Identifier::name("Swift")),
                TypeName::new(Identifier::name("Int")),
            ],
        };
        assert!(dotted.single_component().is_none());
        assert_eq!(dotted.to_string(), "Swift.Int");
    }
}
