//! Declaration traversal.
//!
//! [`TypeVisitor`] walks the top-level composite declarations of a source
//! file and records what it finds in a [`TypeDatabase`]:
//!
//! - the composite itself as a `Structure` of its stored properties
//! - one relation per listed supertype
//! - nested enums as `Choice` literals linked by `Encapsulates`
//!
//! Nested enums are registered before the fields of their container are
//! resolved, so that a field of a nested type resolves to its qualified
//! name.

use crate::error::TraversalError;
use crate::options::ConversionOptions;
use crate::resolver::{resolve_type_annotation, simple_type_name};
use microscope_core::{
    Choice, ChoiceOption, LiteralType, Property, Relation, SType, Structure, TypeDatabase,
};
use microscope_syntax::{
    CompositeDeclaration, Declaration, EnumCaseClause, EnumDeclaration, EnumMember, Modifier,
    Pattern, PatternInitializer, SourceFile, TypeInheritanceClause, TypeSyntax, VariableBody,
};

/// Names of the types registered by one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Registered structures in visiting order.
    pub structures: Vec<String>,
    /// Registered choices in visiting order.
    pub choices: Vec<String>,
    /// Relations that were not already present.
    pub new_relations: usize,
}

impl ExtractionSummary {
    /// Returns true if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.structures.is_empty() && self.choices.is_empty() && self.new_relations == 0
    }
}

/// Visitor populating a database from declaration trees.
pub struct TypeVisitor<'a> {
    database: &'a mut TypeDatabase,
    options: &'a ConversionOptions,
    summary: ExtractionSummary,
}

impl<'a> TypeVisitor<'a> {
    /// Creates a visitor writing into `database`.
    #[must_use]
    pub fn new(database: &'a mut TypeDatabase, options: &'a ConversionOptions) -> Self {
        Self {
            database,
            options,
            summary: ExtractionSummary::default(),
        }
    }

    /// Visits every top-level declaration of a source file.
    ///
    /// # Errors
    /// Returns `TraversalError` on the first registration fault. Writes made
    /// before the fault remain in the database.
    pub fn visit_source_file(&mut self, file: &SourceFile) -> Result<(), TraversalError> {
        for declaration in &file.declarations {
            self.visit_declaration(declaration)?;
        }
        Ok(())
    }

    /// Visits a single top-level declaration.
    ///
    /// # Errors
    /// Returns `TraversalError` if registering a discovered type fails.
    pub fn visit_declaration(&mut self, declaration: &Declaration) -> Result<(), TraversalError> {
        match declaration {
            Declaration::Composite(composite) if self.options.visits(composite.kind) => {
                self.visit_composite(composite)
            }
            Declaration::Composite(composite) => {
                tracing::debug!(
                    "Skipping {} {}: kind not selected",
                    composite.kind.as_str(),
                    composite.name
                );
                Ok(())
            }
            Declaration::Import(_)
            | Declaration::Enum(_)
            | Declaration::Protocol(_)
            | Declaration::Extension(_)
            | Declaration::Constant(_)
            | Declaration::Variable(_)
            | Declaration::Function(_)
            | Declaration::Initializer(_)
            | Declaration::Deinitializer
            | Declaration::Subscript(_)
            | Declaration::TypeAlias(_)
            | Declaration::AssociatedType(_)
            | Declaration::Operator(_)
            | Declaration::CompilerControl(_) => Ok(()),
        }
    }

    /// Consumes the visitor and returns what it registered.
    #[must_use]
    pub fn finish(self) -> ExtractionSummary {
        self.summary
    }

    fn visit_composite(&mut self, composite: &CompositeDeclaration) -> Result<(), TraversalError> {
        let Some(name) = composite.name.as_name() else {
            tracing::debug!("Skipping {} without a name", composite.kind.as_str());
            return Ok(());
        };

        if self.options.is_public_only()
            && !composite.access_level().is_some_and(|level| level.is_public())
        {
            tracing::debug!("Skipping non-public {} {}", composite.kind.as_str(), name);
            return Ok(());
        }

        if let Some(inheritance) = &composite.inheritance {
            self.record_supertypes(name, inheritance);
        }

        self.record_hidden_types(name, &composite.members)?;

        let properties: Vec<Property> = composite
            .members
            .iter()
            .filter_map(|member| self.extract_property(member))
            .collect();

        let count = properties.len();
        self.register(name, LiteralType::Structure(Structure::new(name, properties)))?;
        self.summary.structures.push(name.to_string());
        tracing::debug!("Registered structure {} with {} properties", name, count);
        Ok(())
    }

    /// The first listed supertype is recorded as `Implements`, every later
    /// one as `Inherits`.
    fn record_supertypes(&mut self, name: &str, inheritance: &TypeInheritanceClause) {
        let supertypes = inheritance.types.iter().filter_map(|ty| {
            let component = ty.single_component()?;
            component.name.as_name()
        });

        for (index, supertype) in supertypes.enumerate() {
            let relation = if index == 0 {
                Relation::implements(SType::named(name), SType::named(supertype))
            } else {
                Relation::inherits(SType::named(name), SType::named(supertype))
            };
            self.add_relation(relation);
        }
    }

    fn record_hidden_types(
        &mut self,
        container: &str,
        members: &[Declaration],
    ) -> Result<(), TraversalError> {
        for member in members {
            let Declaration::Enum(declaration) = member else {
                continue;
            };
            let Some(choice) = self.extract_choice(declaration) else {
                continue;
            };

            let name = choice.name.clone();
            let count = choice.options.len();
            self.register(&name, LiteralType::Choice(choice))?;
            self.add_relation(Relation::encapsulates(
                SType::named(container),
                SType::named(name.as_str()),
            ));
            tracing::debug!(
                "Registered choice {}.{} with {} cases",
                container,
                name,
                count
            );
            self.summary.choices.push(name);
        }
        Ok(())
    }

    fn extract_choice(&self, declaration: &EnumDeclaration) -> Option<Choice> {
        if self.options.is_public_only()
            && !declaration.access_level().is_some_and(|level| level.is_public())
        {
            return None;
        }
        let name = declaration.name.as_name()?;

        let options = declaration
            .members
            .iter()
            .filter_map(|member| match member {
                EnumMember::Cases(clause) => extract_option(clause),
                EnumMember::Declaration(_) => None,
            })
            .collect();

        Some(Choice::new(name, options))
    }

    fn extract_property(&self, member: &Declaration) -> Option<Property> {
        let (modifiers, bindings) = match member {
            Declaration::Constant(constant) => {
                (&constant.modifiers, constant.initializers.as_slice())
            }
            Declaration::Variable(variable) => match &variable.body {
                VariableBody::InitializerList(list) => (&variable.modifiers, list.as_slice()),
                VariableBody::Computed { .. } | VariableBody::Observed { .. } => return None,
            },
            _ => return None,
        };

        if !self.is_field_visible(modifiers) {
            return None;
        }

        let (name, annotation) = single_typed_binding(bindings)?;
        let ty = resolve_type_annotation(annotation, &*self.database)?;
        Some(Property::new(name, ty))
    }

    /// Type-level properties are never instance storage. With the public-only
    /// filter a field must carry a public access modifier and nothing else.
    fn is_field_visible(&self, modifiers: &[Modifier]) -> bool {
        if modifiers.iter().any(Modifier::is_type_level) {
            return false;
        }
        if !self.options.is_public_only() {
            return true;
        }
        !modifiers.is_empty()
            && modifiers
                .iter()
                .all(|m| matches!(m, Modifier::Access(level) if level.is_public()))
    }

    fn register(&mut self, name: &str, ty: LiteralType) -> Result<(), TraversalError> {
        if self.options.uses_strict_names() {
            self.database
                .try_add_named_type(name, ty.clone())
                .map_err(|e| TraversalError::registration(name, e))?;
        } else if let Some(previous) = self.database.add_named_type(name, ty.clone()) {
            if previous != ty {
                tracing::debug!("Replaced earlier registration of {}", name);
            }
        }
        self.database.add_literal_type(ty);
        Ok(())
    }

    fn add_relation(&mut self, relation: Relation) {
        if self.database.add_relation(relation) {
            self.summary.new_relations += 1;
        }
    }
}

/// Returns the name and annotation of a declaration binding exactly one
/// typed identifier.
fn single_typed_binding(bindings: &[PatternInitializer]) -> Option<(&str, &TypeSyntax)> {
    let [binding] = bindings else {
        return None;
    };
    match &binding.pattern {
        Pattern::Identifier {
            identifier,
            annotation: Some(annotation),
        } => Some((identifier.as_name()?, annotation)),
        Pattern::Identifier { .. } | Pattern::Tuple { .. } | Pattern::Wildcard { .. } => None,
    }
}

/// Converts a clause declaring exactly one case.
///
/// The payload keeps the elements whose type is a single plain identifier.
/// Every other element is dropped while the case itself is kept.
fn extract_option(clause: &EnumCaseClause) -> Option<ChoiceOption> {
    let [case] = clause.cases.as_slice() else {
        return None;
    };
    let name = case.name.as_name()?;

    let payload = case
        .payload
        .iter()
        .flat_map(|tuple| &tuple.elements)
        .filter_map(|element| match &element.ty {
            TypeSyntax::Identifier(identifier) => simple_type_name(identifier),
            _ => None,
        })
        .map(SType::named)
        .collect();

    Some(ChoiceOption::new(name, payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::RelationKind;
    use microscope_syntax::{CompositeKind, parse_source};

    fn convert(source: &str, options: &ConversionOptions) -> (TypeDatabase, ExtractionSummary) {
        let file = parse_source(source).expect("Failed to parse");
        let mut db = TypeDatabase::new();
        let mut visitor = TypeVisitor::new(&mut db, options);
        visitor.visit_source_file(&file).expect("Failed to convert");
        let summary = visitor.finish();
        (db, summary)
    }

    fn structure<'db>(db: &'db TypeDatabase, name: &str) -> &'db Structure {
        db.named(name)
            .and_then(LiteralType::as_structure)
            .expect("structure registered")
    }

    fn property_names(structure: &Structure) -> Vec<&str> {
        structure.properties.iter().map(|p| p.name.as_str()).collect()
    }

    const IF_STATEMENT: &str = r#"
public class IfStatement : Statement
{
    public enum ElseClause
    {
        case `else`(CodeBlock)
        case elseif(IfStatement)
    }

    public let condition: ConditionList
    public let codeBlock: CodeBlock
    public let elseClause: ElseClause?

    public init(condition: ConditionList, codeBlock: CodeBlock, elseClause: ElseClause? = nil)
    {
        self.condition = condition
        self.codeBlock = codeBlock
        self.elseClause = elseClause
    }
}
"#;

    #[test]
    fn test_fields_in_declaration_order() {
        let (db, summary) = convert(
            "struct Point {\n let x: Int\n var y: Int\n let z: Double = 0\n}",
            &ConversionOptions::default(),
        );
        let point = structure(&db, "Point");
        assert_eq!(property_names(point), vec!["x", "y", "z"]);
        assert_eq!(point.properties[2].ty, SType::named("Double"));
        assert_eq!(summary.structures, vec!["Point"]);
        assert!(db.contains_literal(&LiteralType::Structure(point.clone())));
    }

    #[test]
    fn test_supertype_relations() {
        let (db, summary) = convert("class X: A, B, C {}", &ConversionOptions::default());
        let x = SType::named("X");

        assert_eq!(db.relation_count(), 3);
        assert!(db.contains_relation(&Relation::implements(x.clone(), SType::named("A"))));
        assert!(db.contains_relation(&Relation::inherits(x.clone(), SType::named("B"))));
        assert!(db.contains_relation(&Relation::inherits(x, SType::named("C"))));
        assert_eq!(summary.new_relations, 3);
    }

    #[test]
    fn test_compound_supertype_dropped_before_split() {
        let (db, _) = convert("class X: Foundation.NSObject, B {}", &ConversionOptions::default());
        assert_eq!(db.relation_count(), 1);
        assert!(db.contains_relation(&Relation::implements(
            SType::named("X"),
            SType::named("B")
        )));
    }

    #[test]
    fn test_hidden_enum_registration() {
        let (db, summary) = convert(IF_STATEMENT, &ConversionOptions::default());

        let choice = db
            .named("ElseClause")
            .and_then(LiteralType::as_choice)
            .expect("choice registered");
        let cases: Vec<_> = choice.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(cases, vec!["else", "elseif"]);
        assert_eq!(choice.options[0].payload, vec![SType::named("CodeBlock")]);

        assert!(db.contains_relation(&Relation::encapsulates(
            SType::named("IfStatement"),
            SType::named("ElseClause")
        )));
        assert_eq!(summary.choices, vec!["ElseClause"]);
    }

    #[test]
    fn test_nested_field_resolves_qualified() {
        let (db, _) = convert(IF_STATEMENT, &ConversionOptions::default());
        let statement = structure(&db, "IfStatement");

        assert_eq!(
            property_names(statement),
            vec!["condition", "codeBlock", "elseClause"]
        );
        assert_eq!(
            statement.properties[2].ty,
            SType::optional(SType::named("IfStatement.ElseClause"))
        );
    }

    #[test]
    fn test_optional_without_container_stays_unqualified() {
        let (db, _) = convert("struct S { let next: Node? }", &ConversionOptions::default());
        assert_eq!(
            structure(&db, "S").properties[0].ty,
            SType::optional(SType::named("Node"))
        );
    }

    #[test]
    fn test_ambiguous_container_drops_field() {
        let source = "class A { enum Kind { case a } }\n\
                      class B { enum Kind { case a } }\n\
                      struct C { let kind: Kind?\n let id: Int }";
        let (db, _) = convert(source, &ConversionOptions::default());

        assert_eq!(
            db.query_by_right(RelationKind::Encapsulates, &SType::named("Kind"))
                .len(),
            2
        );
        assert_eq!(property_names(structure(&db, "C")), vec!["id"]);
    }

    #[test]
    fn test_unsupported_fields_dropped() {
        let source = "class Model {\n\
                      let a = 1\n\
                      let b: Int, c: Int\n\
                      let (d, e): (Int, Int)\n\
                      var f: Int { 1 }\n\
                      var g: Int = 0 { didSet { } }\n\
                      static let h: Int = 0\n\
                      class var i: Int { 0 }\n\
                      let j: [Int]\n\
                      let k: Array<Int>\n\
                      let l: Swift.Int\n\
                      let m: Int??\n\
                      func n() -> Int { 0 }\n\
                      let kept: Int\n\
                      }";
        let (db, _) = convert(source, &ConversionOptions::default());
        assert_eq!(property_names(structure(&db, "Model")), vec!["kept"]);
    }

    #[test]
    fn test_wildcard_composite_skipped() {
        let (db, summary) = convert(
            "class _: Base { let a: Int }\nstruct Kept {}",
            &ConversionOptions::default(),
        );
        assert_eq!(db.relation_count(), 0);
        assert!(!db.has_named("_"));
        assert_eq!(summary.structures, vec!["Kept"]);
    }

    #[test]
    fn test_public_only_filter() {
        let source = "public struct Visible {\n\
                      public let a: Int\n\
                      let b: Int\n\
                      private let c: Int\n\
                      public private(set) var d: Int\n\
                      open var e: Int\n\
                      public enum Shown { case one }\n\
                      enum Hidden { case two }\n\
                      }\n\
                      struct Internal { public let x: Int }";
        let options = ConversionOptions::new().public_only(true);
        let (db, summary) = convert(source, &options);

        assert_eq!(property_names(structure(&db, "Visible")), vec!["a", "e"]);
        assert!(!db.has_named("Internal"));
        assert!(db.has_named("Shown"));
        assert!(!db.has_named("Hidden"));
        assert_eq!(summary.structures, vec!["Visible"]);
    }

    #[test]
    fn test_public_only_accepts_open_class() {
        let options = ConversionOptions::new().public_only(true);
        let (db, _) = convert("open class Base { public var name: String }", &options);
        assert_eq!(property_names(structure(&db, "Base")), vec!["name"]);
    }

    #[test]
    fn test_enum_case_rules() {
        let source = "struct Holder {\n\
                      enum Shape {\n\
                      case point\n\
                      case circle(radius: Double)\n\
                      case line(Point, Point)\n\
                      case a, b\n\
                      case tupled((Int, Int))\n\
                      case optional(Int?)\n\
                      case generic(Array<Int>)\n\
                      case qualified(Foundation.Date, Int)\n\
                      indirect case nested(Shape)\n\
                      case rawValue = 3\n\
                      func area() -> Double { 0 }\n\
                      }\n\
                      }";
        let (db, _) = convert(source, &ConversionOptions::default());
        let shape = db
            .named("Shape")
            .and_then(LiteralType::as_choice)
            .expect("choice registered");

        let cases: Vec<_> = shape.options.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            cases,
            vec![
                "point",
                "circle",
                "line",
                "tupled",
                "optional",
                "generic",
                "qualified",
                "nested",
                "rawValue",
            ]
        );
        assert!(shape.options[0].is_unit());
        assert_eq!(shape.options[1].payload, vec![SType::named("Double")]);
        assert_eq!(shape.options[2].payload.len(), 2);
        assert!(shape.options[3..6].iter().all(ChoiceOption::is_unit));
        assert_eq!(shape.options[6].payload, vec![SType::named("Int")]);
    }

    #[test]
    fn test_case_keeps_plain_payload_elements() {
        let source = "struct Holder {\n\
                      enum Event {\n\
                      case mixed(Int?, String, (Int, Int), [Int], Name)\n\
                      case callback(() -> Void)\n\
                      }\n\
                      }";
        let (db, _) = convert(source, &ConversionOptions::default());
        let event = db
            .named("Event")
            .and_then(LiteralType::as_choice)
            .expect("choice registered");

        assert_eq!(event.options.len(), 2);
        assert_eq!(
            event.options[0].payload,
            vec![SType::named("String"), SType::named("Name")]
        );
        assert!(event.options[1].is_unit());
    }

    #[test]
    fn test_top_level_enum_not_extracted() {
        let (db, summary) = convert("enum Free { case a }", &ConversionOptions::default());
        assert!(db.is_empty());
        assert!(summary.is_empty());
    }

    #[test]
    fn test_composite_kinds_option() {
        let source = "actor Counter { var value: Int }\nclass Plain {}";
        let (db, _) = convert(source, &ConversionOptions::default());
        assert!(!db.has_named("Counter"));

        let options = ConversionOptions::new().with_composite_kind(CompositeKind::Actor);
        let (db, _) = convert(source, &options);
        assert_eq!(property_names(structure(&db, "Counter")), vec!["value"]);
    }

    #[test]
    fn test_last_write_wins_by_default() {
        let source = "struct Dup { let a: Int }\nstruct Dup { let b: Int }";
        let (db, _) = convert(source, &ConversionOptions::default());
        assert_eq!(property_names(structure(&db, "Dup")), vec!["b"]);
        assert_eq!(db.literal_count(), 2);
    }

    #[test]
    fn test_strict_names_collision_is_fault() {
        let file = parse_source(
            "struct First { let a: Int }\n\
             struct Dup { let a: Int }\n\
             struct Dup { let b: Int }\n\
             struct Last {}",
        )
        .expect("Failed to parse");
        let options = ConversionOptions::new().strict_names(true);
        let mut db = TypeDatabase::new();

        let err = TypeVisitor::new(&mut db, &options)
            .visit_source_file(&file)
            .unwrap_err();
        assert_eq!(err.declaration(), "Dup");

        assert!(db.has_named("First"));
        assert_eq!(property_names(structure(&db, "Dup")), vec!["a"]);
        assert!(!db.has_named("Last"));
    }

    #[test]
    fn test_strict_names_accepts_identical_registration() {
        let source = "struct Same { let a: Int }\nstruct Same { let a: Int }";
        let options = ConversionOptions::new().strict_names(true);
        let (db, summary) = convert(source, &options);
        assert_eq!(db.literal_count(), 1);
        assert_eq!(summary.structures.len(), 2);
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let file = parse_source(IF_STATEMENT).expect("Failed to parse");
        let options = ConversionOptions::default();
        let mut db = TypeDatabase::new();

        TypeVisitor::new(&mut db, &options)
            .visit_source_file(&file)
            .expect("Failed to convert");
        let (literals, named, relations) =
            (db.literal_count(), db.named_count(), db.relation_count());

        let mut visitor = TypeVisitor::new(&mut db, &options);
        visitor.visit_source_file(&file).expect("Failed to convert");
        assert_eq!(visitor.finish().new_relations, 0);

        assert_eq!(db.literal_count(), literals);
        assert_eq!(db.named_count(), named);
        assert_eq!(db.relation_count(), relations);
    }
}
