//! Declaration-level Swift parser.
//!
//! This module parses the declaration structure of a Swift source file:
//! type declarations, their members, stored and computed properties, enum
//! cases and type annotations. Function bodies, initializer expressions and
//! other statements are skipped by bracket matching rather than parsed.

use crate::ast::{
    AccessLevel, Attribute, CompilerControl, CompositeDeclaration, CompositeKind,
    ConstantDeclaration, Declaration, EnumCase, EnumCaseClause, EnumDeclaration, EnumMember,
    ExtensionDeclaration, FunctionDeclaration, Identifier, ImportDeclaration,
    InitializerDeclaration, MetatypeKind, Modifier, Pattern, PatternInitializer,
    ProtocolDeclaration, SourceFile, SubscriptDeclaration, TupleType, TupleTypeElement,
    TypeAliasDeclaration, TypeIdentifier, TypeInheritanceClause, TypeName, TypeSyntax,
    VariableBody, VariableDeclaration,
};
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind, line_column};

/// Source of declaration trees.
///
/// The extractor only needs a [`SourceFile`]; anything able to produce one
/// from source text can stand in for the bundled [`SwiftParser`].
pub trait DeclarationParser {
    /// Parses source text into a declaration tree.
    ///
    /// # Errors
    /// Returns `ParseError` if the text cannot be parsed.
    fn parse(&self, source: &str) -> Result<SourceFile, ParseError>;
}

/// The bundled declaration parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwiftParser;

impl SwiftParser {
    /// Creates a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DeclarationParser for SwiftParser {
    fn parse(&self, source: &str) -> Result<SourceFile, ParseError> {
        parse_source(source)
    }
}

/// Parses Swift source text into a declaration tree.
///
/// # Arguments
/// * `source` - Swift source content
///
/// # Errors
/// Returns `ParseError` if the source is malformed or contains constructs
/// outside the supported declaration subset.
pub fn parse_source(source: &str) -> Result<SourceFile, ParseError> {
    let tokens = Lexer::tokenize(source)?;
    let mut parser = Parser::new(source, tokens);
    parser.parse_source_file()
}

/// Keywords that may follow `class` when it is used as a modifier.
const MEMBER_KEYWORDS: &[&str] = &[
    "func",
    "var",
    "let",
    "subscript",
    "static",
    "final",
    "override",
    "open",
    "public",
    "internal",
    "fileprivate",
    "private",
    "package",
    "required",
    "convenience",
    "dynamic",
];

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    // ── Token access ─────────────────────────────────────────────────────

    fn current(&self) -> Token {
        self.token_at(self.pos)
    }

    fn token_at(&self, idx: usize) -> Token {
        let last = self.tokens.len() - 1;
        self.tokens[idx.min(last)]
    }

    fn kind(&self) -> TokenKind {
        self.current().kind
    }

    fn nth_kind(&self, n: usize) -> TokenKind {
        self.token_at(self.pos + n).kind
    }

    fn text(&self) -> &'src str {
        self.current().text(self.source)
    }

    fn nth_text(&self, n: usize) -> &'src str {
        self.token_at(self.pos + n).text(self.source)
    }

    fn bump(&mut self) -> Token {
        let token = self.current();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        self.at(TokenKind::Identifier) && self.text() == keyword
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error(expected))
        }
    }

    /// True if the current token starts exactly where the previous one ended.
    fn is_adjacent(&self) -> bool {
        self.pos > 0 && self.token_at(self.pos - 1).span.end == self.current().span.start
    }

    /// Index of the next token that is not a line break.
    fn next_significant(&self) -> usize {
        let mut idx = self.pos;
        while self.token_at(idx).kind == TokenKind::Newline {
            idx += 1;
        }
        idx
    }

    fn skip_newlines(&mut self) {
        while self.at(TokenKind::Newline) {
            self.bump();
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.kind(), TokenKind::Newline | TokenKind::Semicolon) {
            self.bump();
        }
    }

    fn error(&self, expected: &str) -> ParseError {
        let token = self.current();
        if token.kind == TokenKind::Eof {
            return ParseError::eof(expected);
        }
        let (line, column) = line_column(self.source, token.span.start);
        let found = match token.kind {
            TokenKind::Newline => "newline",
            _ => token.text(self.source),
        };
        ParseError::unexpected(expected, found, line, column)
    }

    fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }

    // ── Declarations ─────────────────────────────────────────────────────

    fn parse_source_file(&mut self) -> Result<SourceFile, ParseError> {
        let mut declarations = Vec::new();
        loop {
            self.skip_separators();
            if self.at(TokenKind::Eof) {
                break;
            }
            declarations.push(self.parse_declaration()?);
        }
        Ok(SourceFile::new(declarations))
    }

    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        if self.at(TokenKind::Hash) {
            return self.parse_compiler_control();
        }
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_modifiers()?;
        self.parse_declaration_body(attributes, modifiers)
    }

    fn parse_declaration_body(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<Declaration, ParseError> {
        if !self.at(TokenKind::Identifier) {
            return Err(self.error("declaration"));
        }

        let keyword = self.text();
        if let Some(kind) = CompositeKind::from_keyword(keyword) {
            self.bump();
            return self
                .parse_composite(kind, attributes, modifiers)
                .map(Declaration::Composite);
        }

        match keyword {
            "import" => self.parse_import().map(Declaration::Import),
            "enum" => self
                .parse_enum(attributes, modifiers)
                .map(Declaration::Enum),
            "protocol" => self
                .parse_protocol(attributes, modifiers)
                .map(Declaration::Protocol),
            "extension" => self
                .parse_extension(attributes, modifiers)
                .map(Declaration::Extension),
            "let" => self
                .parse_constant(attributes, modifiers)
                .map(Declaration::Constant),
            "var" => self
                .parse_variable(attributes, modifiers)
                .map(Declaration::Variable),
            "func" => self
                .parse_function(attributes, modifiers)
                .map(Declaration::Function),
            "init" => self
                .parse_initializer(attributes, modifiers)
                .map(Declaration::Initializer),
            "deinit" => {
                self.bump();
                self.skip_signature_and_body()?;
                Ok(Declaration::Deinitializer)
            }
            "subscript" => {
                self.bump();
                self.skip_signature_and_body()?;
                Ok(Declaration::Subscript(SubscriptDeclaration {
                    attributes,
                    modifiers,
                }))
            }
            "typealias" => self.parse_typealias(modifiers).map(Declaration::TypeAlias),
            "associatedtype" => {
                self.bump();
                let name = self.parse_identifier()?;
                self.skip_to_line_end();
                Ok(Declaration::AssociatedType(name))
            }
            "operator" => {
                self.bump();
                let start = self.current().span.start;
                self.skip_to_line_end();
                let end = self.token_at(self.pos.saturating_sub(1)).span.end.max(start);
                Ok(Declaration::Operator(self.slice(start, end).trim().to_string()))
            }
            "precedencegroup" => {
                self.bump();
                let name = self.parse_identifier()?;
                self.skip_newlines();
                self.skip_block()?;
                Ok(Declaration::Operator(name.to_string()))
            }
            _ => Err(self.error("declaration")),
        }
    }

    fn parse_compiler_control(&mut self) -> Result<Declaration, ParseError> {
        self.expect(TokenKind::Hash, "'#'")?;
        let directive = self.expect(TokenKind::Identifier, "compiler directive")?;
        let directive = directive.text(self.source).to_string();

        let start = self.current().span.start;
        let mut end = start;
        while !matches!(self.kind(), TokenKind::Newline | TokenKind::Eof) {
            end = self.bump().span.end;
        }
        let condition = self.slice(start, end).trim();

        Ok(Declaration::CompilerControl(CompilerControl {
            directive,
            condition: (!condition.is_empty()).then(|| condition.to_string()),
        }))
    }

    fn parse_attributes(&mut self) -> Result<Vec<Attribute>, ParseError> {
        let mut attributes = Vec::new();
        while self.at(TokenKind::At) {
            attributes.push(self.parse_attribute()?);
            self.skip_newlines();
        }
        Ok(attributes)
    }

    fn parse_attribute(&mut self) -> Result<Attribute, ParseError> {
        self.expect(TokenKind::At, "'@'")?;
        let name = self.expect(TokenKind::Identifier, "attribute name")?;
        let name = name.text(self.source).to_string();

        let mut arguments = None;
        if self.at(TokenKind::LParen) && self.is_adjacent() {
            let open = self.bump();
            let close = self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
            arguments = Some(self.slice(open.span.end, close.span.start).trim().to_string());
        }

        Ok(Attribute { name, arguments })
    }

    fn parse_modifiers(&mut self) -> Result<Vec<Modifier>, ParseError> {
        let mut modifiers = Vec::new();
        loop {
            if !self.at(TokenKind::Identifier) {
                break;
            }
            let text = self.text();

            if let Some(level) = AccessLevel::parse(text) {
                // `open` / `package` are only modifiers when a declaration follows
                if !matches!(self.nth_kind(1), TokenKind::Identifier | TokenKind::LParen) {
                    break;
                }
                self.bump();
                if self.at(TokenKind::LParen) && self.nth_text(1) == "set" {
                    self.bump();
                    self.bump();
                    self.expect(TokenKind::RParen, "')'")?;
                    modifiers.push(Modifier::AccessSetter(level));
                } else {
                    modifiers.push(Modifier::Access(level));
                }
                continue;
            }

            let Some(modifier) = Modifier::from_keyword(text) else {
                break;
            };
            if self.nth_kind(1) != TokenKind::Identifier {
                break;
            }
            if modifier == Modifier::Class && !MEMBER_KEYWORDS.contains(&self.nth_text(1)) {
                // `class Name` declares a class
                break;
            }
            if modifier == Modifier::Indirect && self.nth_text(1) == "case" {
                break;
            }
            self.bump();
            modifiers.push(modifier);
        }
        Ok(modifiers)
    }

    fn parse_import(&mut self) -> Result<ImportDeclaration, ParseError> {
        self.bump();
        let mut kind = None;
        if matches!(
            self.text(),
            "typealias" | "struct" | "class" | "enum" | "protocol" | "let" | "var" | "func"
        ) && self.nth_kind(1) == TokenKind::Identifier
        {
            kind = Some(self.bump().text(self.source).to_string());
        }

        let mut path = vec![self.parse_identifier()?.to_string()];
        while self.eat(TokenKind::Dot) {
            path.push(self.parse_identifier()?.to_string());
        }
        Ok(ImportDeclaration { kind, path })
    }

    fn parse_composite(
        &mut self,
        kind: CompositeKind,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<CompositeDeclaration, ParseError> {
        let name = self.parse_identifier()?;
        let generic_parameters = self.parse_generic_parameters()?;
        let inheritance = self.parse_inheritance()?;
        self.skip_where_clause()?;
        let members = self.parse_member_block()?;

        Ok(CompositeDeclaration {
            kind,
            attributes,
            modifiers,
            name,
            generic_parameters,
            inheritance,
            members,
        })
    }

    fn parse_enum(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<EnumDeclaration, ParseError> {
        self.bump();
        let name = self.parse_identifier()?;
        let generic_parameters = self.parse_generic_parameters()?;
        let inheritance = self.parse_inheritance()?;
        self.skip_where_clause()?;

        self.skip_newlines();
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        loop {
            self.skip_separators();
            match self.kind() {
                TokenKind::RBrace => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => return Err(self.error("'}'")),
                TokenKind::Hash => {
                    members.push(EnumMember::Declaration(self.parse_compiler_control()?));
                }
                _ => {
                    let member_attributes = self.parse_attributes()?;
                    let indirect = self.at_keyword("indirect") && self.nth_text(1) == "case";
                    if indirect {
                        self.bump();
                    }
                    if self.at_keyword("case") {
                        members.push(EnumMember::Cases(self.parse_case_clause(indirect)?));
                    } else {
                        let member_modifiers = self.parse_modifiers()?;
                        if self.at_keyword("case") {
                            let indirect = member_modifiers.contains(&Modifier::Indirect);
                            members.push(EnumMember::Cases(self.parse_case_clause(indirect)?));
                        } else {
                            let declaration =
                                self.parse_declaration_body(member_attributes, member_modifiers)?;
                            members.push(EnumMember::Declaration(declaration));
                        }
                    }
                }
            }
        }

        Ok(EnumDeclaration {
            attributes,
            modifiers,
            name,
            generic_parameters,
            inheritance,
            members,
        })
    }

    fn parse_case_clause(&mut self, indirect: bool) -> Result<EnumCaseClause, ParseError> {
        self.bump();
        let mut cases = Vec::new();
        loop {
            let name = self.parse_identifier()?;
            let payload = if self.at(TokenKind::LParen) {
                Some(self.parse_tuple_elements()?)
            } else {
                None
            };
            let raw_value = if self.eat(TokenKind::Eq) {
                Some(self.skip_expression()?)
            } else {
                None
            };
            cases.push(EnumCase {
                name,
                payload,
                raw_value,
            });

            if self.eat(TokenKind::Comma) {
                self.skip_newlines();
            } else {
                break;
            }
        }
        Ok(EnumCaseClause { indirect, cases })
    }

    fn parse_protocol(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<ProtocolDeclaration, ParseError> {
        self.bump();
        let name = self.parse_identifier()?;
        if self.at(TokenKind::Lt) {
            // primary associated types
            self.bump();
            self.skip_balanced(TokenKind::Lt, TokenKind::Gt)?;
        }
        let inheritance = self.parse_inheritance()?;
        self.skip_where_clause()?;
        let members = self.parse_member_block()?;

        Ok(ProtocolDeclaration {
            attributes,
            modifiers,
            name,
            inheritance,
            members,
        })
    }

    fn parse_extension(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<ExtensionDeclaration, ParseError> {
        self.bump();
        let extended_type = self.parse_type_identifier()?;
        let inheritance = self.parse_inheritance()?;
        self.skip_where_clause()?;
        let members = self.parse_member_block()?;

        Ok(ExtensionDeclaration {
            attributes,
            modifiers,
            extended_type,
            inheritance,
            members,
        })
    }

    fn parse_member_block(&mut self) -> Result<Vec<Declaration>, ParseError> {
        self.skip_newlines();
        self.expect(TokenKind::LBrace, "'{'")?;
        let mut members = Vec::new();
        loop {
            self.skip_separators();
            match self.kind() {
                TokenKind::RBrace => {
                    self.bump();
                    return Ok(members);
                }
                TokenKind::Eof => return Err(self.error("'}'")),
                _ => members.push(self.parse_declaration()?),
            }
        }
    }

    fn parse_generic_parameters(&mut self) -> Result<Vec<String>, ParseError> {
        if !self.at(TokenKind::Lt) {
            return Ok(Vec::new());
        }
        self.bump();

        let mut names = Vec::new();
        let mut depth = 1u32;
        let mut expect_name = true;
        loop {
            match self.kind() {
                TokenKind::Lt => depth += 1,
                TokenKind::Gt => {
                    depth -= 1;
                    if depth == 0 {
                        self.bump();
                        return Ok(names);
                    }
                }
                TokenKind::Comma if depth == 1 => {
                    expect_name = true;
                    self.bump();
                    continue;
                }
                TokenKind::Identifier if depth == 1 && expect_name => {
                    if self.text() != "each" {
                        names.push(self.text().to_string());
                        expect_name = false;
                    }
                }
                TokenKind::Eof => return Err(self.error("'>'")),
                _ => {}
            }
            self.bump();
        }
    }

    fn parse_inheritance(&mut self) -> Result<Option<TypeInheritanceClause>, ParseError> {
        if !self.eat(TokenKind::Colon) {
            return Ok(None);
        }

        let mut types = Vec::new();
        loop {
            self.skip_newlines();
            while self.at(TokenKind::At) {
                self.parse_attribute()?;
            }
            if self.at(TokenKind::Operator) && self.text() == "~" {
                // suppressed conformance such as `~Copyable`
                self.bump();
                self.parse_type()?;
            } else if let TypeSyntax::Identifier(identifier) = self.parse_type()? {
                types.push(identifier);
            }

            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
        Ok(Some(TypeInheritanceClause { types }))
    }

    fn skip_where_clause(&mut self) -> Result<(), ParseError> {
        let idx = self.next_significant();
        if !(self.token_at(idx).kind == TokenKind::Identifier
            && self.token_at(idx).text(self.source) == "where")
        {
            return Ok(());
        }
        while !matches!(self.kind(), TokenKind::LBrace | TokenKind::Eof) {
            self.bump();
        }
        Ok(())
    }

    fn parse_constant(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<ConstantDeclaration, ParseError> {
        self.bump();
        let mut initializers = Vec::new();
        loop {
            let pattern = self.parse_pattern()?;
            let initializer = if self.eat(TokenKind::Eq) {
                Some(self.skip_expression()?)
            } else {
                None
            };
            initializers.push(PatternInitializer {
                pattern,
                initializer,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }

        Ok(ConstantDeclaration {
            attributes,
            modifiers,
            initializers,
        })
    }

    fn parse_variable(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<VariableDeclaration, ParseError> {
        self.bump();
        let mut initializers = Vec::new();
        loop {
            let pattern = self.parse_pattern()?;

            if let Pattern::Identifier {
                identifier,
                annotation,
            } = &pattern
            {
                if self.starts_accessor_block() {
                    let body = if self.block_is_observers() {
                        VariableBody::Observed {
                            identifier: identifier.clone(),
                            annotation: annotation.clone(),
                            initializer: None,
                        }
                    } else if let Some(annotation) = annotation {
                        VariableBody::Computed {
                            identifier: identifier.clone(),
                            annotation: annotation.clone(),
                        }
                    } else {
                        return Err(self.error("type annotation on computed property"));
                    };
                    self.skip_newlines();
                    self.skip_block()?;
                    return Ok(VariableDeclaration {
                        attributes,
                        modifiers,
                        body,
                    });
                }
            }

            let initializer = if self.eat(TokenKind::Eq) {
                Some(self.skip_expression()?)
            } else {
                None
            };

            if initializers.is_empty() && self.at(TokenKind::LBrace) && self.block_is_observers() {
                let Pattern::Identifier {
                    identifier,
                    annotation,
                } = pattern
                else {
                    return Err(self.error("identifier pattern before observers"));
                };
                self.skip_block()?;
                return Ok(VariableDeclaration {
                    attributes,
                    modifiers,
                    body: VariableBody::Observed {
                        identifier,
                        annotation,
                        initializer,
                    },
                });
            }

            initializers.push(PatternInitializer {
                pattern,
                initializer,
            });
            if !self.eat(TokenKind::Comma) {
                break;
            }
            self.skip_newlines();
        }

        Ok(VariableDeclaration {
            attributes,
            modifiers,
            body: VariableBody::InitializerList(initializers),
        })
    }

    /// True if an accessor block `{ ... }` follows, possibly on the next line.
    fn starts_accessor_block(&self) -> bool {
        self.token_at(self.next_significant()).kind == TokenKind::LBrace
    }

    /// True if the upcoming block starts with `willSet` or `didSet`.
    fn block_is_observers(&self) -> bool {
        let mut idx = self.next_significant();
        if self.token_at(idx).kind != TokenKind::LBrace {
            return false;
        }
        idx += 1;
        while matches!(self.token_at(idx).kind, TokenKind::Newline) {
            idx += 1;
        }
        // attributes on accessors
        while self.token_at(idx).kind == TokenKind::At {
            idx += 2;
            while matches!(self.token_at(idx).kind, TokenKind::Newline) {
                idx += 1;
            }
        }
        let token = self.token_at(idx);
        token.kind == TokenKind::Identifier
            && matches!(token.text(self.source), "willSet" | "didSet")
    }

    fn parse_function(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<FunctionDeclaration, ParseError> {
        self.bump();
        let name = match self.kind() {
            TokenKind::Identifier | TokenKind::Backticked => {
                self.parse_identifier()?.to_string()
            }
            _ => {
                let start = self.current().span.start;
                let mut end = start;
                while !matches!(
                    self.kind(),
                    TokenKind::LParen | TokenKind::Lt | TokenKind::Eof | TokenKind::Newline
                ) || (self.at(TokenKind::Lt) && end == start)
                {
                    end = self.bump().span.end;
                }
                if end == start {
                    return Err(self.error("function name"));
                }
                self.slice(start, end).to_string()
            }
        };
        let has_body = self.skip_signature_and_body()?;

        Ok(FunctionDeclaration {
            attributes,
            modifiers,
            name,
            has_body,
        })
    }

    fn parse_initializer(
        &mut self,
        attributes: Vec<Attribute>,
        modifiers: Vec<Modifier>,
    ) -> Result<InitializerDeclaration, ParseError> {
        self.bump();
        let failable =
            self.is_adjacent() && (self.eat(TokenKind::Question) || self.eat(TokenKind::Bang));
        self.skip_signature_and_body()?;

        Ok(InitializerDeclaration {
            attributes,
            modifiers,
            failable,
        })
    }

    fn parse_typealias(
        &mut self,
        modifiers: Vec<Modifier>,
    ) -> Result<TypeAliasDeclaration, ParseError> {
        self.bump();
        let name = self.parse_identifier()?;
        self.parse_generic_parameters()?;
        self.expect(TokenKind::Eq, "'='")?;
        let ty = self.parse_type()?;
        Ok(TypeAliasDeclaration {
            modifiers,
            name,
            ty,
        })
    }

    // ── Patterns and identifiers ─────────────────────────────────────────

    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        match self.kind() {
            TokenKind::Identifier => {
                let text = self.bump().text(self.source);
                if text == "_" {
                    Ok(Identifier::Wildcard)
                } else {
                    Ok(Identifier::Name(text.to_string()))
                }
            }
            TokenKind::Backticked => {
                let text = self.bump().text(self.source);
                Ok(Identifier::Backticked(text[1..text.len() - 1].to_string()))
            }
            _ => Err(self.error("identifier")),
        }
    }

    fn parse_pattern(&mut self) -> Result<Pattern, ParseError> {
        if self.eat(TokenKind::LParen) {
            let mut elements = Vec::new();
            loop {
                self.skip_newlines();
                if self.eat(TokenKind::RParen) {
                    break;
                }
                elements.push(self.parse_pattern()?);
                self.skip_newlines();
                if !self.eat(TokenKind::Comma) {
                    self.expect(TokenKind::RParen, "')'")?;
                    break;
                }
            }
            let annotation = self.parse_annotation()?;
            return Ok(Pattern::Tuple {
                elements,
                annotation,
            });
        }

        let identifier = self.parse_identifier()?;
        let annotation = self.parse_annotation()?;
        Ok(match identifier {
            Identifier::Wildcard => Pattern::Wildcard { annotation },
            identifier => Pattern::Identifier {
                identifier,
                annotation,
            },
        })
    }

    fn parse_annotation(&mut self) -> Result<Option<TypeSyntax>, ParseError> {
        if self.eat(TokenKind::Colon) {
            Ok(Some(self.parse_type()?))
        } else {
            Ok(None)
        }
    }

    // ── Types ────────────────────────────────────────────────────────────

    fn parse_type(&mut self) -> Result<TypeSyntax, ParseError> {
        while self.at(TokenKind::At) {
            self.parse_attribute()?;
        }
        while matches!(self.text(), "inout" | "borrowing" | "consuming" | "sending")
            && self.at(TokenKind::Identifier)
            && matches!(
                self.nth_kind(1),
                TokenKind::Identifier | TokenKind::LParen | TokenKind::LBracket
            )
        {
            self.bump();
        }

        let first = self.parse_postfix_type()?;
        if !self.at(TokenKind::Amp) {
            return Ok(first);
        }

        let mut parts = vec![first];
        while self.eat(TokenKind::Amp) {
            parts.push(self.parse_postfix_type()?);
        }
        Ok(TypeSyntax::Composition(parts))
    }

    fn parse_postfix_type(&mut self) -> Result<TypeSyntax, ParseError> {
        if self.at_keyword("some") && self.nth_kind(1) != TokenKind::Dot {
            self.bump();
            return Ok(TypeSyntax::Opaque(Box::new(self.parse_postfix_type()?)));
        }
        if self.at_keyword("any") && self.nth_kind(1) != TokenKind::Dot {
            self.bump();
            return Ok(TypeSyntax::Existential(Box::new(self.parse_postfix_type()?)));
        }

        let mut ty = self.parse_primary_type()?;
        loop {
            match self.kind() {
                TokenKind::Question if self.is_adjacent() => {
                    self.bump();
                    ty = TypeSyntax::Optional(Box::new(ty));
                }
                TokenKind::Bang if self.is_adjacent() => {
                    self.bump();
                    ty = TypeSyntax::ImplicitlyUnwrapped(Box::new(ty));
                }
                TokenKind::Dot if matches!(self.nth_text(1), "Type" | "Protocol") => {
                    self.bump();
                    let kind = if self.bump().text(self.source) == "Type" {
                        MetatypeKind::Type
                    } else {
                        MetatypeKind::Protocol
                    };
                    ty = TypeSyntax::Metatype {
                        base: Box::new(ty),
                        kind,
                    };
                }
                _ => return Ok(ty),
            }
        }
    }

    fn parse_primary_type(&mut self) -> Result<TypeSyntax, ParseError> {
        match self.kind() {
            TokenKind::LParen => {
                let mut parameters = self.parse_tuple_elements()?;
                let mut is_async = false;
                let mut throws = false;
                loop {
                    match self.text() {
                        "async" if self.at(TokenKind::Identifier) => is_async = true,
                        "throws" | "rethrows" if self.at(TokenKind::Identifier) => {
                            throws = true;
                            self.bump();
                            if self.at(TokenKind::LParen) && self.is_adjacent() {
                                // typed throws
                                self.bump();
                                self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                            }
                            continue;
                        }
                        _ => break,
                    }
                    self.bump();
                }

                if self.eat(TokenKind::Arrow) {
                    let result = self.parse_type()?;
                    return Ok(TypeSyntax::Function {
                        parameters,
                        result: Box::new(result),
                        is_async,
                        throws,
                    });
                }

                if parameters.elements.len() == 1 && parameters.elements[0].label.is_none() {
                    // parenthesized type
                    if let Some(single) = parameters.elements.pop() {
                        return Ok(single.ty);
                    }
                }
                Ok(TypeSyntax::Tuple(parameters))
            }
            TokenKind::LBracket => {
                self.bump();
                self.skip_newlines();
                let element = self.parse_type()?;
                self.skip_newlines();
                let ty = if self.eat(TokenKind::Colon) {
                    let value = self.parse_type()?;
                    TypeSyntax::Dictionary {
                        key: Box::new(element),
                        value: Box::new(value),
                    }
                } else {
                    TypeSyntax::Array(Box::new(element))
                };
                self.skip_newlines();
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(ty)
            }
            TokenKind::Identifier | TokenKind::Backticked => {
                Ok(TypeSyntax::Identifier(self.parse_type_identifier()?))
            }
            _ => Err(self.error("type")),
        }
    }

    fn parse_type_identifier(&mut self) -> Result<TypeIdentifier, ParseError> {
        let mut names = vec![self.parse_type_name()?];
        while self.at(TokenKind::Dot)
            && matches!(self.nth_kind(1), TokenKind::Identifier | TokenKind::Backticked)
            && !matches!(self.nth_text(1), "Type" | "Protocol")
        {
            self.bump();
            names.push(self.parse_type_name()?);
        }
        Ok(TypeIdentifier { names })
    }

    fn parse_type_name(&mut self) -> Result<TypeName, ParseError> {
        let name = self.parse_identifier()?;
        let mut generic_arguments = Vec::new();
        if self.at(TokenKind::Lt) && self.is_adjacent() {
            self.bump();
            loop {
                generic_arguments.push(self.parse_type()?);
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
            self.expect(TokenKind::Gt, "'>'")?;
        }
        Ok(TypeName {
            name,
            generic_arguments,
        })
    }

    /// Parses `(label: T, U, _ name: V)` starting at the opening parenthesis.
    fn parse_tuple_elements(&mut self) -> Result<TupleType, ParseError> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut elements = Vec::new();
        loop {
            self.skip_newlines();
            if self.eat(TokenKind::RParen) {
                break;
            }

            let label = if matches!(self.kind(), TokenKind::Identifier | TokenKind::Backticked)
                && self.nth_kind(1) == TokenKind::Colon
            {
                let label = self.parse_identifier()?;
                self.bump();
                Some(label.to_string())
            } else if self.at(TokenKind::Identifier)
                && self.nth_kind(1) == TokenKind::Identifier
                && self.nth_kind(2) == TokenKind::Colon
            {
                // `_ name:` or `external internal:` in function types
                self.bump();
                let label = self.parse_identifier()?;
                self.bump();
                Some(label.to_string())
            } else {
                None
            };

            let ty = self.parse_type()?;
            if self.eat(TokenKind::Eq) {
                // default argument value
                self.skip_expression()?;
            }
            if self.at(TokenKind::Dot) && self.nth_kind(1) == TokenKind::Dot {
                // variadic `T...`
                while self.eat(TokenKind::Dot) {}
            }
            elements.push(TupleTypeElement { label, ty });

            self.skip_newlines();
            if !self.eat(TokenKind::Comma) {
                self.skip_newlines();
                self.expect(TokenKind::RParen, "')'")?;
                break;
            }
        }
        Ok(TupleType { elements })
    }

    // ── Skipping ─────────────────────────────────────────────────────────

    /// Consumes tokens up to and including the `close` matching an already
    /// consumed `open`. Returns the closing token.
    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) -> Result<Token, ParseError> {
        let mut depth = 1u32;
        loop {
            let token = self.current();
            if token.kind == TokenKind::Eof {
                return Err(self.error("closing delimiter"));
            }
            self.bump();
            if token.kind == open {
                depth += 1;
            } else if token.kind == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(token);
                }
            }
        }
    }

    /// Skips a `{ ... }` block starting at the opening brace.
    fn skip_block(&mut self) -> Result<(), ParseError> {
        self.expect(TokenKind::LBrace, "'{'")?;
        self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?;
        Ok(())
    }

    fn skip_to_line_end(&mut self) {
        while !matches!(
            self.kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            self.bump();
        }
    }

    /// Skips a function-like signature and its optional body.
    ///
    /// Returns whether a body was present.
    fn skip_signature_and_body(&mut self) -> Result<bool, ParseError> {
        loop {
            match self.kind() {
                TokenKind::LParen => {
                    self.bump();
                    self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?;
                }
                TokenKind::LBracket => {
                    self.bump();
                    self.skip_balanced(TokenKind::LBracket, TokenKind::RBracket)?;
                }
                TokenKind::LBrace => {
                    self.skip_block()?;
                    return Ok(true);
                }
                TokenKind::Newline => {
                    if self.token_at(self.next_significant()).kind == TokenKind::LBrace
                        || self.continues_on_next_line()
                    {
                        self.skip_newlines();
                    } else {
                        return Ok(false);
                    }
                }
                TokenKind::RBrace | TokenKind::Semicolon | TokenKind::Eof => return Ok(false),
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// True if the line after the current newline continues a signature
    /// (`-> T`, `throws`, a `where` clause).
    fn continues_on_next_line(&self) -> bool {
        let token = self.token_at(self.next_significant());
        match token.kind {
            TokenKind::Arrow => true,
            TokenKind::Identifier => matches!(
                token.text(self.source),
                "where" | "throws" | "rethrows" | "async"
            ),
            _ => false,
        }
    }

    /// Skips an expression and returns its source text.
    ///
    /// Stops before a top-level `,`, `;`, closing delimiter, line break not
    /// followed by an operator continuation, or an observer block.
    fn skip_expression(&mut self) -> Result<String, ParseError> {
        let start = self.current().span.start;
        let mut end = start;
        loop {
            match self.kind() {
                TokenKind::LParen => {
                    self.bump();
                    end = self.skip_balanced(TokenKind::LParen, TokenKind::RParen)?.span.end;
                }
                TokenKind::LBracket => {
                    self.bump();
                    end = self
                        .skip_balanced(TokenKind::LBracket, TokenKind::RBracket)?
                        .span
                        .end;
                }
                TokenKind::LBrace => {
                    if self.block_is_observers() {
                        break;
                    }
                    self.bump();
                    end = self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace)?.span.end;
                }
                TokenKind::Newline => {
                    let next = self.token_at(self.next_significant());
                    let continues = matches!(
                        next.kind,
                        TokenKind::Dot
                            | TokenKind::Operator
                            | TokenKind::Eq
                            | TokenKind::Question
                            | TokenKind::Amp
                            | TokenKind::Lt
                            | TokenKind::Gt
                            | TokenKind::Arrow
                    );
                    if !continues {
                        break;
                    }
                    self.skip_newlines();
                }
                TokenKind::Comma
                | TokenKind::Semicolon
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::Eof => break,
                _ => {
                    end = self.bump().span.end;
                }
            }
        }

        if end == start {
            return Err(self.error("expression"));
        }
        Ok(self.slice(start, end).to_string())
    }
}
