//! Lens generator.

use crate::config::LensConfig;
use crate::error::CodegenError;
use crate::ident::{is_identifier, is_keyword, is_type_name};
use crate::swift::{ArgumentSource, ConstructorArgument, LensDecl, MicroscopeFile};
use microscope_core::{LiteralType, Property, SType, Structure};

/// A rendered artifact and the file name it is written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// File name, without directory.
    pub file_name: String,
    /// Rendered source.
    pub contents: String,
}

/// Generator turning structures into lens artifacts.
pub struct Generator<'a> {
    config: &'a LensConfig,
}

impl<'a> Generator<'a> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(config: &'a LensConfig) -> Self {
        Self { config }
    }

    /// Builds the output model for one structure.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidIdentifier` if the package, the
    /// structure, a property or a property type cannot be emitted.
    pub fn build(
        &self,
        package: &str,
        structure: &Structure,
    ) -> Result<MicroscopeFile, CodegenError> {
        validate_package(package)?;
        if !is_type_name(&structure.name) || structure.name.contains('.') {
            return Err(CodegenError::invalid_identifier(&structure.name, "structure name"));
        }

        let lenses = structure
            .properties
            .iter()
            .map(|property| self.build_lens(structure, property))
            .collect::<Result<Vec<_>, _>>()?;

        let mut imports = self.config.imports.clone();
        imports.push(self.config.support_module.clone());
        imports.push(package.to_string());

        Ok(MicroscopeFile {
            imports,
            access_level: self.config.access_level.clone(),
            class_name: self.config.class_name(&structure.name),
            lenses,
        })
    }

    /// Renders the lens source for one structure.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidIdentifier` if a name cannot be emitted.
    pub fn generate(&self, package: &str, structure: &Structure) -> Result<String, CodegenError> {
        Ok(self.build(package, structure)?.to_string())
    }

    /// Renders one structure into a named artifact.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidIdentifier` if a name cannot be emitted.
    pub fn generate_artifact(
        &self,
        package: &str,
        structure: &Structure,
    ) -> Result<GeneratedArtifact, CodegenError> {
        Ok(GeneratedArtifact {
            file_name: self.config.file_name(&structure.name),
            contents: self.generate(package, structure)?,
        })
    }

    /// Renders every structure among `types`.
    ///
    /// Types other than structure literals are skipped. A structure whose
    /// names cannot be emitted is skipped with a warning. Artifacts are
    /// unique by file name: a later structure replaces an earlier one with
    /// the same file name, in place and with a warning.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidIdentifier` if `package` is not a valid
    /// module name.
    pub fn generate_all(
        &self,
        package: &str,
        types: &[SType],
    ) -> Result<Vec<GeneratedArtifact>, CodegenError> {
        validate_package(package)?;

        let mut artifacts: Vec<GeneratedArtifact> = Vec::new();
        for structure in types.iter().filter_map(SType::as_structure) {
            let artifact = match self.generate_artifact(package, structure) {
                Ok(artifact) => artifact,
                Err(e) => {
                    tracing::warn!("Skipping lenses for {}: {}", structure.name, e);
                    continue;
                }
            };

            match artifacts
                .iter_mut()
                .find(|existing| existing.file_name == artifact.file_name)
            {
                Some(existing) => {
                    tracing::warn!(
                        "Replacing {} with a later definition of {}",
                        existing.file_name,
                        structure.name
                    );
                    *existing = artifact;
                }
                None => artifacts.push(artifact),
            }
        }
        Ok(artifacts)
    }

    fn build_lens(
        &self,
        structure: &Structure,
        property: &Property,
    ) -> Result<LensDecl, CodegenError> {
        if !is_identifier(&property.name) {
            return Err(CodegenError::invalid_identifier(
                &property.name,
                format!("property of {}", structure.name),
            ));
        }

        let arguments = structure
            .properties
            .iter()
            .map(|p| {
                let source = if p.name == property.name {
                    ArgumentSource::NewValue
                } else {
                    ArgumentSource::Existing
                };
                ConstructorArgument::new(p.name.as_str(), source)
            })
            .collect();

        Ok(LensDecl {
            lens_type: self.config.lens_type.clone(),
            structure: structure.name.clone(),
            property: property.name.clone(),
            field_type: render_type(&property.ty)?,
            arguments,
        })
    }
}

/// Renders a property type as Swift type syntax.
///
/// # Errors
/// Returns `CodegenError::InvalidIdentifier` if a referenced name cannot be
/// emitted.
pub fn render_type(ty: &SType) -> Result<String, CodegenError> {
    let name = match ty {
        SType::Named(named) => &named.name,
        SType::Literal(LiteralType::Optional(inner)) => {
            return Ok(format!("{}?", render_type(inner)?));
        }
        SType::Literal(LiteralType::Structure(structure)) => &structure.name,
        SType::Literal(LiteralType::Choice(choice)) => &choice.name,
    };

    if is_type_name(name) {
        Ok(name.clone())
    } else {
        Err(CodegenError::invalid_identifier(name, "property type"))
    }
}

fn validate_package(package: &str) -> Result<(), CodegenError> {
    if is_identifier(package) && !is_keyword(package) {
        Ok(())
    } else {
        Err(CodegenError::invalid_identifier(package, "package name"))
    }
}
