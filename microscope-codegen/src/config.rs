//! Lens generation settings.

/// Configuration for generated lens artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LensConfig {
    /// Suffix appended to the structure name for the generated class and file.
    pub suffix: String,
    /// Extension of generated files, without the dot.
    pub extension: String,
    /// Generic lens type used for every property.
    pub lens_type: String,
    /// Module providing the lens type.
    pub support_module: String,
    /// Modules imported before the support module.
    pub imports: Vec<String>,
    /// Access level of the generated class.
    pub access_level: String,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            suffix: "Microscope".to_string(),
            extension: "swift".to_string(),
            lens_type: "SimpleLens".to_string(),
            support_module: "Focus".to_string(),
            imports: vec!["Foundation".to_string()],
            access_level: "public".to_string(),
        }
    }
}

impl LensConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the class and file name suffix.
    #[must_use]
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the file extension.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the lens type name.
    #[must_use]
    pub fn lens_type(mut self, lens_type: impl Into<String>) -> Self {
        self.lens_type = lens_type.into();
        self
    }

    /// Sets the module providing the lens type.
    #[must_use]
    pub fn support_module(mut self, module: impl Into<String>) -> Self {
        self.support_module = module.into();
        self
    }

    /// Replaces the extra imports.
    #[must_use]
    pub fn imports<I, S>(mut self, imports: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.imports = imports.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the access level of the generated class.
    #[must_use]
    pub fn access_level(mut self, access_level: impl Into<String>) -> Self {
        self.access_level = access_level.into();
        self
    }

    /// Returns the generated class name for a structure.
    #[must_use]
    pub fn class_name(&self, structure_name: &str) -> String {
        format!("{structure_name}{}", self.suffix)
    }

    /// Returns the artifact file name for a structure.
    #[must_use]
    pub fn file_name(&self, structure_name: &str) -> String {
        format!("{}.{}", self.class_name(structure_name), self.extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_name() {
        let config = LensConfig::default();
        assert_eq!(config.class_name("Point"), "PointMicroscope");
        assert_eq!(config.file_name("Point"), "PointMicroscope.swift");
    }

    #[test]
    fn test_builder_setters() {
        let config = LensConfig::new()
            .suffix("Lenses")
            .extension("gen.swift")
            .lens_type("Lens")
            .support_module("Optics")
            .imports(["Foundation", "Combine"])
            .access_level("internal");

        assert_eq!(config.file_name("Point"), "PointLenses.gen.swift");
        assert_eq!(config.lens_type, "Lens");
        assert_eq!(config.support_module, "Optics");
        assert_eq!(config.imports, vec!["Foundation", "Combine"]);
        assert_eq!(config.access_level, "internal");
    }
}
