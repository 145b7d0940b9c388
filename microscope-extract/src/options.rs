//! Traversal options.

use microscope_syntax::CompositeKind;

/// Options controlling which declarations a conversion run picks up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOptions {
    public_only: bool,
    strict_names: bool,
    composite_kinds: Vec<CompositeKind>,
}

impl ConversionOptions {
    /// Creates options with default settings.
    ///
    /// Defaults: every access level accepted, last-write-wins name
    /// registration, `class` and `struct` declarations visited.
    #[must_use]
    pub fn new() -> Self {
        Self {
            public_only: false,
            strict_names: false,
            composite_kinds: vec![CompositeKind::Class, CompositeKind::Struct],
        }
    }

    /// Only extract declarations carrying an explicit `public` or `open`
    /// modifier.
    #[must_use]
    pub fn public_only(mut self, enabled: bool) -> Self {
        self.public_only = enabled;
        self
    }

    /// Reject a second, different registration under an already used name.
    #[must_use]
    pub fn strict_names(mut self, enabled: bool) -> Self {
        self.strict_names = enabled;
        self
    }

    /// Sets the composite declaration kinds that are visited.
    #[must_use]
    pub fn composite_kinds(mut self, kinds: impl IntoIterator<Item = CompositeKind>) -> Self {
        self.composite_kinds = kinds.into_iter().collect();
        self
    }

    /// Adds a composite declaration kind to the visited set.
    #[must_use]
    pub fn with_composite_kind(mut self, kind: CompositeKind) -> Self {
        if !self.composite_kinds.contains(&kind) {
            self.composite_kinds.push(kind);
        }
        self
    }

    /// Returns true if the public-only filter is active.
    #[must_use]
    pub fn is_public_only(&self) -> bool {
        self.public_only
    }

    /// Returns true if name collisions are faults.
    #[must_use]
    pub fn uses_strict_names(&self) -> bool {
        self.strict_names
    }

    /// Returns true if declarations of `kind` are visited.
    #[must_use]
    pub fn visits(&self, kind: CompositeKind) -> bool {
        self.composite_kinds.contains(&kind)
    }
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self::new()
    }
}
