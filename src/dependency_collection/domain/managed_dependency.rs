use super::{ArtifactKey, Exclusion, Scope};
use crate::shared::Result;

/// Management entry: overrides applied to matching dependencies deeper in
/// the graph. Every field except the key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManagedDependency {
    key: ArtifactKey,
    version: Option<String>,
    scope: Option<Scope>,
    optional: Option<bool>,
    exclusions: Vec<Exclusion>,
}

impl ManagedDependency {
    pub fn new(key: ArtifactKey) -> Self {
        Self {
            key,
            version: None,
            scope: None,
            optional: None,
            exclusions: Vec::new(),
        }
    }

    /// Parses the versionless key `group:artifact[:extension[:classifier]]`
    pub fn parse(key: &str) -> Result<Self> {
        Ok(Self::new(ArtifactKey::parse(key)?))
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = Some(optional);
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.push(exclusion);
        self
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn optional(&self) -> Option<bool> {
        self.optional
    }

    pub fn exclusions(&self) -> &[Exclusion] {
        &self.exclusions
    }
}
