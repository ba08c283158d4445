use super::{Artifact, Exclusion, ExclusionSet, Scope};
use crate::shared::Result;
use std::fmt;

/// Declared edge from a parent to an artifact.
///
/// The artifact's version may still be a range; it is fixed once the
/// collector resolves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dependency {
    artifact: Artifact,
    scope: Scope,
    optional: bool,
    exclusions: ExclusionSet,
}

impl Dependency {
    pub fn new(artifact: Artifact, scope: Scope) -> Self {
        Self {
            artifact,
            scope,
            optional: false,
            exclusions: ExclusionSet::new(),
        }
    }

    /// Parses `group:artifact[:extension[:classifier]]:version` with a scope
    /// name (empty means compile).
    pub fn parse(coords: &str, scope: &str) -> Result<Self> {
        Ok(Self::new(Artifact::parse(coords)?, Scope::parse(scope)?))
    }

    pub fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.artifact = artifact;
        self
    }

    /// Same coordinates with another version or range
    pub fn with_version(self, version: impl Into<String>) -> Self {
        let artifact = self.artifact.with_version(version);
        self.with_artifact(artifact)
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_exclusion(mut self, exclusion: Exclusion) -> Self {
        self.exclusions.insert(exclusion);
        self
    }

    pub fn with_added_exclusions<'a>(
        mut self,
        exclusions: impl IntoIterator<Item = &'a Exclusion>,
    ) -> Self {
        self.exclusions.extend(exclusions.into_iter().cloned());
        self
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}", self.artifact, self.scope)?;
        if self.optional {
            write!(f, ", optional")?;
        }
        write!(f, ")")
    }
}
