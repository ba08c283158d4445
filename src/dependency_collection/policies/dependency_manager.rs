use crate::dependency_collection::domain::{
    ArtifactKey, Dependency, Exclusion, ManagedDependency, ManagedField, ManagementConflict,
    Premanaged, Scope,
};
use crate::shared::error::CollectError;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which descriptors contribute management entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DependencyManagerKind {
    /// Only the request/root and the direct dependencies' descriptors
    #[default]
    Classic,
    /// Every descriptor along the path
    Transitive,
}

impl FromStr for DependencyManagerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(DependencyManagerKind::Classic),
            "transitive" => Ok(DependencyManagerKind::Transitive),
            other => Err(CollectError::Validation {
                message: format!(
                    "Unknown dependency manager '{}' (expected 'classic' or 'transitive')",
                    other
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for DependencyManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyManagerKind::Classic => f.write_str("classic"),
            DependencyManagerKind::Transitive => f.write_str("transitive"),
        }
    }
}

/// Which list wins when the request and the root descriptor manage the
/// same key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ManagementPrecedence {
    #[default]
    Request,
    Descriptor,
}

impl ManagementPrecedence {
    /// Orders the two root-level lists so that the preferred one comes first
    pub fn order(
        &self,
        request: &[ManagedDependency],
        descriptor: &[ManagedDependency],
    ) -> Vec<ManagedDependency> {
        let (first, second) = match self {
            ManagementPrecedence::Request => (request, descriptor),
            ManagementPrecedence::Descriptor => (descriptor, request),
        };
        first.iter().chain(second).cloned().collect()
    }
}

impl FromStr for ManagementPrecedence {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "request" => Ok(ManagementPrecedence::Request),
            "descriptor" => Ok(ManagementPrecedence::Descriptor),
            other => Err(CollectError::Validation {
                message: format!(
                    "Unknown management precedence '{}' (expected 'request' or 'descriptor')",
                    other
                ),
            }
            .into()),
        }
    }
}

impl fmt::Display for ManagementPrecedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManagementPrecedence::Request => f.write_str("request"),
            ManagementPrecedence::Descriptor => f.write_str("descriptor"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
struct ManagedEntry {
    version: Option<String>,
    scope: Option<Scope>,
    optional: Option<bool>,
    exclusions: BTreeSet<Exclusion>,
}

/// Management entries visible at one node, keyed by versionless artifact
/// key. Entries absorbed earlier (nearer the root) win.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ManagementContext {
    entries: BTreeMap<ArtifactKey, ManagedEntry>,
}

impl ManagementContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn managed_version(&self, key: &ArtifactKey) -> Option<&str> {
        self.entries.get(key).and_then(|e| e.version.as_deref())
    }

    pub fn managed_scope(&self, key: &ArtifactKey) -> Option<Scope> {
        self.entries.get(key).and_then(|e| e.scope)
    }

    /// Adds entries that are not yet managed. Fields already set are kept
    /// and every disagreement is returned. Exclusions always accumulate.
    pub fn absorb(&mut self, managed: &[ManagedDependency]) -> Vec<ManagementConflict> {
        let mut conflicts = Vec::new();

        for item in managed {
            let entry = self.entries.entry(item.key().clone()).or_default();

            if let Some(version) = item.version() {
                match &entry.version {
                    None => entry.version = Some(version.to_string()),
                    Some(kept) if kept != version => conflicts.push(ManagementConflict {
                        key: item.key().clone(),
                        field: ManagedField::Version,
                        kept: kept.clone(),
                        discarded: version.to_string(),
                    }),
                    Some(_) => {}
                }
            }

            if let Some(scope) = item.scope() {
                match entry.scope {
                    None => entry.scope = Some(scope),
                    Some(kept) if kept != scope => conflicts.push(ManagementConflict {
                        key: item.key().clone(),
                        field: ManagedField::Scope,
                        kept: kept.to_string(),
                        discarded: scope.to_string(),
                    }),
                    Some(_) => {}
                }
            }

            if let Some(optional) = item.optional() {
                match entry.optional {
                    None => entry.optional = Some(optional),
                    Some(kept) if kept != optional => conflicts.push(ManagementConflict {
                        key: item.key().clone(),
                        field: ManagedField::Optional,
                        kept: kept.to_string(),
                        discarded: optional.to_string(),
                    }),
                    Some(_) => {}
                }
            }

            entry.exclusions.extend(item.exclusions().iter().cloned());
        }

        conflicts
    }
}

/// Dependency after management plus the values it replaced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagedOutcome {
    pub dependency: Dependency,
    pub premanaged: Premanaged,
}

/// Applies management entries to transitive dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependencyManager {
    kind: DependencyManagerKind,
}

impl DependencyManager {
    pub fn new(kind: DependencyManagerKind) -> Self {
        Self { kind }
    }

    fn collects_at(&self, node_depth: usize) -> bool {
        match self.kind {
            DependencyManagerKind::Classic => node_depth <= 1,
            DependencyManagerKind::Transitive => true,
        }
    }

    /// Management context for the children of a node at `node_depth` that
    /// declares `declared` in its descriptor.
    pub fn derive_child_context(
        &self,
        context: &Arc<ManagementContext>,
        node_depth: usize,
        declared: &[ManagedDependency],
    ) -> (Arc<ManagementContext>, Vec<ManagementConflict>) {
        if declared.is_empty() || !self.collects_at(node_depth) {
            return (Arc::clone(context), Vec::new());
        }

        let mut child = ManagementContext::clone(context);
        let conflicts = child.absorb(declared);
        (Arc::new(child), conflicts)
    }

    /// Rewrites `dependency` (about to become a node at `depth`) using the
    /// entries visible at its parent. Direct dependencies are left alone.
    pub fn manage(
        &self,
        dependency: &Dependency,
        context: &ManagementContext,
        depth: usize,
    ) -> ManagedOutcome {
        let mut premanaged = Premanaged::default();
        let entry = if depth >= 2 {
            context.entries.get(dependency.artifact().key())
        } else {
            None
        };

        let Some(entry) = entry else {
            return ManagedOutcome {
                dependency: dependency.clone(),
                premanaged,
            };
        };

        let mut managed = dependency.clone();

        if let Some(version) = &entry.version {
            if version != dependency.artifact().version() {
                premanaged.version = Some(dependency.artifact().version().to_string());
                managed = managed.with_version(version.as_str());
            }
        }
        if let Some(scope) = entry.scope {
            if scope != dependency.scope() {
                premanaged.scope = Some(dependency.scope());
                managed = managed.with_scope(scope);
            }
        }
        if let Some(optional) = entry.optional {
            if optional != dependency.is_optional() {
                premanaged.optional = Some(dependency.is_optional());
                managed = managed.with_optional(optional);
            }
        }
        managed = managed.with_added_exclusions(&entry.exclusions);

        ManagedOutcome {
            dependency: managed,
            premanaged,
        }
    }
}
