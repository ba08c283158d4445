use crate::adapters::outbound::repository::InMemoryRepository;
use crate::dependency_collection::domain::{
    Artifact, ArtifactKey, Dependency, Exclusion, ExclusionSet, ManagedDependency,
    RemoteRepository, Scope, Version,
};
use crate::ports::outbound::ArtifactDescriptor;
use crate::shared::error::CollectError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Conventional manifest file name
pub const MANIFEST_FILENAME: &str = "dep-collect.repository.yml";

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    #[serde(default)]
    repositories: Vec<RepositoryEntry>,
    #[serde(default)]
    artifacts: Vec<ArtifactEntry>,
    #[serde(default)]
    versions: Vec<VersionsEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RepositoryEntry {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ArtifactEntry {
    coordinates: String,
    repository: Option<String>,
    #[serde(default)]
    dependencies: Vec<DependencyEntry>,
    #[serde(default)]
    managed: Vec<ManagedEntry>,
    relocated_to: Option<String>,
    #[serde(default)]
    repositories: Vec<RepositoryEntry>,
    #[serde(default)]
    unavailable: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DependencyEntry {
    coordinates: String,
    #[serde(default)]
    scope: String,
    #[serde(default)]
    optional: bool,
    #[serde(default)]
    exclusions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManagedEntry {
    key: String,
    version: Option<String>,
    scope: Option<String>,
    optional: Option<bool>,
    #[serde(default)]
    exclusions: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct VersionsEntry {
    key: String,
    versions: Vec<String>,
}

/// ManifestRepositoryLoader - reads a YAML repository manifest
///
/// The manifest lists artifacts with their declared dependencies, managed
/// dependencies, relocation and availability, plus version listings for
/// artifacts that only need to appear in range resolution.
///
/// ```yaml
/// repositories:
///   - id: central
///     url: https://repo.example/maven2
/// artifacts:
///   - coordinates: org.acme:app:1.0
///     repository: central
///     dependencies:
///       - coordinates: org.acme:lib:[1.0,2.0)
///         scope: runtime
///         exclusions: [org.acme:legacy]
///     managed:
///       - key: org.acme:util
///         version: "3.0"
/// versions:
///   - key: org.acme:lib
///     versions: ["1.0", "1.5"]
/// ```
pub struct ManifestRepositoryLoader;

impl ManifestRepositoryLoader {
    /// Loads a manifest file with the usual input file checks
    pub fn load(path: &Path) -> Result<InMemoryRepository> {
        let content = read_input_file(path, "repository manifest")?;
        Self::parse(&content).with_context(|| {
            format!(
                "Failed to load repository manifest: {}\n\n💡 Hint: Ensure the file is valid YAML with 'repositories', 'artifacts' and 'versions' sections.",
                path.display()
            )
        })
    }

    /// Parses manifest YAML into an in-memory repository
    pub fn parse(content: &str) -> Result<InMemoryRepository> {
        let manifest: ManifestFile = serde_yaml_ng::from_str(content).map_err(|e| {
            CollectError::Validation {
                message: format!("Invalid manifest: {}", e),
            }
        })?;

        let repositories = manifest
            .repositories
            .iter()
            .map(|r| RemoteRepository::new(&r.id, &r.url))
            .collect::<Result<Vec<_>>>()?;
        let by_id: HashMap<&str, &RemoteRepository> =
            repositories.iter().map(|r| (r.id(), r)).collect();

        let mut repository = InMemoryRepository::new();
        if let Some(first) = repositories.first() {
            repository = repository.with_repository(first.clone());
        }

        for entry in &manifest.artifacts {
            let artifact = Artifact::parse(&entry.coordinates)?;

            let mut descriptor = ArtifactDescriptor::new(artifact.clone());
            descriptor.dependencies = entry
                .dependencies
                .iter()
                .map(parse_dependency)
                .collect::<Result<Vec<_>>>()?;
            descriptor.managed_dependencies = entry
                .managed
                .iter()
                .map(parse_managed)
                .collect::<Result<Vec<_>>>()?;
            descriptor.relocated_to = entry
                .relocated_to
                .as_deref()
                .map(Artifact::parse)
                .transpose()?;
            descriptor.repositories = entry
                .repositories
                .iter()
                .map(|r| RemoteRepository::new(&r.id, &r.url))
                .collect::<Result<Vec<_>>>()?;
            descriptor.repository = entry
                .repository
                .as_deref()
                .map(|id| {
                    by_id
                        .get(id)
                        .map(|r| (*r).clone())
                        .ok_or_else(|| CollectError::Validation {
                            message: format!(
                                "Artifact {} refers to unknown repository '{}'",
                                entry.coordinates, id
                            ),
                        })
                })
                .transpose()?;

            repository = repository.with_descriptor(descriptor);
            if entry.unavailable {
                repository = repository.with_unavailable(artifact);
            }
        }

        for entry in &manifest.versions {
            let key = ArtifactKey::parse(&entry.key)?;
            for version in &entry.versions {
                repository =
                    repository.with_available_version(key.clone(), Version::new(version.as_str())?);
            }
        }

        Ok(repository)
    }
}

fn parse_dependency(entry: &DependencyEntry) -> Result<Dependency> {
    let exclusions = entry
        .exclusions
        .iter()
        .map(|pattern| Exclusion::parse(pattern))
        .collect::<Result<ExclusionSet>>()?;
    Ok(Dependency::parse(&entry.coordinates, &entry.scope)?
        .with_optional(entry.optional)
        .with_exclusions(exclusions))
}

fn parse_managed(entry: &ManagedEntry) -> Result<ManagedDependency> {
    let mut managed = ManagedDependency::parse(&entry.key)?;
    if let Some(ref version) = entry.version {
        managed = managed.with_version(version.as_str());
    }
    if let Some(ref scope) = entry.scope {
        managed = managed.with_scope(Scope::parse(scope)?);
    }
    if let Some(optional) = entry.optional {
        managed = managed.with_optional(optional);
    }
    for pattern in &entry.exclusions {
        managed = managed.with_exclusion(Exclusion::parse(pattern)?);
    }
    Ok(managed)
}
