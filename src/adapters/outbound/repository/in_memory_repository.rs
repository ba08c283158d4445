use crate::dependency_collection::domain::{
    Artifact, ArtifactKey, AvailableVersion, RemoteRepository, Version,
};
use crate::ports::outbound::{ArtifactDescriptor, DescriptorReader, VersionRangeResolver};
use crate::shared::error::CollectError;
use crate::shared::Result;
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
struct Contents {
    descriptors: HashMap<Artifact, ArtifactDescriptor>,
    versions: HashMap<ArtifactKey, Vec<AvailableVersion>>,
    unavailable: HashSet<Artifact>,
}

/// InMemoryRepository adapter serving descriptors and version listings
/// from memory.
///
/// Implements both `DescriptorReader` and `VersionRangeResolver`. Clones
/// share the same contents, so one instance can be handed to the collector
/// for both ports.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    contents: Arc<Contents>,
    repository: Option<RemoteRepository>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository stamped on descriptors and versions that carry none
    pub fn with_repository(mut self, repository: RemoteRepository) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Registers a descriptor; its version becomes available as well
    pub fn with_descriptor(mut self, descriptor: ArtifactDescriptor) -> Self {
        let contents = Arc::make_mut(&mut self.contents);
        let artifact = descriptor.artifact.clone();
        if let Ok(version) = Version::new(artifact.version()) {
            add_version(
                contents,
                artifact.key().clone(),
                AvailableVersion::new(version, descriptor.repository.clone()),
            );
        }
        contents.descriptors.insert(artifact, descriptor);
        self
    }

    /// Lists a version without a descriptor (reading it fails)
    pub fn with_available_version(mut self, key: ArtifactKey, version: Version) -> Self {
        let contents = Arc::make_mut(&mut self.contents);
        add_version(contents, key, AvailableVersion::new(version, None));
        self
    }

    /// Makes reading the artifact's descriptor fail
    pub fn with_unavailable(mut self, artifact: Artifact) -> Self {
        let contents = Arc::make_mut(&mut self.contents);
        contents.unavailable.insert(artifact);
        self
    }

    pub fn descriptor_count(&self) -> usize {
        self.contents.descriptors.len()
    }

    fn stamp(&self, repository: Option<RemoteRepository>) -> Option<RemoteRepository> {
        repository.or_else(|| self.repository.clone())
    }
}

fn add_version(contents: &mut Contents, key: ArtifactKey, available: AvailableVersion) {
    let listed = contents.versions.entry(key).or_default();
    if !listed.iter().any(|v| v.version() == available.version()) {
        listed.push(available);
    }
}

#[async_trait]
impl DescriptorReader for InMemoryRepository {
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        _repositories: &[RemoteRepository],
    ) -> Result<ArtifactDescriptor> {
        if self.contents.unavailable.contains(artifact) {
            return Err(CollectError::DescriptorUnavailable {
                artifact: artifact.to_string(),
                details: "descriptor marked unavailable".to_string(),
            }
            .into());
        }

        let Some(descriptor) = self.contents.descriptors.get(artifact) else {
            return Err(CollectError::DescriptorUnavailable {
                artifact: artifact.to_string(),
                details: "no descriptor in repository".to_string(),
            }
            .into());
        };

        let mut descriptor = descriptor.clone();
        descriptor.repository = self.stamp(descriptor.repository);
        Ok(descriptor)
    }
}

#[async_trait]
impl VersionRangeResolver for InMemoryRepository {
    async fn resolve_range(
        &self,
        artifact: &Artifact,
        _repositories: &[RemoteRepository],
    ) -> Result<Vec<AvailableVersion>> {
        let listed = self
            .contents
            .versions
            .get(artifact.key())
            .filter(|versions| !versions.is_empty())
            .ok_or_else(|| CollectError::NoVersionsMatch {
                artifact: artifact.key().to_string(),
                constraint: artifact.version().to_string(),
            })?;

        Ok(listed
            .iter()
            .map(|available| {
                AvailableVersion::new(
                    available.version().clone(),
                    self.stamp(available.repository().cloned()),
                )
            })
            .collect())
    }
}
