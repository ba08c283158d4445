use crate::dependency_collection::domain::{
    Artifact, Dependency, ManagedDependency, RemoteRepository,
};
use crate::shared::Result;
use async_trait::async_trait;

/// What a repository declares about one concrete artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDescriptor {
    /// Artifact the descriptor was read for
    pub artifact: Artifact,
    /// Declared direct dependencies, in declaration order
    pub dependencies: Vec<Dependency>,
    /// Declared dependency management entries
    pub managed_dependencies: Vec<ManagedDependency>,
    /// Set when the artifact moved to other coordinates
    pub relocated_to: Option<Artifact>,
    /// Additional repositories for the artifact's dependencies
    pub repositories: Vec<RemoteRepository>,
    /// Repository the descriptor came from
    pub repository: Option<RemoteRepository>,
}

impl ArtifactDescriptor {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact,
            dependencies: Vec::new(),
            managed_dependencies: Vec::new(),
            relocated_to: None,
            repositories: Vec::new(),
            repository: None,
        }
    }
}

/// DescriptorReader port for reading artifact descriptors
///
/// Implementations must be `Send + Sync`; the collector reads the
/// descriptors of one level concurrently.
#[async_trait]
pub trait DescriptorReader: Send + Sync {
    /// Reads the descriptor of a concrete (non-range) artifact
    ///
    /// # Errors
    /// Returns `CollectError::DescriptorUnavailable` (or any transport
    /// error) when the descriptor cannot be read
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
    ) -> Result<ArtifactDescriptor>;
}
