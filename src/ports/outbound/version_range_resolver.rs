use crate::dependency_collection::domain::{Artifact, AvailableVersion, RemoteRepository};
use crate::shared::Result;
use async_trait::async_trait;

/// VersionRangeResolver port listing published versions of an artifact
#[async_trait]
pub trait VersionRangeResolver: Send + Sync {
    /// Lists versions of `artifact` that fall in its version range.
    ///
    /// The answer is re-filtered by the caller, so implementations may
    /// return every published version.
    ///
    /// # Errors
    /// Returns `CollectError::NoVersionsMatch` (or any transport error)
    async fn resolve_range(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
    ) -> Result<Vec<AvailableVersion>>;
}
