use crate::application::dto::{CollectRequest, CollectSession};
use crate::dependency_collection::domain::CollectResult;
use crate::shared::Result;
use async_trait::async_trait;

/// DependencyCollectionPort - Inbound port for dependency collection
///
/// Builds the raw dependency tree for a request. Recoverable branch
/// failures are part of the returned `CollectResult`; an `Err` means the
/// root itself could not be resolved or the request was invalid.
#[async_trait]
pub trait DependencyCollectionPort: Send + Sync {
    /// Collects the transitive dependencies described by `request`
    ///
    /// # Arguments
    /// * `session` - Configuration snapshot and cancellation handle
    /// * `request` - Root, direct and managed dependencies, repositories
    ///
    /// # Errors
    /// Returns `CollectError::RootResolutionFailure` (carrying the partial
    /// result) when the root's version or descriptor cannot be resolved
    async fn collect(&self, session: &CollectSession, request: CollectRequest)
        -> Result<CollectResult>;
}
