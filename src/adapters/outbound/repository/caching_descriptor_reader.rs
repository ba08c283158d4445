use crate::dependency_collection::domain::{Artifact, RemoteRepository};
use crate::ports::outbound::{ArtifactDescriptor, DescriptorReader};
use crate::shared::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// Cache key for descriptors: the artifact plus the repository ids it was
/// read from
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    artifact: Artifact,
    repositories: Vec<String>,
}

impl CacheKey {
    fn new(artifact: &Artifact, repositories: &[RemoteRepository]) -> Self {
        Self {
            artifact: artifact.clone(),
            repositories: repositories.iter().map(|r| r.id().to_string()).collect(),
        }
    }
}

/// CachingDescriptorReader wraps a DescriptorReader and adds in-memory caching.
///
/// Only successful reads are cached; a failed read is retried by the next
/// caller. The cache is thread-safe and can be shared between collections
/// by cloning the reader.
pub struct CachingDescriptorReader<R: DescriptorReader> {
    inner: R,
    cache: Arc<DashMap<CacheKey, ArtifactDescriptor>>,
}

impl<R: DescriptorReader> CachingDescriptorReader<R> {
    /// Creates a new caching reader wrapping the given inner reader
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    /// Returns the current cache size
    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl<R: DescriptorReader + Clone> Clone for CachingDescriptorReader<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            cache: Arc::clone(&self.cache),
        }
    }
}

#[async_trait]
impl<R: DescriptorReader> DescriptorReader for CachingDescriptorReader<R> {
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
    ) -> Result<ArtifactDescriptor> {
        let key = CacheKey::new(artifact, repositories);

        // Check cache first
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }

        // Cache miss: read through the inner reader
        let descriptor = self.inner.read_descriptor(artifact, repositories).await?;

        self.cache.insert(key, descriptor.clone());

        Ok(descriptor)
    }
}
