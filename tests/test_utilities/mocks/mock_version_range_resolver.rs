use async_trait::async_trait;
use dep_collect::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock VersionRangeResolver for testing
#[derive(Clone, Default)]
pub struct MockVersionRangeResolver {
    versions: HashMap<ArtifactKey, Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl MockVersionRangeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_versions(mut self, key: &str, versions: &[&str]) -> Self {
        self.versions.insert(
            ArtifactKey::parse(key).unwrap(),
            versions.iter().map(|v| v.to_string()).collect(),
        );
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionRangeResolver for MockVersionRangeResolver {
    async fn resolve_range(
        &self,
        artifact: &Artifact,
        _repositories: &[RemoteRepository],
    ) -> Result<Vec<AvailableVersion>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let listed = self
            .versions
            .get(artifact.key())
            .ok_or_else(|| anyhow::anyhow!("No mock versions for {}", artifact.key()))?;
        listed
            .iter()
            .map(|v| Ok(AvailableVersion::new(Version::new(v.clone())?, None)))
            .collect()
    }
}
