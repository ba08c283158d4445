use async_trait::async_trait;
use dep_collect::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock DescriptorReader for testing
///
/// Records every read and the highest number of reads in flight at once.
#[derive(Clone, Default)]
pub struct MockDescriptorReader {
    descriptors: HashMap<Artifact, ArtifactDescriptor>,
    failing: HashSet<Artifact>,
    delay: Option<Duration>,
    reads: Arc<Mutex<Vec<Artifact>>>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

impl MockDescriptorReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor declaring `dependencies` (compile scope)
    pub fn with_artifact(self, coords: &str, dependencies: &[&str]) -> Self {
        let dependencies = dependencies
            .iter()
            .map(|d| Dependency::parse(d, "compile").unwrap())
            .collect();
        self.with_dependencies(coords, dependencies)
    }

    pub fn with_dependencies(self, coords: &str, dependencies: Vec<Dependency>) -> Self {
        let mut descriptor = ArtifactDescriptor::new(Artifact::parse(coords).unwrap());
        descriptor.dependencies = dependencies;
        self.with_descriptor(descriptor)
    }

    pub fn with_descriptor(mut self, descriptor: ArtifactDescriptor) -> Self {
        self.descriptors
            .insert(descriptor.artifact.clone(), descriptor);
        self
    }

    pub fn with_failure(mut self, coords: &str) -> Self {
        self.failing.insert(Artifact::parse(coords).unwrap());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn read_count(&self) -> usize {
        self.reads.lock().unwrap().len()
    }

    pub fn reads_of(&self, coords: &str) -> usize {
        let artifact = Artifact::parse(coords).unwrap();
        self.reads
            .lock()
            .unwrap()
            .iter()
            .filter(|a| **a == artifact)
            .count()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescriptorReader for MockDescriptorReader {
    async fn read_descriptor(
        &self,
        artifact: &Artifact,
        _repositories: &[RemoteRepository],
    ) -> Result<ArtifactDescriptor> {
        self.reads.lock().unwrap().push(artifact.clone());
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(artifact) {
            anyhow::bail!("Mock descriptor failure for {}", artifact);
        }
        self.descriptors
            .get(artifact)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No mock descriptor for {}", artifact))
    }
}
