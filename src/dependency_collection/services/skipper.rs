use crate::dependency_collection::domain::{
    Artifact, ExclusionSet, NodeId, RemoteRepository, Scope,
};
use crate::dependency_collection::policies::ManagementContext;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Full expansion context of a node. Two nodes with equal signatures
/// expand into identical subtrees.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkipperSignature {
    pub artifact: Artifact,
    pub scope: Scope,
    pub optional: bool,
    /// Exclusions in effect for the node's descendants
    pub exclusions: Arc<ExclusionSet>,
    /// Management context the node itself was managed under
    pub management: Arc<ManagementContext>,
    pub repositories: Arc<Vec<RemoteRepository>>,
    /// Filtering and management differ between the direct level and
    /// everything below it, so depths collapse into tiers
    pub depth_tier: usize,
}

/// Outcome of claiming a signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDecision {
    /// First occurrence; the caller expands the node
    Expand,
    /// Already expanded elsewhere
    Duplicate(NodeId),
}

/// Duplicate-subtree cache, scoped to one collection call.
///
/// When disabled every claim expands and nothing is recorded.
#[derive(Debug, Default)]
pub struct Skipper {
    enabled: bool,
    cache: DashMap<SkipperSignature, NodeId>,
    hits: AtomicUsize,
    misses: AtomicUsize,
}

impl Skipper {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            ..Self::default()
        }
    }

    pub fn lookup(&self, signature: &SkipperSignature) -> Option<NodeId> {
        if !self.enabled {
            return None;
        }
        self.cache.get(signature).map(|entry| *entry.value())
    }

    /// Records `node` as the expansion of `signature`. Returns false when
    /// another node got there first; the earlier record is kept.
    pub fn record(&self, signature: SkipperSignature, node: NodeId) -> bool {
        if !self.enabled {
            return false;
        }
        match self.cache.entry(signature) {
            Entry::Occupied(_) => false,
            Entry::Vacant(vacant) => {
                vacant.insert(node);
                true
            }
        }
    }

    /// Looks up and records in one step
    pub fn claim(&self, signature: SkipperSignature, node: NodeId) -> SkipDecision {
        if !self.enabled {
            return SkipDecision::Expand;
        }
        match self.cache.entry(signature) {
            Entry::Occupied(occupied) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                SkipDecision::Duplicate(*occupied.get())
            }
            Entry::Vacant(vacant) => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                vacant.insert(node);
                SkipDecision::Expand
            }
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> usize {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_collection::domain::Exclusion;

    fn signature(exclusions: &[&str]) -> SkipperSignature {
        SkipperSignature {
            artifact: Artifact::parse("g:x:1.0").unwrap(),
            scope: Scope::Compile,
            optional: false,
            exclusions: Arc::new(
                exclusions
                    .iter()
                    .map(|e| Exclusion::parse(e).unwrap())
                    .collect(),
            ),
            management: Arc::new(ManagementContext::new()),
            repositories: Arc::new(Vec::new()),
            depth_tier: 1,
        }
    }

    #[test]
    fn test_claim_first_writer_wins() {
        let skipper = Skipper::new(true);
        assert_eq!(skipper.claim(signature(&[]), NodeId(1)), SkipDecision::Expand);
        assert_eq!(
            skipper.claim(signature(&[]), NodeId(2)),
            SkipDecision::Duplicate(NodeId(1))
        );
        assert_eq!(skipper.hits(), 1);
        assert_eq!(skipper.misses(), 1);
        assert_eq!(skipper.len(), 1);
    }

    #[test]
    fn test_different_exclusions_are_distinct() {
        let skipper = Skipper::new(true);
        assert_eq!(skipper.claim(signature(&["g:t1"]), NodeId(1)), SkipDecision::Expand);
        assert_eq!(skipper.claim(signature(&["g:t2"]), NodeId(2)), SkipDecision::Expand);
        assert_eq!(skipper.len(), 2);
    }

    #[test]
    fn test_record_and_lookup() {
        let skipper = Skipper::new(true);
        assert!(skipper.lookup(&signature(&[])).is_none());
        assert!(skipper.record(signature(&[]), NodeId(4)));
        assert!(!skipper.record(signature(&[]), NodeId(5)));
        assert_eq!(skipper.lookup(&signature(&[])), Some(NodeId(4)));
    }

    #[test]
    fn test_disabled_skipper_always_expands() {
        let skipper = Skipper::new(false);
        assert_eq!(skipper.claim(signature(&[]), NodeId(1)), SkipDecision::Expand);
        assert_eq!(skipper.claim(signature(&[]), NodeId(2)), SkipDecision::Expand);
        assert!(skipper.is_empty());
        assert_eq!(skipper.hits(), 0);
    }
}
