use super::{ArtifactKey, DependencyNode, NodeId, NodeKind};
use crate::shared::error::CollectError;
use std::collections::HashMap;
use std::fmt;

/// Outcome of one collection call.
///
/// The tree may contain `Duplicate` markers when the skipper was enabled;
/// `expand_duplicates` replaces them with copies of the referenced subtree.
#[derive(Debug, Clone)]
pub struct CollectResult {
    pub(crate) root: DependencyNode,
    pub(crate) errors: Vec<CollectError>,
    pub(crate) conflicts: Vec<ManagementConflict>,
    pub(crate) stats: CollectStats,
    pub(crate) complete: bool,
}

impl CollectResult {
    pub fn root(&self) -> &DependencyNode {
        &self.root
    }

    /// Recoverable errors in the order they were encountered
    pub fn errors(&self) -> &[CollectError] {
        &self.errors
    }

    pub fn conflicts(&self) -> &[ManagementConflict] {
        &self.conflicts
    }

    pub fn stats(&self) -> &CollectStats {
        &self.stats
    }

    /// False when the collection was cancelled before the last level
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn find(&self, id: NodeId) -> Option<&DependencyNode> {
        self.root.find(id)
    }

    pub fn nodes(&self) -> Vec<&DependencyNode> {
        self.root.nodes()
    }

    pub fn dump(&self) -> String {
        self.root.dump()
    }

    /// Tree with every `Duplicate` marker replaced by the referenced node's
    /// expansion (children, kind, relocation). The marker keeps its own
    /// dependency, id and depth.
    pub fn expand_duplicates(&self) -> DependencyNode {
        let index: HashMap<NodeId, &DependencyNode> = self
            .root
            .nodes()
            .into_iter()
            .map(|node| (node.id, node))
            .collect();
        expand(&self.root, &index)
    }
}

fn expand<'a>(node: &'a DependencyNode, index: &HashMap<NodeId, &'a DependencyNode>) -> DependencyNode {
    let mut source = node;
    let mut seen = 0;
    while let NodeKind::Duplicate { of } = source.kind {
        match index.get(&of) {
            Some(target) if seen < index.len() => {
                source = *target;
                seen += 1;
            }
            _ => break,
        }
    }

    let mut expanded = node.clone();
    if !std::ptr::eq(source, node) {
        expanded.kind = source.kind;
        expanded.relocations = source.relocations.clone();
        expanded.repository = source.repository.clone();
        if let (Some(own), Some(target)) = (&node.dependency, &source.dependency) {
            expanded.dependency = Some(own.clone().with_artifact(target.artifact().clone()));
        }
    }
    expanded.children = source
        .children
        .iter()
        .map(|child| expand(child, index))
        .collect();
    expanded
}

/// Counters gathered during one collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub levels: usize,
    pub nodes: usize,
    pub duplicates: usize,
    pub cycles: usize,
    pub skipper_hits: usize,
    pub skipper_misses: usize,
    pub descriptor_reads: usize,
    pub version_resolutions: usize,
    pub relocations: usize,
}

/// Management field a conflict was recorded for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagedField {
    Version,
    Scope,
    Optional,
}

impl fmt::Display for ManagedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ManagedField::Version => "version",
            ManagedField::Scope => "scope",
            ManagedField::Optional => "optional",
        };
        f.write_str(name)
    }
}

/// A farther management entry disagreed with a nearer one and was ignored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManagementConflict {
    pub(crate) key: ArtifactKey,
    pub(crate) field: ManagedField,
    pub(crate) kept: String,
    pub(crate) discarded: String,
}

impl ManagementConflict {
    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn field(&self) -> ManagedField {
        self.field
    }

    pub fn kept(&self) -> &str {
        &self.kept
    }

    pub fn discarded(&self) -> &str {
        &self.discarded
    }
}

impl fmt::Display for ManagementConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "managed {} of {} kept '{}', ignored '{}'",
            self.field, self.key, self.kept, self.discarded
        )
    }
}
