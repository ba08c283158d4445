use crate::dependency_collection::domain::{
    Artifact, ArtifactKey, Dependency, DependencyNode, ExclusionSet, NodeId, NodeKind, Premanaged,
    RemoteRepository, Scope, VersionConstraint,
};
use crate::dependency_collection::policies::ManagementContext;
use std::collections::HashSet;
use std::sync::Arc;

/// Dependency waiting to become a node on the next level
#[derive(Debug, Clone)]
pub(super) struct FrontierUnit {
    pub parent: NodeId,
    /// Managed dependency carrying its effective scope
    pub dependency: Dependency,
    pub premanaged: Premanaged,
    pub declared_scope: Scope,
    pub declared_optional: bool,
    /// Exclusions inherited from the ancestors
    pub exclusions: Arc<ExclusionSet>,
    /// Management visible to this dependency and its descriptor
    pub management: Arc<ManagementContext>,
    pub repositories: Arc<Vec<RemoteRepository>>,
    pub depth: usize,
}

/// Node claimed for expansion whose descriptor is read in the next phase
#[derive(Debug, Clone)]
pub(super) struct PendingExpansion {
    pub id: NodeId,
    pub artifact: Artifact,
    pub scope: Scope,
    /// Inherited exclusions plus the node's own
    pub child_exclusions: Arc<ExclusionSet>,
    pub management: Arc<ManagementContext>,
    pub repositories: Arc<Vec<RemoteRepository>>,
    pub depth: usize,
}

#[derive(Debug, Clone)]
pub(super) struct NodeSlot {
    pub parent: Option<NodeId>,
    pub dependency: Option<Dependency>,
    pub artifact: Option<Artifact>,
    pub kind: NodeKind,
    pub children: Vec<NodeId>,
    pub repository: Option<RemoteRepository>,
    pub version_constraint: Option<VersionConstraint>,
    pub premanaged: Premanaged,
    pub relocations: Vec<Artifact>,
    pub depth: usize,
}

impl NodeSlot {
    pub fn new(dependency: Dependency, premanaged: Premanaged, depth: usize) -> Self {
        Self {
            parent: None,
            dependency: Some(dependency),
            artifact: None,
            kind: NodeKind::Resolved,
            children: Vec::new(),
            repository: None,
            version_constraint: None,
            premanaged,
            relocations: Vec::new(),
            depth,
        }
    }

    fn key(&self) -> Option<&ArtifactKey> {
        self.dependency
            .as_ref()
            .map(|d| d.artifact().key())
            .or(self.artifact.as_ref().map(Artifact::key))
    }

    /// The node's own key plus every key it was relocated away from
    fn keys(&self) -> impl Iterator<Item = &ArtifactKey> {
        self.key()
            .into_iter()
            .chain(self.relocations.iter().map(Artifact::key))
    }

    fn label(&self) -> Option<String> {
        self.dependency
            .as_ref()
            .map(|d| d.artifact().to_string())
            .or(self.artifact.as_ref().map(Artifact::to_string))
    }
}

/// Flat node storage used while the levels are processed. The immutable
/// tree is materialized once traversal ends.
#[derive(Debug, Default)]
pub(super) struct NodeArena {
    slots: Vec<NodeSlot>,
}

impl NodeArena {
    pub fn with_root(dependency: Option<Dependency>, artifact: Option<Artifact>) -> (Self, NodeId) {
        let root = NodeSlot {
            parent: None,
            dependency,
            artifact,
            kind: NodeKind::Resolved,
            children: Vec::new(),
            repository: None,
            version_constraint: None,
            premanaged: Premanaged::default(),
            relocations: Vec::new(),
            depth: 0,
        };
        (Self { slots: vec![root] }, NodeId(0))
    }

    pub fn slot(&self, id: NodeId) -> &NodeSlot {
        &self.slots[id.0]
    }

    pub fn slot_mut(&mut self, id: NodeId) -> &mut NodeSlot {
        &mut self.slots[id.0]
    }

    pub fn add_child(&mut self, parent: NodeId, mut slot: NodeSlot) -> NodeId {
        let id = NodeId(self.slots.len());
        slot.parent = Some(parent);
        self.slots.push(slot);
        self.slots[parent.0].children.push(id);
        id
    }

    /// Whether `key` appears on `node` or any of its ancestors, counting
    /// the artifacts a node was relocated away from
    pub fn path_contains(&self, node: NodeId, key: &ArtifactKey) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let slot = self.slot(id);
            if slot.keys().any(|k| k == key) {
                return true;
            }
            current = slot.parent;
        }
        false
    }

    /// Whether a relocated node landed on an artifact already above it
    pub fn relocated_into_path(&self, node: NodeId) -> bool {
        let slot = self.slot(node);
        match slot.parent {
            Some(parent) if !slot.relocations.is_empty() => {
                slot.keys().any(|key| self.path_contains(parent, key))
            }
            _ => false,
        }
    }

    /// Whether the subtree collected under `original` comes out the same
    /// under the ancestors of `duplicate`. Cycle checks look at the whole
    /// path, so every key in the subtree must be on both outer paths or on
    /// neither.
    pub fn shares_ancestry(&self, original: NodeId, duplicate: NodeId) -> bool {
        let above_original = self.ancestor_keys(original);
        let above_duplicate = self.ancestor_keys(duplicate);
        self.subtree_keys(original)
            .iter()
            .all(|key| above_original.contains(key) == above_duplicate.contains(key))
    }

    fn ancestor_keys(&self, node: NodeId) -> HashSet<&ArtifactKey> {
        let mut keys = HashSet::new();
        let mut current = self.slot(node).parent;
        while let Some(id) = current {
            let slot = self.slot(id);
            keys.extend(slot.keys());
            current = slot.parent;
        }
        keys
    }

    /// Keys below and including `node`, following duplicate links
    fn subtree_keys(&self, node: NodeId) -> HashSet<&ArtifactKey> {
        let mut keys = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            let slot = self.slot(id);
            keys.extend(slot.keys());
            if let NodeKind::Duplicate { of } = slot.kind {
                stack.push(of);
            }
            stack.extend(slot.children.iter().copied());
        }
        keys
    }

    /// Artifacts from the root down to `node`, joined with " -> "
    pub fn path(&self, node: NodeId) -> String {
        let mut labels = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let slot = self.slot(id);
            if let Some(label) = slot.label() {
                labels.push(label);
            }
            current = slot.parent;
        }
        labels.reverse();
        labels.join(" -> ")
    }

    pub fn materialize(&self, id: NodeId) -> DependencyNode {
        let slot = self.slot(id);
        DependencyNode {
            id,
            dependency: slot.dependency.clone(),
            artifact: slot.artifact.clone(),
            kind: slot.kind,
            children: slot
                .children
                .iter()
                .map(|child| self.materialize(*child))
                .collect(),
            repository: slot.repository.clone(),
            version_constraint: slot.version_constraint.clone(),
            premanaged: slot.premanaged.clone(),
            relocations: slot.relocations.clone(),
            depth: slot.depth,
        }
    }
}
