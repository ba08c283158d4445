use super::{Artifact, Dependency, RemoteRepository, Scope, VersionConstraint};
use std::fmt;

/// Positional identifier of a node within one collection result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// How far a node was expanded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Descriptor read and children collected
    Resolved,
    /// Version or descriptor resolution failed; no children
    Unresolved,
    /// Same expansion context as another node; children live there
    Duplicate { of: NodeId },
    /// Versionless key already present on the path from the root
    Cycle,
    /// Configured maximum depth reached
    DepthLimited,
}

/// Values the dependency manager replaced on a node. A field is only set
/// when management actually changed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Premanaged {
    pub(crate) version: Option<String>,
    pub(crate) scope: Option<Scope>,
    pub(crate) optional: Option<bool>,
}

impl Premanaged {
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    pub fn optional(&self) -> Option<bool> {
        self.optional
    }

    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.scope.is_none() && self.optional.is_none()
    }
}

/// Node of the collected dependency tree.
///
/// The root has no dependency when the request did not name one; it may
/// still carry an artifact label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    pub(crate) id: NodeId,
    pub(crate) dependency: Option<Dependency>,
    pub(crate) artifact: Option<Artifact>,
    pub(crate) kind: NodeKind,
    pub(crate) children: Vec<DependencyNode>,
    pub(crate) repository: Option<RemoteRepository>,
    pub(crate) version_constraint: Option<VersionConstraint>,
    pub(crate) premanaged: Premanaged,
    pub(crate) relocations: Vec<Artifact>,
    pub(crate) depth: usize,
}

impl DependencyNode {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn dependency(&self) -> Option<&Dependency> {
        self.dependency.as_ref()
    }

    /// Artifact of the dependency, or the root label for a synthetic root
    pub fn artifact(&self) -> Option<&Artifact> {
        self.dependency
            .as_ref()
            .map(Dependency::artifact)
            .or(self.artifact.as_ref())
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[DependencyNode] {
        &self.children
    }

    /// Repository the version or descriptor came from
    pub fn repository(&self) -> Option<&RemoteRepository> {
        self.repository.as_ref()
    }

    /// Constraint the version was resolved from
    pub fn version_constraint(&self) -> Option<&VersionConstraint> {
        self.version_constraint.as_ref()
    }

    pub fn premanaged(&self) -> &Premanaged {
        &self.premanaged
    }

    /// Artifacts this node was relocated from, oldest first
    pub fn relocations(&self) -> &[Artifact] {
        &self.relocations
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Pre-order walk over this node and all descendants
    pub fn nodes(&self) -> Vec<&DependencyNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }

    pub fn find(&self, id: NodeId) -> Option<&DependencyNode> {
        self.nodes().into_iter().find(|node| node.id == id)
    }

    /// Children whose artifact id matches, in declaration order
    pub fn children_named(&self, artifact_id: &str) -> Vec<&DependencyNode> {
        self.children
            .iter()
            .filter(|child| child.artifact().is_some_and(|a| a.artifact_id() == artifact_id))
            .collect()
    }

    /// Renders the subtree without node ids so that trees built through
    /// different paths can be compared textually.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.label());
        out.push('\n');
        dump_children(self, "", &mut out);
        out
    }

    fn label(&self) -> String {
        let mut label = match (&self.dependency, &self.artifact) {
            (Some(dependency), _) => {
                let mut text = format!("{} [{}]", dependency.artifact(), dependency.scope());
                if dependency.is_optional() {
                    text.push_str(" optional");
                }
                text
            }
            (None, Some(artifact)) => artifact.to_string(),
            (None, None) => "(root)".to_string(),
        };

        if let Some(version) = &self.premanaged.version {
            label.push_str(&format!(" (version managed from {})", version));
        }
        if let Some(scope) = self.premanaged.scope {
            label.push_str(&format!(" (scope managed from {})", scope));
        }
        if let Some(optional) = self.premanaged.optional {
            label.push_str(&format!(" (optional managed from {})", optional));
        }
        if let Some(first) = self.relocations.first() {
            label.push_str(&format!(" (relocated from {})", first));
        }

        match self.kind {
            NodeKind::Resolved => {}
            NodeKind::Unresolved => label.push_str(" (unresolved)"),
            NodeKind::Duplicate { .. } => label.push_str(" (duplicate)"),
            NodeKind::Cycle => label.push_str(" (cycle)"),
            NodeKind::DepthLimited => label.push_str(" (depth limit)"),
        }
        label
    }
}

fn dump_children(node: &DependencyNode, prefix: &str, out: &mut String) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let last = index + 1 == count;
        out.push_str(prefix);
        out.push_str(if last { "\\- " } else { "+- " });
        out.push_str(&child.label());
        out.push('\n');

        let nested = format!("{}{}", prefix, if last { "   " } else { "|  " });
        dump_children(child, &nested, out);
    }
}
