use crate::dependency_collection::domain::{Dependency, Exclusion, ExclusionSet, Scope};
use std::collections::BTreeSet;
use std::fmt;

/// Everything a selector may look at when deciding about one dependency
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// Dependency after management, carrying the derived effective scope
    pub dependency: &'a Dependency,
    /// Scope as declared, before management and derivation
    pub declared_scope: Scope,
    /// Optional flag as declared, before management
    pub declared_optional: bool,
    /// Depth the node would get (direct dependencies are at depth 1)
    pub depth: usize,
    /// Exclusions inherited from the ancestors
    pub exclusions: &'a ExclusionSet,
}

impl SelectionContext<'_> {
    fn is_transitive(&self) -> bool {
        self.depth >= 2
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    Excluded(Exclusion),
    OptionalTransitive,
    NonPropagatingScope(Scope),
    ScopeNotAccepted(Scope),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Excluded(exclusion) => write!(f, "excluded by {}", exclusion),
            RejectReason::OptionalTransitive => write!(f, "optional transitive dependency"),
            RejectReason::NonPropagatingScope(scope) => {
                write!(f, "scope '{}' does not propagate", scope)
            }
            RejectReason::ScopeNotAccepted(scope) => write!(f, "scope '{}' not accepted", scope),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Accept,
    Reject(RejectReason),
}

impl Selection {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Selection::Accept)
    }
}

/// Single filtering rule of the chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencySelector {
    /// Drops artifacts matching any inherited exclusion
    Exclusion,
    /// Drops optional dependencies below the direct level
    Optional { include: bool },
    /// Drops non-propagating transitive scopes and scopes outside the
    /// accepted set (an empty set accepts every scope)
    Scope { accepted: BTreeSet<Scope> },
}

impl DependencySelector {
    pub fn select(&self, ctx: &SelectionContext<'_>) -> Selection {
        match self {
            DependencySelector::Exclusion => {
                let artifact = ctx.dependency.artifact();
                match ctx.exclusions.iter().find(|e| e.matches(artifact)) {
                    Some(exclusion) => Selection::Reject(RejectReason::Excluded(exclusion.clone())),
                    None => Selection::Accept,
                }
            }
            DependencySelector::Optional { include } => {
                if !include && ctx.is_transitive() && ctx.declared_optional {
                    Selection::Reject(RejectReason::OptionalTransitive)
                } else {
                    Selection::Accept
                }
            }
            DependencySelector::Scope { accepted } => {
                if ctx.is_transitive() && !ctx.declared_scope.propagates() {
                    return Selection::Reject(RejectReason::NonPropagatingScope(
                        ctx.declared_scope,
                    ));
                }
                let effective = ctx.dependency.scope();
                if !accepted.is_empty() && !accepted.contains(&effective) {
                    return Selection::Reject(RejectReason::ScopeNotAccepted(effective));
                }
                Selection::Accept
            }
        }
    }
}

/// Exclusion, optional and scope selectors applied in that order; the first
/// rejection wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorChain {
    selectors: Vec<DependencySelector>,
}

impl SelectorChain {
    pub fn new(include_optional: bool, accepted_scopes: BTreeSet<Scope>) -> Self {
        Self {
            selectors: vec![
                DependencySelector::Exclusion,
                DependencySelector::Optional {
                    include: include_optional,
                },
                DependencySelector::Scope {
                    accepted: accepted_scopes,
                },
            ],
        }
    }

    pub fn select(&self, ctx: &SelectionContext<'_>) -> Selection {
        for selector in &self.selectors {
            if let Selection::Reject(reason) = selector.select(ctx) {
                return Selection::Reject(reason);
            }
        }
        Selection::Accept
    }
}

impl Default for SelectorChain {
    fn default() -> Self {
        Self::new(false, BTreeSet::new())
    }
}

/// Computes a child's effective scope from its parent's effective scope
pub struct ScopeDeriver;

impl ScopeDeriver {
    /// `parent` is `None` for direct dependencies of the root.
    pub fn derive(parent: Option<Scope>, child: Scope) -> Scope {
        let Some(parent) = parent else {
            return child;
        };

        match (parent, child) {
            (Scope::Compile, Scope::Compile | Scope::Runtime | Scope::System) => child,
            (Scope::Runtime, Scope::Compile | Scope::Runtime) => Scope::Runtime,
            (Scope::Runtime, Scope::System) => Scope::System,
            (Scope::Provided, Scope::Compile | Scope::Runtime | Scope::System) => Scope::Provided,
            (Scope::Test, Scope::Compile | Scope::Runtime | Scope::System) => Scope::Test,
            (Scope::System, Scope::Compile | Scope::Runtime) => Scope::Provided,
            (Scope::System, Scope::System) => Scope::System,
            // Managed test/provided scopes: the narrower of the two
            (_, Scope::Test | Scope::Provided) => {
                if child.breadth() <= parent.breadth() {
                    child
                } else {
                    parent
                }
            }
        }
    }
}
