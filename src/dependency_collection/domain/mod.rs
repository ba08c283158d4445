pub mod artifact;
pub mod collect_result;
pub mod dependency;
pub mod dependency_node;
pub mod exclusion;
pub mod managed_dependency;
pub mod repository;
pub mod scope;
pub mod version;
pub mod version_constraint;

pub use artifact::{Artifact, ArtifactKey, DEFAULT_EXTENSION};
pub use collect_result::{CollectResult, CollectStats, ManagedField, ManagementConflict};
pub use dependency::Dependency;
pub use dependency_node::{DependencyNode, NodeId, NodeKind, Premanaged};
pub use exclusion::{Exclusion, ExclusionSet, WILDCARD};
pub use managed_dependency::ManagedDependency;
pub use repository::{merge_repositories, RemoteRepository};
pub use scope::Scope;
pub use version::{AvailableVersion, Version};
pub use version_constraint::{VersionConstraint, VersionRange};
