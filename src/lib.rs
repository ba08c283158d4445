//! dep-collect - breadth-first dependency graph collection
//!
//! This library builds the raw dependency tree of an artifact from
//! repository descriptors: version ranges are resolved, management entries
//! are applied, selection filters prune the tree and identical subtrees are
//! collected once. It follows hexagonal architecture and Domain-Driven
//! Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_collection`): Coordinates, nodes, selection and management policies, the skipper
//! - **Application Layer** (`application`): The collection use case, requests, configuration and sessions
//! - **Ports** (`ports`): Interface definitions for descriptor and version sources
//! - **Adapters** (`adapters`): In-memory and manifest-backed repositories, progress reporting
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use dep_collect::prelude::*;
//! use std::path::Path;
//!
//! # async fn run() -> Result<()> {
//! let collector = CollectorFactory::from_manifest(
//!     Path::new("dep-collect.repository.yml"),
//!     StderrProgressReporter::new(),
//! )?;
//! let session = CollectorFactory::session_for_dir(Path::new("."), &StderrProgressReporter::new())?;
//!
//! let request = CollectRequest::builder()
//!     .root(Dependency::parse("org.example:app:1.0", "compile")?)
//!     .build()?;
//! let result = collector.execute(&session, request).await?;
//!
//! print!("{}", result.dump());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod dependency_collection;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::ManifestRepositoryLoader;
    pub use crate::adapters::outbound::repository::{CachingDescriptorReader, InMemoryRepository};
    pub use crate::application::dto::{
        CancellationFlag, CollectConfig, CollectRequest, CollectSession,
    };
    pub use crate::application::factories::CollectorFactory;
    pub use crate::application::use_cases::{
        CollectDependenciesUseCase, VersionConstraintResolver,
    };
    pub use crate::dependency_collection::domain::{
        Artifact, ArtifactKey, AvailableVersion, CollectResult, CollectStats, Dependency,
        DependencyNode, Exclusion, ManagedDependency, ManagementConflict, NodeId, NodeKind,
        RemoteRepository, Scope, Version, VersionConstraint,
    };
    pub use crate::dependency_collection::policies::{
        DependencyManagerKind, ManagementPrecedence, SelectorChain,
    };
    pub use crate::dependency_collection::services::Skipper;
    pub use crate::ports::inbound::DependencyCollectionPort;
    pub use crate::ports::outbound::{
        ArtifactDescriptor, DescriptorReader, ProgressReporter, VersionRangeResolver,
    };
    pub use crate::shared::error::CollectError;
    pub use crate::shared::Result;
}
