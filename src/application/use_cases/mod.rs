/// Use cases module containing application business logic orchestration
mod collect_dependencies;
mod resolve_version_constraint;

pub use collect_dependencies::{CollectDependenciesUseCase, MAX_RELOCATIONS};
pub use resolve_version_constraint::{VersionConstraintResolver, VersionResolution};
