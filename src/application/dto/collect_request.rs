use crate::dependency_collection::domain::{
    Artifact, Dependency, ManagedDependency, RemoteRepository,
};
use crate::shared::error::CollectError;
use crate::shared::Result;
use std::collections::HashSet;

/// CollectRequest - what to collect
///
/// Either a root dependency (resolved and read like any other node), a
/// root artifact used only as a label, or neither. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectRequest {
    root: Option<Dependency>,
    root_artifact: Option<Artifact>,
    dependencies: Vec<Dependency>,
    managed_dependencies: Vec<ManagedDependency>,
    repositories: Vec<RemoteRepository>,
}

impl CollectRequest {
    pub fn builder() -> CollectRequestBuilder {
        CollectRequestBuilder::default()
    }

    pub fn root(&self) -> Option<&Dependency> {
        self.root.as_ref()
    }

    pub fn root_artifact(&self) -> Option<&Artifact> {
        self.root_artifact.as_ref()
    }

    /// Direct dependencies, in declaration order
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn managed_dependencies(&self) -> &[ManagedDependency] {
        &self.managed_dependencies
    }

    pub fn repositories(&self) -> &[RemoteRepository] {
        &self.repositories
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectRequestBuilder {
    root: Option<Dependency>,
    root_artifact: Option<Artifact>,
    dependencies: Vec<Dependency>,
    managed_dependencies: Vec<ManagedDependency>,
    repositories: Vec<RemoteRepository>,
}

impl CollectRequestBuilder {
    pub fn root(mut self, root: Dependency) -> Self {
        self.root = Some(root);
        self
    }

    pub fn root_artifact(mut self, artifact: Artifact) -> Self {
        self.root_artifact = Some(artifact);
        self
    }

    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
        self.dependencies.extend(dependencies);
        self
    }

    pub fn managed_dependency(mut self, managed: ManagedDependency) -> Self {
        self.managed_dependencies.push(managed);
        self
    }

    pub fn managed_dependencies(
        mut self,
        managed: impl IntoIterator<Item = ManagedDependency>,
    ) -> Self {
        self.managed_dependencies.extend(managed);
        self
    }

    pub fn repository(mut self, repository: RemoteRepository) -> Self {
        self.repositories.push(repository);
        self
    }

    pub fn repositories(mut self, repositories: impl IntoIterator<Item = RemoteRepository>) -> Self {
        self.repositories.extend(repositories);
        self
    }

    pub fn build(self) -> Result<CollectRequest> {
        if self.root.is_some() && self.root_artifact.is_some() {
            return Err(CollectError::Validation {
                message: "A request takes either a root dependency or a root artifact, not both"
                    .to_string(),
            }
            .into());
        }

        let mut seen = HashSet::new();
        for repository in &self.repositories {
            if !seen.insert(repository.id()) {
                return Err(CollectError::Validation {
                    message: format!("Repository id '{}' is listed twice", repository.id()),
                }
                .into());
            }
        }

        Ok(CollectRequest {
            root: self.root,
            root_artifact: self.root_artifact,
            dependencies: self.dependencies,
            managed_dependencies: self.managed_dependencies,
            repositories: self.repositories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request() {
        let request = CollectRequest::builder()
            .root_artifact(Artifact::parse("g:app:1.0").unwrap())
            .dependency(Dependency::parse("g:a:1.0", "").unwrap())
            .managed_dependency(ManagedDependency::parse("g:y").unwrap().with_version("3.0"))
            .repository(RemoteRepository::new("central", "https://repo.example").unwrap())
            .build()
            .unwrap();

        assert!(request.root().is_none());
        assert_eq!(request.root_artifact().unwrap().artifact_id(), "app");
        assert_eq!(request.dependencies().len(), 1);
        assert_eq!(request.managed_dependencies().len(), 1);
        assert_eq!(request.repositories().len(), 1);
    }

    #[test]
    fn test_root_and_label_are_exclusive() {
        let result = CollectRequest::builder()
            .root(Dependency::parse("g:app:1.0", "").unwrap())
            .root_artifact(Artifact::parse("g:app:1.0").unwrap())
            .build();
        assert!(result.unwrap_err().to_string().contains("not both"));
    }

    #[test]
    fn test_duplicate_repository_ids_rejected() {
        let result = CollectRequest::builder()
            .repository(RemoteRepository::new("central", "https://a.example").unwrap())
            .repository(RemoteRepository::new("central", "https://b.example").unwrap())
            .build();
        assert!(result.unwrap_err().to_string().contains("listed twice"));
    }
}
