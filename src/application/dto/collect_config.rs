use crate::dependency_collection::domain::Scope;
use crate::dependency_collection::policies::{DependencyManagerKind, ManagementPrecedence};
use crate::shared::error::CollectError;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::time::Duration;

/// Default number of concurrent repository calls per level
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// CollectConfig - immutable settings for one collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectConfig {
    skipper_enabled: bool,
    dependency_manager: DependencyManagerKind,
    accepted_scopes: BTreeSet<Scope>,
    use_range_resolution: bool,
    include_optional: bool,
    max_concurrency: usize,
    max_depth: Option<usize>,
    request_timeout: Option<Duration>,
    management_precedence: ManagementPrecedence,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            skipper_enabled: false,
            dependency_manager: DependencyManagerKind::Classic,
            accepted_scopes: BTreeSet::new(),
            use_range_resolution: true,
            include_optional: false,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            max_depth: None,
            request_timeout: None,
            management_precedence: ManagementPrecedence::Request,
        }
    }
}

impl CollectConfig {
    pub fn builder() -> CollectConfigBuilder {
        CollectConfigBuilder::default()
    }

    /// Builder pre-filled with this configuration's values
    pub fn to_builder(&self) -> CollectConfigBuilder {
        CollectConfigBuilder {
            config: self.clone(),
        }
    }

    pub fn skipper_enabled(&self) -> bool {
        self.skipper_enabled
    }

    pub fn dependency_manager(&self) -> DependencyManagerKind {
        self.dependency_manager
    }

    /// Scopes kept in the graph; empty accepts every scope
    pub fn accepted_scopes(&self) -> &BTreeSet<Scope> {
        &self.accepted_scopes
    }

    /// When false a range keeps every matching version as sibling nodes
    pub fn use_range_resolution(&self) -> bool {
        self.use_range_resolution
    }

    pub fn include_optional(&self) -> bool {
        self.include_optional
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn management_precedence(&self) -> ManagementPrecedence {
        self.management_precedence
    }
}

#[derive(Debug, Clone, Default)]
pub struct CollectConfigBuilder {
    config: CollectConfig,
}

impl CollectConfigBuilder {
    pub fn skipper_enabled(mut self, enabled: bool) -> Self {
        self.config.skipper_enabled = enabled;
        self
    }

    pub fn dependency_manager(mut self, kind: DependencyManagerKind) -> Self {
        self.config.dependency_manager = kind;
        self
    }

    pub fn accepted_scopes(mut self, scopes: impl IntoIterator<Item = Scope>) -> Self {
        self.config.accepted_scopes = scopes.into_iter().collect();
        self
    }

    pub fn use_range_resolution(mut self, enabled: bool) -> Self {
        self.config.use_range_resolution = enabled;
        self
    }

    pub fn include_optional(mut self, include: bool) -> Self {
        self.config.include_optional = include;
        self
    }

    pub fn max_concurrency(mut self, max: usize) -> Self {
        self.config.max_concurrency = max;
        self
    }

    pub fn max_depth(mut self, depth: Option<usize>) -> Self {
        self.config.max_depth = depth;
        self
    }

    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn management_precedence(mut self, precedence: ManagementPrecedence) -> Self {
        self.config.management_precedence = precedence;
        self
    }

    pub fn build(self) -> Result<CollectConfig> {
        if self.config.max_concurrency == 0 {
            return Err(CollectError::Validation {
                message: "max_concurrency must be at least 1".to_string(),
            }
            .into());
        }
        if self.config.max_depth == Some(0) {
            return Err(CollectError::Validation {
                message: "max_depth must be at least 1 when set".to_string(),
            }
            .into());
        }
        if self.config.request_timeout == Some(Duration::ZERO) {
            return Err(CollectError::Validation {
                message: "request_timeout must be greater than zero when set".to_string(),
            }
            .into());
        }
        Ok(self.config)
    }
}
