use crate::dependency_collection::domain::CollectResult;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while collecting a dependency graph.
///
/// Branch-level failures are recoverable: they are stored in
/// `CollectResult::errors` next to an unresolved marker node and the rest of
/// the graph is still collected. Only a failing root aborts the collection.
#[derive(Debug, Clone, Error)]
pub enum CollectError {
    #[error("Failed to resolve root artifact {artifact}\nDetails: {details}\n\n💡 Hint: Please verify that the root coordinates are correct and its descriptor is available in the configured repositories")]
    RootResolutionFailure {
        artifact: String,
        details: String,
        /// Graph collected before the failure
        partial: Box<CollectResult>,
    },

    #[error("Failed to read descriptor of {artifact}\nPath: {path}\nDetails: {details}\n\n💡 Hint: The subtree below this dependency was not collected")]
    BranchDescriptorFailure {
        artifact: String,
        path: String,
        details: String,
    },

    #[error("Failed to resolve version {constraint} of {artifact}\nPath: {path}\nDetails: {details}\n\n💡 Hint: Please verify that a matching version is published in the configured repositories")]
    RangeResolutionFailure {
        artifact: String,
        constraint: String,
        path: String,
        details: String,
    },

    #[error("Descriptor not available: {artifact}\nDetails: {details}")]
    DescriptorUnavailable { artifact: String, details: String },

    #[error("No version of {artifact} matches {constraint}")]
    NoVersionsMatch { artifact: String, constraint: String },

    #[error("Timed out after {millis} ms while {operation} {artifact}\n\n💡 Hint: Increase request_timeout_ms or check repository availability")]
    Timeout {
        operation: String,
        artifact: String,
        millis: u128,
    },

    /// Validation error for builder patterns and coordinate parsing
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid configuration: {path}\nDetails: {details}\n\n💡 Hint: Please check the file against the documented options")]
    ConfigError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl CollectError {
    /// Whether the collection continued past this error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CollectError::BranchDescriptorFailure { .. } | CollectError::RangeResolutionFailure { .. }
        )
    }

    /// Partial graph attached to a root failure
    pub fn partial_result(&self) -> Option<&CollectResult> {
        match self {
            CollectError::RootResolutionFailure { partial, .. } => Some(partial),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_descriptor_failure_display() {
        let error = CollectError::BranchDescriptorFailure {
            artifact: "g:b:jar:1.0".to_string(),
            path: "g:a:jar:1.0 -> g:b:jar:1.0".to_string(),
            details: "connection reset".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to read descriptor of g:b:jar:1.0"));
        assert!(display.contains("g:a:jar:1.0 -> g:b:jar:1.0"));
        assert!(display.contains("connection reset"));
        assert!(display.contains("💡 Hint:"));
        assert!(error.is_recoverable());
        assert!(error.partial_result().is_none());
    }

    #[test]
    fn test_range_resolution_failure_display() {
        let error = CollectError::RangeResolutionFailure {
            artifact: "g:b:jar".to_string(),
            constraint: "[3.0,)".to_string(),
            path: "g:a:jar:1.0".to_string(),
            details: "No version of g:b:jar matches [3.0,)".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to resolve version [3.0,) of g:b:jar"));
        assert!(display.contains("💡 Hint:"));
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_port_errors_are_not_recoverable_markers() {
        let error = CollectError::NoVersionsMatch {
            artifact: "g:b:jar".to_string(),
            constraint: "[3.0,)".to_string(),
        };
        assert_eq!(error.to_string(), "No version of g:b:jar matches [3.0,)");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_security_error_display() {
        let error = CollectError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }

    #[test]
    fn test_config_error_display() {
        let error = CollectError::ConfigError {
            path: PathBuf::from("dep-collect.config.yml"),
            details: "max_concurrency must be at least 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid configuration: dep-collect.config.yml"));
        assert!(display.contains("max_concurrency must be at least 1"));
    }
}
