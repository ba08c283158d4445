//! Configuration file support for dep-collect.
//!
//! Provides YAML-based configuration through `dep-collect.config.yml` files,
//! including data structures, file loading, validation and conversion into a
//! `CollectConfig`.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::application::dto::CollectConfig;
use crate::dependency_collection::domain::Scope;
use crate::dependency_collection::policies::{DependencyManagerKind, ManagementPrecedence};
use crate::ports::outbound::ProgressReporter;
use crate::shared::security::validate_input_file;
use crate::shared::security::MAX_INPUT_FILE_SIZE;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dep-collect.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub skipper_enabled: Option<bool>,
    pub dependency_manager: Option<String>,
    pub accepted_scopes: Option<Vec<String>>,
    pub use_range_resolution: Option<bool>,
    pub include_optional: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub max_depth: Option<usize>,
    pub request_timeout_ms: Option<u64>,
    pub management_precedence: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// Applies the file's settings on top of `base`
    pub fn apply_to(&self, base: &CollectConfig) -> Result<CollectConfig> {
        let mut builder = base.to_builder();

        if let Some(enabled) = self.skipper_enabled {
            builder = builder.skipper_enabled(enabled);
        }
        if let Some(ref kind) = self.dependency_manager {
            builder = builder.dependency_manager(kind.parse::<DependencyManagerKind>()?);
        }
        if let Some(ref scopes) = self.accepted_scopes {
            let scopes = scopes
                .iter()
                .map(|s| Scope::parse(s))
                .collect::<Result<Vec<_>>>()?;
            builder = builder.accepted_scopes(scopes);
        }
        if let Some(enabled) = self.use_range_resolution {
            builder = builder.use_range_resolution(enabled);
        }
        if let Some(include) = self.include_optional {
            builder = builder.include_optional(include);
        }
        if let Some(max) = self.max_concurrency {
            builder = builder.max_concurrency(max);
        }
        if let Some(depth) = self.max_depth {
            builder = builder.max_depth(Some(depth));
        }
        if let Some(millis) = self.request_timeout_ms {
            builder = builder.request_timeout(Some(Duration::from_millis(millis)));
        }
        if let Some(ref precedence) = self.management_precedence {
            builder = builder.management_precedence(precedence.parse::<ManagementPrecedence>()?);
        }

        builder.build()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_input_file(path, "config file", MAX_INPUT_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Loads `path` and converts it into a `CollectConfig`, reporting unknown
/// fields through `reporter`.
pub fn load_collect_config(path: &Path, reporter: &dyn ProgressReporter) -> Result<CollectConfig> {
    let file = load_config_from_path(path)?;
    warn_unknown_fields(&file, reporter);
    file.apply_to(&CollectConfig::default())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if config.max_concurrency == Some(0) {
        bail!(
            "Invalid config: max_concurrency must be at least 1.\n\n\
             💡 Hint: Remove the field to use the default of 8."
        );
    }
    if config.max_depth == Some(0) {
        bail!(
            "Invalid config: max_depth must be at least 1.\n\n\
             💡 Hint: Remove the field to collect without a depth limit."
        );
    }
    if config.request_timeout_ms == Some(0) {
        bail!(
            "Invalid config: request_timeout_ms must be greater than 0.\n\n\
             💡 Hint: Remove the field to disable timeouts."
        );
    }
    if let Some(ref kind) = config.dependency_manager {
        kind.parse::<DependencyManagerKind>()?;
    }
    if let Some(ref precedence) = config.management_precedence {
        precedence.parse::<ManagementPrecedence>()?;
    }
    if let Some(ref scopes) = config.accepted_scopes {
        for (i, scope) in scopes.iter().enumerate() {
            if scope.trim().is_empty() {
                bail!(
                    "Invalid config: accepted_scopes[{}] must not be empty.\n\n\
                     💡 Hint: Use one of compile, runtime, provided, test, system.",
                    i
                );
            }
            Scope::parse(scope)?;
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile, reporter: &dyn ProgressReporter) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        reporter.report_error(&format!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        ));
    }
}
