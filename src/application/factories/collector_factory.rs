use crate::adapters::outbound::filesystem::ManifestRepositoryLoader;
use crate::adapters::outbound::repository::{CachingDescriptorReader, InMemoryRepository};
use crate::application::dto::{CollectConfig, CollectSession};
use crate::application::use_cases::CollectDependenciesUseCase;
use crate::config::{load_collect_config, CONFIG_FILENAME};
use crate::ports::outbound::ProgressReporter;
use crate::shared::Result;
use std::path::Path;

/// Collector reading descriptors from an in-memory repository through a
/// descriptor cache
pub type ManifestCollector<PR> =
    CollectDependenciesUseCase<CachingDescriptorReader<InMemoryRepository>, InMemoryRepository, PR>;

/// Factory wiring repository adapters and configuration into a collector
///
/// It belongs in the application layer as it selects the infrastructure
/// adapters a collection runs against.
pub struct CollectorFactory;

impl CollectorFactory {
    /// Creates a collector serving both ports from `repository`
    pub fn from_repository<PR: ProgressReporter>(
        repository: InMemoryRepository,
        progress_reporter: PR,
    ) -> ManifestCollector<PR> {
        CollectDependenciesUseCase::new(
            CachingDescriptorReader::new(repository.clone()),
            repository,
            progress_reporter,
        )
    }

    /// Creates a collector from a YAML repository manifest
    pub fn from_manifest<PR: ProgressReporter>(
        path: &Path,
        progress_reporter: PR,
    ) -> Result<ManifestCollector<PR>> {
        progress_reporter.report(&format!(
            "📖 Loading repository manifest from: {}",
            path.display()
        ));
        let repository = ManifestRepositoryLoader::load(path)?;
        progress_reporter.report(&format!(
            "✅ Loaded {} artifact descriptor(s)",
            repository.descriptor_count()
        ));
        Ok(Self::from_repository(repository, progress_reporter))
    }

    /// Session configured from `dep-collect.config.yml` in `dir`, or the
    /// defaults when the file does not exist
    pub fn session_for_dir(dir: &Path, progress_reporter: &dyn ProgressReporter) -> Result<CollectSession> {
        let config_path = dir.join(CONFIG_FILENAME);
        let config = if config_path.exists() {
            progress_reporter.report(&format!(
                "⚙️  Using config file: {}",
                config_path.display()
            ));
            load_collect_config(&config_path, progress_reporter)?
        } else {
            CollectConfig::default()
        };
        Ok(CollectSession::new(config))
    }
}
