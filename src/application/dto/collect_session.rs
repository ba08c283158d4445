use super::CollectConfig;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation switch; clones observe the same state
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// CollectSession - configuration snapshot plus cancellation handle
///
/// The configuration is never mutated; `with_config` returns a new
/// session and leaves this one untouched. Sessions derived from each other
/// share the cancellation flag.
#[derive(Debug, Clone, Default)]
pub struct CollectSession {
    config: Arc<CollectConfig>,
    cancellation: CancellationFlag,
}

impl CollectSession {
    pub fn new(config: CollectConfig) -> Self {
        Self {
            config: Arc::new(config),
            cancellation: CancellationFlag::new(),
        }
    }

    pub fn config(&self) -> &CollectConfig {
        &self.config
    }

    pub fn cancellation(&self) -> &CancellationFlag {
        &self.cancellation
    }

    pub fn with_config(&self, config: CollectConfig) -> Self {
        Self {
            config: Arc::new(config),
            cancellation: self.cancellation.clone(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}
