mod collector_factory;

pub use collector_factory::{CollectorFactory, ManifestCollector};
