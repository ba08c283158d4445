/// Filesystem adapters for loading repository manifests
mod manifest_reader;

pub use manifest_reader::{ManifestRepositoryLoader, MANIFEST_FILENAME};
