/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports: console
/// progress output, YAML repository manifests and in-memory repositories.
pub mod outbound;
