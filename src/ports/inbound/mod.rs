/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that callers (build tools, tests)
/// use to interact with the collection engine.
pub mod dependency_collection_port;

pub use dependency_collection_port::DependencyCollectionPort;
