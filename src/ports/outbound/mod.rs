/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the collection engine uses
/// to reach repositories and report progress.
pub mod descriptor_reader;
pub mod progress_reporter;
pub mod version_range_resolver;

pub use descriptor_reader::{ArtifactDescriptor, DescriptorReader};
pub use progress_reporter::ProgressReporter;
pub use version_range_resolver::VersionRangeResolver;
