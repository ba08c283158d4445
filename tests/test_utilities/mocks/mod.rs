/// Mock implementations for testing
mod mock_descriptor_reader;
mod mock_progress_reporter;
mod mock_version_range_resolver;

pub use mock_descriptor_reader::MockDescriptorReader;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_version_range_resolver::MockVersionRangeResolver;
