/// Data Transfer Objects for application layer
///
/// DTOs carry requests, configuration and session state between callers
/// and the collection use case, keeping the domain layer isolated.
mod collect_config;
mod collect_request;
mod collect_session;

pub use collect_config::{CollectConfig, CollectConfigBuilder};
pub use collect_request::{CollectRequest, CollectRequestBuilder};
pub use collect_session::{CancellationFlag, CollectSession};
