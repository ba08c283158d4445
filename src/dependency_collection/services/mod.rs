mod skipper;
mod version_selector;

pub use skipper::{SkipDecision, Skipper, SkipperSignature};
pub use version_selector::VersionSelector;
