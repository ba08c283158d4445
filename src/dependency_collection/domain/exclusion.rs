use super::Artifact;
use crate::shared::error::CollectError;
use crate::shared::Result;
use std::collections::BTreeSet;
use std::fmt;

/// Wildcard accepted in any exclusion field
pub const WILDCARD: &str = "*";

/// Ordered set of exclusion patterns in effect below a node
pub type ExclusionSet = BTreeSet<Exclusion>;

/// Pattern suppressing matching artifacts anywhere below the declaring edge
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Exclusion {
    group_id: String,
    artifact_id: String,
    classifier: String,
    extension: String,
}

impl Exclusion {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self> {
        let exclusion = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: classifier.into(),
            extension: extension.into(),
        };

        if exclusion.group_id.is_empty() || exclusion.artifact_id.is_empty() {
            return Err(CollectError::Validation {
                message: format!(
                    "Exclusion '{}' must name a group and an artifact (use '*' to match any)",
                    exclusion
                ),
            }
            .into());
        }

        Ok(exclusion)
    }

    /// Parses `group:artifact[:extension[:classifier]]`; omitted fields match anything
    pub fn parse(pattern: &str) -> Result<Self> {
        let parts: Vec<&str> = pattern.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact] => Self::new(*group, *artifact, WILDCARD, WILDCARD),
            [group, artifact, extension] => Self::new(*group, *artifact, WILDCARD, *extension),
            [group, artifact, extension, classifier] => {
                Self::new(*group, *artifact, *classifier, *extension)
            }
            _ => Err(CollectError::Validation {
                message: format!(
                    "Invalid exclusion '{}': expected group:artifact[:extension[:classifier]]",
                    pattern
                ),
            }
            .into()),
        }
    }

    /// Matches when every non-wildcard field equals the artifact's field
    pub fn matches(&self, artifact: &Artifact) -> bool {
        field_matches(&self.group_id, artifact.group_id())
            && field_matches(&self.artifact_id, artifact.artifact_id())
            && field_matches(&self.classifier, artifact.classifier())
            && field_matches(&self.extension, artifact.extension())
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    pub fn classifier(&self) -> &str {
        &self.classifier
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.group_id, self.artifact_id, self.extension, self.classifier
        )
    }
}

fn field_matches(pattern: &str, value: &str) -> bool {
    pattern == WILDCARD || pattern == value
}
