use crate::shared::error::CollectError;
use crate::shared::Result;
use std::fmt;

/// Maximum length of a single coordinate field (security limit)
const MAX_FIELD_LENGTH: usize = 255;

/// Extension used when a coordinate omits it
pub const DEFAULT_EXTENSION: &str = "jar";

/// Versionless artifact identity used for management lookups, cycle
/// detection and exclusion matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    group_id: String,
    artifact_id: String,
    classifier: String,
    extension: String,
}

impl ArtifactKey {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        extension: impl Into<String>,
    ) -> Result<Self> {
        let key = Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            classifier: classifier.into(),
            extension: extension.into(),
        };
        validate_field("group id", &key.group_id, false)?;
        validate_field("artifact id", &key.artifact_id, false)?;
        validate_field("classifier", &key.classifier, true)?;
        validate_field("extension", &key.extension, false)?;
        Ok(key)
    }

    /// Parses `group:artifact[:extension[:classifier]]`
    pub fn parse(coords: &str) -> Result<Self> {
        let parts: Vec<&str> = coords.trim().split(':').collect();
        match parts.as_slice() {
            [group, artifact] => Self::new(*group, *artifact, "", DEFAULT_EXTENSION),
            [group, artifact, extension] => Self::new(*group, *artifact, "", *extension),
            [group, artifact, extension, classifier] => {
                Self::new(*group, *artifact, *classifier, *extension)
            }
            _ => Err(invalid_coordinates(
                coords,
                "expected group:artifact[:extension[:classifier]]",
            )),
        }
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

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.extension)?;
        if !self.classifier.is_empty() {
            write!(f, ":{}", self.classifier)?;
        }
        Ok(())
    }
}

/// Artifact coordinate whose version is either concrete or a range
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Artifact {
    key: ArtifactKey,
    version: String,
}

impl Artifact {
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        classifier: impl Into<String>,
        extension: impl Into<String>,
        version: impl Into<String>,
    ) -> Result<Self> {
        let key = ArtifactKey::new(group_id, artifact_id, classifier, extension)?;
        Self::from_key(key, version)
    }

    pub fn from_key(key: ArtifactKey, version: impl Into<String>) -> Result<Self> {
        let version = version.into();
        validate_field("version", &version, false)?;
        Ok(Self { key, version })
    }

    /// Parses `group:artifact[:extension[:classifier]]:version`
    ///
    /// # Examples
    /// `org.example:core:1.0`, `org.example:core:jar:[1.0,2.0)`,
    /// `org.example:core:jar:tests:1.0`
    pub fn parse(coords: &str) -> Result<Self> {
        let trimmed = coords.trim();
        let Some((head, version)) = trimmed.rsplit_once(':') else {
            return Err(invalid_coordinates(
                coords,
                "expected group:artifact[:extension[:classifier]]:version",
            ));
        };
        let key = ArtifactKey::parse(head)
            .map_err(|_| invalid_coordinates(coords, "expected group:artifact[:extension[:classifier]]:version"))?;
        Self::from_key(key, version)
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn group_id(&self) -> &str {
        self.key.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.key.artifact_id()
    }

    pub fn classifier(&self) -> &str {
        self.key.classifier()
    }

    pub fn extension(&self) -> &str {
        self.key.extension()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Derived copy with another version (the version has already been
    /// validated or produced by version resolution)
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            key: self.key.clone(),
            version: version.into(),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key, self.version)
    }
}

fn validate_field(field: &str, value: &str, allow_empty: bool) -> Result<()> {
    if value.is_empty() && !allow_empty {
        return Err(CollectError::Validation {
            message: format!("Artifact {} cannot be empty", field),
        }
        .into());
    }

    // Security: Length limit to prevent DoS
    if value.len() > MAX_FIELD_LENGTH {
        return Err(CollectError::Validation {
            message: format!(
                "Artifact {} is too long ({} bytes). Maximum allowed: {} bytes",
                field,
                value.len(),
                MAX_FIELD_LENGTH
            ),
        }
        .into());
    }

    if value.chars().any(|c| c == ':' || c.is_whitespace() || c.is_control()) {
        return Err(CollectError::Validation {
            message: format!(
                "Artifact {} '{}' contains invalid characters. Colons and whitespace are not allowed.",
                field, value
            ),
        }
        .into());
    }

    Ok(())
}

fn invalid_coordinates(coords: &str, expected: &str) -> anyhow::Error {
    CollectError::Validation {
        message: format!("Invalid artifact coordinates '{}': {}", coords, expected),
    }
    .into()
}
