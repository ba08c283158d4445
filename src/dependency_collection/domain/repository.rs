use crate::shared::error::CollectError;
use crate::shared::Result;
use std::fmt;

/// Remote location artifacts and descriptors can be fetched from
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RemoteRepository {
    id: String,
    url: String,
}

impl RemoteRepository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let id = id.into();
        let url = url.into();

        if id.trim().is_empty() {
            return Err(CollectError::Validation {
                message: format!("Repository id cannot be empty (url: '{}')", url),
            }
            .into());
        }
        if id.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(CollectError::Validation {
                message: format!("Repository id '{}' contains whitespace", id),
            }
            .into());
        }

        Ok(Self { id, url })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.url)
    }
}

/// Appends repositories whose id is not yet present, preserving order
pub fn merge_repositories(
    existing: &[RemoteRepository],
    additional: &[RemoteRepository],
) -> Vec<RemoteRepository> {
    let mut merged = existing.to_vec();
    for repository in additional {
        if !merged.iter().any(|r| r.id() == repository.id()) {
            merged.push(repository.clone());
        }
    }
    merged
}
