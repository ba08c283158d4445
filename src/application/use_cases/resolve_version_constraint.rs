use crate::dependency_collection::domain::{
    Artifact, AvailableVersion, RemoteRepository, VersionConstraint,
};
use crate::dependency_collection::services::VersionSelector;
use crate::ports::outbound::VersionRangeResolver;
use crate::shared::error::CollectError;
use crate::shared::Result;

/// Candidates a version constraint resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionResolution {
    pub constraint: VersionConstraint,
    /// Matching versions, ascending
    pub candidates: Vec<AvailableVersion>,
}

impl VersionResolution {
    /// The highest candidate alone, or every candidate when
    /// `select_highest` is false
    pub fn selected(&self, select_highest: bool) -> &[AvailableVersion] {
        if select_highest && !self.candidates.is_empty() {
            &self.candidates[self.candidates.len() - 1..]
        } else {
            &self.candidates
        }
    }

    pub fn highest(&self) -> Option<&AvailableVersion> {
        VersionSelector::highest(&self.candidates)
    }
}

/// VersionConstraintResolver - turns a version or range into candidates
///
/// Pinned versions are returned as they are, without asking the
/// repository. Ranges are listed through the `VersionRangeResolver` port
/// and the answer is filtered again by the range bounds.
pub struct VersionConstraintResolver<'a, VR: ?Sized> {
    version_resolver: &'a VR,
}

impl<'a, VR> VersionConstraintResolver<'a, VR>
where
    VR: VersionRangeResolver + ?Sized,
{
    pub fn new(version_resolver: &'a VR) -> Self {
        Self { version_resolver }
    }

    pub async fn resolve(
        &self,
        artifact: &Artifact,
        repositories: &[RemoteRepository],
    ) -> Result<VersionResolution> {
        let constraint = VersionConstraint::parse(artifact.version())?;

        let candidates = match &constraint {
            VersionConstraint::Pinned(version) => vec![AvailableVersion::new(version.clone(), None)],
            VersionConstraint::Range(_) => {
                let available = self
                    .version_resolver
                    .resolve_range(artifact, repositories)
                    .await?;
                let matching = VersionSelector::matching(&constraint, available);
                if matching.is_empty() {
                    return Err(CollectError::NoVersionsMatch {
                        artifact: artifact.key().to_string(),
                        constraint: constraint.to_string(),
                    }
                    .into());
                }
                matching
            }
        };

        Ok(VersionResolution {
            constraint,
            candidates,
        })
    }
}
