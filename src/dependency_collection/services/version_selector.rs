use crate::dependency_collection::domain::{AvailableVersion, VersionConstraint};

/// Picks candidate versions out of what a repository offers
pub struct VersionSelector;

impl VersionSelector {
    /// Versions satisfying `constraint`, ascending, one entry per version
    /// (the first repository listing a version is kept)
    pub fn matching(
        constraint: &VersionConstraint,
        available: Vec<AvailableVersion>,
    ) -> Vec<AvailableVersion> {
        let mut matching: Vec<AvailableVersion> = available
            .into_iter()
            .filter(|candidate| constraint.contains(candidate.version()))
            .collect();
        matching.sort_by(|a, b| a.version().cmp(b.version()));
        matching.dedup_by(|later, earlier| later.version() == earlier.version());
        matching
    }

    pub fn highest(candidates: &[AvailableVersion]) -> Option<&AvailableVersion> {
        candidates.iter().max_by(|a, b| a.version().cmp(b.version()))
    }
}
