use super::Version;
use crate::shared::error::CollectError;
use crate::shared::Result;
use std::fmt;

/// Requested version of a dependency: one concrete version or a range
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionConstraint {
    Pinned(Version),
    Range(VersionRange),
}

impl VersionConstraint {
    /// Parses a version string; anything starting with `[` or `(` is a range
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.starts_with('[') || trimmed.starts_with('(') {
            Ok(VersionConstraint::Range(VersionRange::parse(trimmed)?))
        } else {
            Ok(VersionConstraint::Pinned(Version::new(trimmed)?))
        }
    }

    pub fn is_range(&self) -> bool {
        matches!(self, VersionConstraint::Range(_))
    }

    pub fn contains(&self, version: &Version) -> bool {
        match self {
            VersionConstraint::Pinned(pinned) => pinned == version,
            VersionConstraint::Range(range) => range.contains(version),
        }
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionConstraint::Pinned(version) => write!(f, "{}", version),
            VersionConstraint::Range(range) => write!(f, "{}", range),
        }
    }
}

/// Union of one or more version intervals, e.g. `[1.0,2.0)` or `(,1.0],[1.2,)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    raw: String,
    intervals: Vec<Interval>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Interval {
    lower: Option<Bound>,
    upper: Option<Bound>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Bound {
    version: Version,
    inclusive: bool,
}

impl VersionRange {
    pub fn parse(text: &str) -> Result<Self> {
        let raw = text.trim().to_string();
        let mut intervals = Vec::new();
        let mut rest = raw.as_str();

        while !rest.is_empty() {
            let open = rest.chars().next().unwrap_or_default();
            if open != '[' && open != '(' {
                return Err(invalid_range(&raw, "expected '[' or '('"));
            }

            let Some(close_at) = rest.find([']', ')']) else {
                return Err(invalid_range(&raw, "missing closing ']' or ')'"));
            };
            let close = rest[close_at..].chars().next().unwrap_or_default();
            let body = &rest[1..close_at];
            intervals.push(Interval::parse(&raw, open == '[', body, close == ']')?);

            rest = rest[close_at + 1..].trim_start();
            if let Some(stripped) = rest.strip_prefix(',') {
                rest = stripped.trim_start();
                if rest.is_empty() {
                    return Err(invalid_range(&raw, "trailing ','"));
                }
            } else if !rest.is_empty() {
                return Err(invalid_range(&raw, "intervals must be separated by ','"));
            }
        }

        if intervals.is_empty() {
            return Err(invalid_range(&raw, "no interval given"));
        }

        Ok(Self { raw, intervals })
    }

    pub fn contains(&self, version: &Version) -> bool {
        self.intervals.iter().any(|interval| interval.contains(version))
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Interval {
    fn parse(raw: &str, lower_inclusive: bool, body: &str, upper_inclusive: bool) -> Result<Self> {
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        match parts.as_slice() {
            [exact] => {
                if exact.is_empty() || !lower_inclusive || !upper_inclusive {
                    return Err(invalid_range(raw, "a single version must be written as [x]"));
                }
                let version = Version::new(*exact)?;
                Ok(Self {
                    lower: Some(Bound {
                        version: version.clone(),
                        inclusive: true,
                    }),
                    upper: Some(Bound {
                        version,
                        inclusive: true,
                    }),
                })
            }
            [lower, upper] => {
                let lower = parse_bound(lower, lower_inclusive)?;
                let upper = parse_bound(upper, upper_inclusive)?;
                if let (Some(low), Some(high)) = (&lower, &upper) {
                    if low.version > high.version
                        || (low.version == high.version && !(low.inclusive && high.inclusive))
                    {
                        return Err(invalid_range(raw, "lower bound is above upper bound"));
                    }
                }
                if lower.is_none() && lower_inclusive {
                    return Err(invalid_range(raw, "an open lower bound must use '('"));
                }
                if upper.is_none() && upper_inclusive {
                    return Err(invalid_range(raw, "an open upper bound must use ')'"));
                }
                Ok(Self { lower, upper })
            }
            _ => Err(invalid_range(raw, "an interval has at most two bounds")),
        }
    }

    fn contains(&self, version: &Version) -> bool {
        let above_lower = match &self.lower {
            Some(bound) if bound.inclusive => version >= &bound.version,
            Some(bound) => version > &bound.version,
            None => true,
        };
        let below_upper = match &self.upper {
            Some(bound) if bound.inclusive => version <= &bound.version,
            Some(bound) => version < &bound.version,
            None => true,
        };
        above_lower && below_upper
    }
}

fn parse_bound(text: &str, inclusive: bool) -> Result<Option<Bound>> {
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(Bound {
        version: Version::new(text)?,
        inclusive,
    }))
}

fn invalid_range(raw: &str, reason: &str) -> anyhow::Error {
    CollectError::Validation {
        message: format!("Invalid version range '{}': {}", raw, reason),
    }
    .into()
}
