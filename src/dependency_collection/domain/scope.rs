use crate::shared::error::CollectError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// Scope of a dependency edge
///
/// Controls where a dependency applies and whether it propagates to
/// transitive consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Scope {
    #[default]
    Compile,
    Runtime,
    Provided,
    Test,
    System,
}

impl Scope {
    /// Parses a scope label; an empty label means `compile`
    pub fn parse(label: &str) -> Result<Self> {
        match label.trim().to_lowercase().as_str() {
            "" | "compile" => Ok(Scope::Compile),
            "runtime" => Ok(Scope::Runtime),
            "provided" => Ok(Scope::Provided),
            "test" => Ok(Scope::Test),
            "system" => Ok(Scope::System),
            other => Err(CollectError::Validation {
                message: format!(
                    "Unknown scope '{}'. Expected one of: compile, runtime, provided, test, system",
                    other
                ),
            }
            .into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Compile => "compile",
            Scope::Runtime => "runtime",
            Scope::Provided => "provided",
            Scope::Test => "test",
            Scope::System => "system",
        }
    }

    /// How widely the scope applies. A derived child scope never has a
    /// higher breadth than its parent's.
    pub fn breadth(&self) -> u8 {
        match self {
            Scope::Compile => 4,
            Scope::Runtime => 3,
            Scope::Provided | Scope::System => 2,
            Scope::Test => 1,
        }
    }

    /// Whether a dependency declared with this scope is handed on to
    /// consumers of the declaring artifact
    pub fn propagates(&self) -> bool {
        !matches!(self, Scope::Provided | Scope::Test)
    }
}

impl FromStr for Scope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Scope::parse(s)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
