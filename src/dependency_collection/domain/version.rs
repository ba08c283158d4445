use super::RemoteRepository;
use crate::shared::error::CollectError;
use crate::shared::Result;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Maximum length for version strings (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Concrete artifact version with total ordering
///
/// Versions are split into numeric and qualifier tokens at `.`, `-`, `_`
/// and at digit/letter transitions. Numeric tokens compare numerically,
/// qualifiers by their release stage, and a number always sorts after a
/// qualifier in the same position. Trailing zeros and release markers are
/// insignificant, so `1`, `1.0` and `1.0.0-final` are equal.
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Token {
    /// Digits without leading zeros
    Number(String),
    Qualifier(Qualifier),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    ReleaseCandidate,
    Snapshot,
    Release,
    ServicePack,
    Other(String),
}

impl Version {
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(CollectError::Validation {
                message: "Version cannot be empty".to_string(),
            }
            .into());
        }

        // Security: Length limit to prevent DoS
        if trimmed.len() > MAX_VERSION_LENGTH {
            return Err(CollectError::Validation {
                message: format!(
                    "Version is too long ({} bytes). Maximum allowed: {} bytes",
                    trimmed.len(),
                    MAX_VERSION_LENGTH
                ),
            }
            .into());
        }

        if trimmed
            .chars()
            .any(|c| matches!(c, '[' | ']' | '(' | ')' | ',' | ':') || c.is_whitespace())
        {
            return Err(CollectError::Validation {
                message: format!("'{}' is not a concrete version", trimmed),
            }
            .into());
        }

        Ok(Self {
            tokens: tokenize(trimmed),
            raw: trimmed.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.tokens == other.tokens
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tokens.hash(state);
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.tokens.len().max(other.tokens.len());
        for i in 0..len {
            let ordering = match (self.tokens.get(i), other.tokens.get(i)) {
                (Some(a), Some(b)) => a.compare(b),
                (Some(a), None) => a.compare_to_padding(),
                (None, Some(b)) => b.compare_to_padding().reverse(),
                (None, None) => Ordering::Equal,
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Token {
    fn compare(&self, other: &Token) -> Ordering {
        match (self, other) {
            (Token::Number(a), Token::Number(b)) => a.len().cmp(&b.len()).then_with(|| a.cmp(b)),
            (Token::Qualifier(a), Token::Qualifier(b)) => a.cmp(b),
            (Token::Number(_), Token::Qualifier(_)) => Ordering::Greater,
            (Token::Qualifier(_), Token::Number(_)) => Ordering::Less,
        }
    }

    /// Compares against the implicit token of a shorter version
    fn compare_to_padding(&self) -> Ordering {
        match self {
            Token::Number(digits) if digits.is_empty() => Ordering::Equal,
            Token::Number(_) => Ordering::Greater,
            Token::Qualifier(qualifier) => qualifier.cmp(&Qualifier::Release),
        }
    }

    fn is_padding(&self) -> bool {
        self.compare_to_padding() == Ordering::Equal
    }
}

impl Qualifier {
    fn parse(text: &str) -> Self {
        match text.to_lowercase().as_str() {
            "alpha" | "a" => Qualifier::Alpha,
            "beta" | "b" => Qualifier::Beta,
            "milestone" | "m" => Qualifier::Milestone,
            "rc" | "cr" => Qualifier::ReleaseCandidate,
            "snapshot" => Qualifier::Snapshot,
            "" | "ga" | "final" | "release" => Qualifier::Release,
            "sp" => Qualifier::ServicePack,
            other => Qualifier::Other(other.to_string()),
        }
    }
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_is_digit = false;

    for c in raw.chars() {
        if matches!(c, '.' | '-' | '_') {
            push_token(&mut tokens, &mut current, current_is_digit);
            continue;
        }
        let is_digit = c.is_ascii_digit();
        if !current.is_empty() && is_digit != current_is_digit {
            push_token(&mut tokens, &mut current, current_is_digit);
        }
        current_is_digit = is_digit;
        current.push(c);
    }
    push_token(&mut tokens, &mut current, current_is_digit);

    while tokens.last().is_some_and(Token::is_padding) {
        tokens.pop();
    }
    tokens
}

fn push_token(tokens: &mut Vec<Token>, current: &mut String, is_digit: bool) {
    if current.is_empty() {
        return;
    }
    let text = std::mem::take(current);
    if is_digit {
        tokens.push(Token::Number(text.trim_start_matches('0').to_string()));
    } else {
        tokens.push(Token::Qualifier(Qualifier::parse(&text)));
    }
}

/// A version offered by a repository for some coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailableVersion {
    version: Version,
    repository: Option<RemoteRepository>,
}

impl AvailableVersion {
    pub fn new(version: Version, repository: Option<RemoteRepository>) -> Self {
        Self {
            version,
            repository,
        }
    }

    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn repository(&self) -> Option<&RemoteRepository> {
        self.repository.as_ref()
    }
}
