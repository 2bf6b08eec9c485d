// Entity identifiers
// Every record is keyed by a random (v4) UUID in its canonical hyphenated form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier shared by users and products
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct Id(Uuid);

/// Raised when a string is not a valid identifier
#[derive(Debug, thiserror::Error)]
#[error("invalid identifier '{input}'")]
pub struct IdError {
    pub input: String,
    #[source]
    source: uuid::Error,
}

impl Id {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse the textual form of an identifier
    pub fn parse(input: &str) -> Result<Self, IdError> {
        Uuid::parse_str(input).map(Self).map_err(|source| IdError {
            input: input.to_string(),
            source,
        })
    }

    /// Whether `input` is a well-formed identifier
    pub fn is_valid(input: &str) -> bool {
        Self::parse(input).is_ok()
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for Id {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
