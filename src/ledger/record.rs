//! Player identity and per-player tallies.

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};

/// Self-declared display name keying a leaderboard entry.
///
/// Always trimmed and non-empty.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    /// Validate and normalize a raw name.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DiceError::EmptyIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = DiceError;

    fn try_from(raw: String) -> Result<Self> {
        Identity::parse(&raw)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> String {
        identity.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cumulative wins and losses of one identity.
///
/// Counters only ever grow.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(rename = "name")]
    pub identity: Identity,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub losses: u32,
}

impl PlayerRecord {
    /// Fresh record with no rounds played.
    #[must_use]
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            wins: 0,
            losses: 0,
        }
    }

    /// Record with explicit counters.
    #[must_use]
    pub fn with_tally(identity: Identity, wins: u32, losses: u32) -> Self {
        Self {
            identity,
            wins,
            losses,
        }
    }

    /// Wins minus losses.
    #[must_use]
    pub fn net(&self) -> i64 {
        i64::from(self.wins) - i64::from(self.losses)
    }
}
