//! Leaderboard snapshots.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::record::{Identity, PlayerRecord};

/// Every leaderboard entry as last fetched from the shared store.
///
/// Backed by a persistent vector so handing copies to observers is O(1).
/// Order is whatever the store returned; use [`ranked`](Self::ranked) for display.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardSnapshot {
    entries: Vector<PlayerRecord>,
}

impl LeaderboardSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.entries.iter()
    }

    /// Stored entry for `identity`, if any.
    #[must_use]
    pub fn find(&self, identity: &Identity) -> Option<&PlayerRecord> {
        self.entries.iter().find(|r| &r.identity == identity)
    }

    /// Stored entry for `identity`, or a zero record.
    #[must_use]
    pub fn record_for(&self, identity: &Identity) -> PlayerRecord {
        self.find(identity)
            .cloned()
            .unwrap_or_else(|| PlayerRecord::new(identity.clone()))
    }

    /// Entries by net score, best first, ties broken by name.
    #[must_use]
    pub fn ranked(&self) -> Vec<PlayerRecord> {
        let mut ranked: Vec<_> = self.entries.iter().cloned().collect();
        ranked.sort_by(|a, b| b.net().cmp(&a.net()).then_with(|| a.identity.cmp(&b.identity)));
        ranked
    }
}

impl FromIterator<PlayerRecord> for LeaderboardSnapshot {
    fn from_iter<I: IntoIterator<Item = PlayerRecord>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
