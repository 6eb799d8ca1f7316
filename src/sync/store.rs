//! Storage backend trait for shared leaderboards.

use async_trait::async_trait;

use crate::error::Result;
use crate::ledger::{LeaderboardSnapshot, PlayerRecord};

/// A shared leaderboard collection other clients may write concurrently.
///
/// Writes are upserts keyed by identity with full overwrite: the last
/// write to land wins. No locking or merging is performed.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    /// Create or overwrite the entry for `record.identity`.
    async fn submit(&self, collection: &str, record: &PlayerRecord) -> Result<()>;

    /// Every entry in the collection. No paging.
    async fn fetch_all(&self, collection: &str) -> Result<LeaderboardSnapshot>;
}

/// Insert `record` or overwrite the entry with the same identity, in place.
pub(crate) fn upsert(entries: &mut Vec<PlayerRecord>, record: &PlayerRecord) {
    match entries.iter_mut().find(|e| e.identity == record.identity) {
        Some(existing) => {
            existing.wins = record.wins;
            existing.losses = record.losses;
        }
        None => entries.push(record.clone()),
    }
}
