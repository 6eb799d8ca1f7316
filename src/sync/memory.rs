//! In-process leaderboard store.

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

use super::store::{upsert, LeaderboardStore};
use crate::error::Result;
use crate::ledger::{LeaderboardSnapshot, PlayerRecord};

/// In-process leaderboard shared by every session holding the same `Arc`.
#[derive(Default)]
pub struct MemoryLeaderboard {
    collections: Mutex<FxHashMap<String, Vec<PlayerRecord>>>,
}

impl MemoryLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection, replacing whatever it held.
    pub fn with_entries(self, collection: &str, entries: Vec<PlayerRecord>) -> Self {
        self.collections.lock().insert(collection.to_string(), entries);
        self
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboard {
    async fn submit(&self, collection: &str, record: &PlayerRecord) -> Result<()> {
        let mut collections = self.collections.lock();
        upsert(collections.entry(collection.to_string()).or_default(), record);
        Ok(())
    }

    async fn fetch_all(&self, collection: &str) -> Result<LeaderboardSnapshot> {
        let collections = self.collections.lock();
        Ok(collections
            .get(collection)
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default())
    }
}
