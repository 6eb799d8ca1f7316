//! Leaderboard synchronization.
//!
//! - `LeaderboardStore`: the shared collection (memory or JSON files)
//! - `LeaderboardSync`: submit-then-refresh protocol for one collection
//!
//! Writes are last-writer-wins per identity. Failures are reported and
//! logged but never retried here; the session keeps its local tally.

pub mod file;
pub mod memory;
pub mod store;

pub use file::JsonFileLeaderboard;
pub use memory::MemoryLeaderboard;
pub use store::LeaderboardStore;

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use crate::error::Result;
use crate::ledger::{LeaderboardSnapshot, PlayerRecord};

/// Result of one submit + refresh pass.
#[derive(Debug)]
pub struct SyncReport {
    /// Outcome of the write.
    pub submitted: Result<()>,
    /// Outcome of the re-read that followed it.
    pub snapshot: Result<LeaderboardSnapshot>,
}

impl SyncReport {
    /// Both halves succeeded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.submitted.is_ok() && self.snapshot.is_ok()
    }
}

/// Publishes records to one collection of a shared store.
#[derive(Clone)]
pub struct LeaderboardSync {
    store: Arc<dyn LeaderboardStore>,
    collection: String,
}

impl LeaderboardSync {
    pub fn new(store: Arc<dyn LeaderboardStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Upsert `record`, then re-read the whole collection.
    ///
    /// The read always runs after the write finishes, whether or not the
    /// write succeeded.
    #[instrument(skip(self, record), fields(collection = %self.collection, identity = %record.identity))]
    pub async fn publish(&self, record: &PlayerRecord) -> SyncReport {
        let submitted = self.store.submit(&self.collection, record).await;
        match &submitted {
            Ok(()) => debug!(wins = record.wins, losses = record.losses, "score submitted"),
            Err(err) => warn!(error = %err, "score submit failed, keeping local tally"),
        }

        let snapshot = self.refresh().await;
        SyncReport {
            submitted,
            snapshot,
        }
    }

    /// Re-read the whole collection.
    pub async fn refresh(&self) -> Result<LeaderboardSnapshot> {
        let snapshot = self.store.fetch_all(&self.collection).await;
        match &snapshot {
            Ok(snapshot) => debug!(entries = snapshot.len(), "leaderboard refreshed"),
            Err(err) => warn!(collection = %self.collection, error = %err, "leaderboard refresh failed"),
        }
        snapshot
    }
}
