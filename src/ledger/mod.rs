//! Score ledger: identities, tallies and leaderboard snapshots.
//!
//! The ledger is pure. The caller fetches the current record (usually from
//! the last snapshot), applies an outcome, and hands the result to sync.

pub mod record;
pub mod snapshot;

pub use record::{Identity, PlayerRecord};
pub use snapshot::LeaderboardSnapshot;

use crate::rules::{RoundOutcome, Verdict};

/// Fold one round into a record.
///
/// Ties return an identical record.
#[must_use]
pub fn apply_outcome(current: &PlayerRecord, outcome: &RoundOutcome) -> PlayerRecord {
    let mut next = current.clone();
    match outcome.verdict {
        Verdict::PlayerWin => next.wins = next.wins.saturating_add(1),
        Verdict::OpponentWin => next.losses = next.losses.saturating_add(1),
        Verdict::Tie => {}
    }
    next
}
