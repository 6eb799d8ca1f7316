//! Player sessions.
//!
//! A session binds one identity to a round coordinator, its local tally and
//! a leaderboard sync. It is opened by signing in (or restoring the
//! remembered name) and torn down by switching player, which cancels any
//! round still animating.
//!
//! ```
//! # tokio::runtime::Builder::new_current_thread().enable_time().start_paused(true).build().unwrap().block_on(async {
//! use dice_duel::session::SessionBuilder;
//! use dice_duel::testing::ScriptedDice;
//! use dice_duel::{DiceConfig, RevealConfig};
//!
//! let config = DiceConfig::default().with_reveal(RevealConfig::default().with_ticks(2));
//! let mut session = SessionBuilder::new()
//!     .config(config)
//!     .dice(ScriptedDice::round(2, 6, 1))
//!     .sign_in("Alex")
//!     .await
//!     .unwrap();
//!
//! let report = session.play_round().await.unwrap();
//! assert_eq!(report.record.wins, 1);
//! # });
//! ```

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::core::config::DiceConfig;
use crate::core::die::DieSource;
use crate::core::rng::GameRng;
use crate::error::Result;
use crate::identity::{IdentityStore, MemoryIdentityStore};
use crate::ledger::{apply_outcome, Identity, LeaderboardSnapshot, PlayerRecord};
use crate::round::{DiceDisplay, RoundCoordinator, RoundEvent};
use crate::rules::{RoundOutcome, RuleMode};
use crate::sync::{LeaderboardStore, LeaderboardSync, MemoryLeaderboard, SyncReport};

/// How the leaderboard fared after a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncStatus {
    /// Tie: nothing was written.
    Skipped,
    /// Written and re-read.
    Synced,
    /// Write or re-read failed; the local tally is ahead of the store.
    Stale { reason: String },
}

/// What a finished round did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    /// Local tally after the round.
    pub record: PlayerRecord,
    pub sync: SyncStatus,
}

/// Collects collaborators for a session.
///
/// Unset parts default to in-memory stores and an entropy-seeded die
/// (or the configured seed).
pub struct SessionBuilder {
    config: DiceConfig,
    leaderboard: Arc<dyn LeaderboardStore>,
    identities: Arc<dyn IdentityStore>,
    dice: Option<Box<dyn DieSource>>,
    events: Option<UnboundedSender<RoundEvent>>,
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self {
            config: DiceConfig::default(),
            leaderboard: Arc::new(MemoryLeaderboard::new()),
            identities: Arc::new(MemoryIdentityStore::new()),
            dice: None,
            events: None,
        }
    }
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: DiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn leaderboard(mut self, store: Arc<dyn LeaderboardStore>) -> Self {
        self.leaderboard = store;
        self
    }

    pub fn identity_store(mut self, store: Arc<dyn IdentityStore>) -> Self {
        self.identities = store;
        self
    }

    pub fn dice(mut self, dice: impl DieSource + 'static) -> Self {
        self.dice = Some(Box::new(dice));
        self
    }

    /// Send round events to `events`.
    pub fn events(mut self, events: UnboundedSender<RoundEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Open a session for a newly entered name and remember it.
    ///
    /// Blank names are rejected before anything is stored or fetched.
    pub async fn sign_in(self, raw_name: &str) -> Result<Session> {
        let identity = Identity::parse(raw_name)?;
        self.config.validate()?;
        self.identities.save(&identity)?;
        Ok(self.open(identity).await)
    }

    /// Open a session for the remembered name, if there is one.
    pub async fn restore(self) -> Result<Option<Session>> {
        self.config.validate()?;
        match self.identities.load()? {
            Some(identity) => Ok(Some(self.open(identity).await)),
            None => Ok(None),
        }
    }

    async fn open(self, identity: Identity) -> Session {
        let sync = LeaderboardSync::new(self.leaderboard, self.config.collection.clone());

        // Offline start: play on from zero, the next sync catches up.
        let snapshot = sync.refresh().await.unwrap_or_default();
        let record = snapshot.record_for(&identity);

        let dice: Box<dyn DieSource> = match (self.dice, self.config.seed) {
            (Some(dice), _) => dice,
            (None, Some(seed)) => Box::new(GameRng::new(seed)),
            (None, None) => Box::new(GameRng::from_entropy()),
        };
        let cancel = CancellationToken::new();
        let coordinator =
            RoundCoordinator::new(self.config.reveal.clone(), dice, cancel.clone(), self.events);

        info!(%identity, wins = record.wins, losses = record.losses, "session opened");
        Session {
            identity,
            mode: self.config.default_mode,
            record,
            snapshot,
            unsynced: false,
            coordinator,
            sync,
            identities: self.identities,
            cancel,
        }
    }
}

/// One identified player's session.
///
/// Dropping a session tears it down like [`switch_player`](Self::switch_player)
/// but keeps the remembered name.
pub struct Session {
    identity: Identity,
    mode: RuleMode,
    record: PlayerRecord,
    snapshot: LeaderboardSnapshot,
    /// Local tally is ahead of the store: the last submit failed.
    unsynced: bool,
    coordinator: RoundCoordinator,
    sync: LeaderboardSync,
    identities: Arc<dyn IdentityStore>,
    cancel: CancellationToken,
}

impl Session {
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn mode(&self) -> RuleMode {
        self.mode
    }

    /// Rule for the next round. A round in flight keeps its rule.
    pub fn set_mode(&mut self, mode: RuleMode) {
        self.mode = mode;
    }

    /// Local tally, the visible truth for this session.
    pub fn record(&self) -> &PlayerRecord {
        &self.record
    }

    /// Leaderboard as last fetched.
    pub fn snapshot(&self) -> &LeaderboardSnapshot {
        &self.snapshot
    }

    /// Faces and result currently on screen.
    pub fn display(&self) -> DiceDisplay {
        self.coordinator.display()
    }

    /// Handle to the coordinator, for observers that poll its phase.
    pub fn coordinator(&self) -> &RoundCoordinator {
        &self.coordinator
    }

    /// Token that tears the session down when cancelled.
    pub fn liveness(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Play one round under the current rule and settle the score.
    ///
    /// Returns `None` if a round was already in flight or the session was
    /// torn down before the round finished.
    pub async fn play_round(&mut self) -> Option<RoundReport> {
        let outcome = self.coordinator.play_round(self.mode).await?;
        if self.cancel.is_cancelled() {
            return None;
        }
        if !outcome.is_decisive() {
            return Some(RoundReport {
                outcome,
                record: self.record.clone(),
                sync: SyncStatus::Skipped,
            });
        }

        self.record = apply_outcome(&self.record, &outcome);
        let report = self.sync.publish(&self.record).await;
        if self.cancel.is_cancelled() {
            return None;
        }
        let sync = self.absorb(report);

        Some(RoundReport {
            outcome,
            record: self.record.clone(),
            sync,
        })
    }

    /// Re-read the leaderboard without writing.
    ///
    /// The record follows the stored entry, unless the last submit failed
    /// and the local tally has not reached the store yet.
    pub async fn refresh(&mut self) -> Result<&LeaderboardSnapshot> {
        let snapshot = self.sync.refresh().await?;
        self.adopt(snapshot);
        Ok(&self.snapshot)
    }

    /// Whether the local tally holds wins or losses the store has not seen.
    pub fn is_unsynced(&self) -> bool {
        self.unsynced
    }

    /// Tear the session down and forget the remembered name.
    ///
    /// Pending reveal ticks are discarded without touching session state.
    pub fn switch_player(self) -> Result<()> {
        self.cancel.cancel();
        self.identities.clear()?;
        info!(identity = %self.identity, "player switched out");
        Ok(())
    }

    fn absorb(&mut self, report: SyncReport) -> SyncStatus {
        match report {
            SyncReport {
                submitted: Ok(()),
                snapshot: Ok(snapshot),
            } => {
                self.unsynced = false;
                self.adopt(snapshot);
                SyncStatus::Synced
            }
            SyncReport {
                submitted: Err(err),
                snapshot,
            } => {
                self.unsynced = true;
                if let Ok(snapshot) = snapshot {
                    self.adopt(snapshot);
                }
                warn!(identity = %self.identity, "leaderboard behind local tally");
                SyncStatus::Stale {
                    reason: err.to_string(),
                }
            }
            SyncReport {
                submitted: Ok(()),
                snapshot: Err(err),
            } => {
                self.unsynced = false;
                SyncStatus::Stale {
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Show `snapshot` and take this identity's stored entry as the record.
    ///
    /// An unsynced local tally is kept until a submit lands.
    fn adopt(&mut self, snapshot: LeaderboardSnapshot) {
        if !self.unsynced {
            if let Some(stored) = snapshot.find(&self.identity) {
                self.record = stored.clone();
            }
        }
        self.snapshot = snapshot;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
