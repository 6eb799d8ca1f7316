//! # dice-duel
//!
//! Single-round dice duels against a computer opponent, with cumulative
//! scores kept on a shared leaderboard.
//!
//! ## Design Principles
//!
//! 1. **Explicit round state**: A round is a tagged state machine
//!    (`Idle -> PlayerRolling -> OpponentRolling -> Resolved -> Idle`),
//!    never a set of loose flags.
//!
//! 2. **Structured suspension**: Die animations are tasks that sleep between
//!    ticks and watch a cancellation token, so a torn-down session leaves no
//!    stray writes behind.
//!
//! 3. **Locally correct, remotely eventual**: The session's own tally is the
//!    truth it shows. The shared store is last-writer-wins per identity and is
//!    never locked.
//!
//! ## Modules
//!
//! - `core`: Die faces, seats, RNG, configuration
//! - `rules`: Rule modes and round adjudication
//! - `reveal`: Animated reveal of one die
//! - `round`: Round coordinator and its state machine
//! - `ledger`: Identities, player records, leaderboard snapshots
//! - `sync`: Leaderboard stores and the submit/refresh protocol
//! - `identity`: Remembered player name
//! - `session`: Sign-in, rounds, player switch
//! - `testing`: Scripted dice and failing stores (`testing` feature)

pub mod core;
pub mod error;
pub mod rules;
pub mod reveal;
pub mod round;
pub mod ledger;
pub mod sync;
pub mod identity;
pub mod session;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

// Re-export commonly used types
pub use crate::core::{
    DieFace, DieSource, GameRng,
    Seat, SeatMap,
    DiceConfig, RevealConfig, DEFAULT_COLLECTION,
};

pub use crate::error::{DiceError, Result};

pub use crate::rules::{RoundOutcome, RuleMode, Verdict};

pub use crate::reveal::{Reveal, RevealSequencer};

pub use crate::round::{DiceDisplay, RoundCoordinator, RoundEvent, RoundPhase};

pub use crate::ledger::{apply_outcome, Identity, LeaderboardSnapshot, PlayerRecord};

pub use crate::sync::{
    JsonFileLeaderboard, LeaderboardStore, LeaderboardSync, MemoryLeaderboard, SyncReport,
};

pub use crate::identity::{FileIdentityStore, IdentityStore, MemoryIdentityStore, IDENTITY_KEY};

pub use crate::session::{RoundReport, Session, SessionBuilder, SyncStatus};
