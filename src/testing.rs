//! Deterministic stand-ins for dice and stores.
//!
//! Used by this crate's tests and available to downstream shells for theirs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::core::die::{DieFace, DieSource};
use crate::error::{DiceError, Result};
use crate::ledger::{LeaderboardSnapshot, PlayerRecord};
use crate::sync::{LeaderboardStore, MemoryLeaderboard};

fn face(value: u8) -> DieFace {
    match DieFace::new(value) {
        Some(face) => face,
        None => panic!("scripted face out of range: {value}"),
    }
}

/// A die that returns scripted faces, then cycles a fallback list.
#[derive(Clone, Debug)]
pub struct ScriptedDice {
    script: VecDeque<DieFace>,
    cycle: Vec<DieFace>,
    next: usize,
}

impl ScriptedDice {
    /// Repeat `values` forever.
    pub fn cycling(values: &[u8]) -> Self {
        assert!(!values.is_empty(), "Need at least one face to cycle");
        Self {
            script: VecDeque::new(),
            cycle: values.iter().copied().map(face).collect(),
            next: 0,
        }
    }

    /// Script one round whose reveals have `ticks` transient values and
    /// settle on `player` and `opponent`.
    pub fn round(ticks: u32, player: u8, opponent: u8) -> Self {
        Self::cycling(&[1, 2, 3, 4, 5, 6]).then_round(ticks, player, opponent)
    }

    /// Append another scripted round.
    pub fn then_round(mut self, ticks: u32, player: u8, opponent: u8) -> Self {
        for settled in [player, opponent] {
            for i in 0..ticks {
                self.script.push_back(face((i % 6) as u8 + 1));
            }
            self.script.push_back(face(settled));
        }
        self
    }
}

impl DieSource for ScriptedDice {
    fn roll(&mut self) -> DieFace {
        if let Some(face) = self.script.pop_front() {
            return face;
        }
        let face = self.cycle[self.next % self.cycle.len()];
        self.next += 1;
        face
    }
}

/// In-memory store whose reads and writes can be switched to fail.
///
/// Records every submit it receives, including failed ones.
#[derive(Default)]
pub struct FlakyLeaderboard {
    inner: MemoryLeaderboard,
    fail_submit: AtomicBool,
    fail_fetch: AtomicBool,
    fetches: AtomicUsize,
    submitted: Mutex<Vec<PlayerRecord>>,
}

impl FlakyLeaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a pre-seeded store.
    pub fn wrapping(inner: MemoryLeaderboard) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_submits(&self, fail: bool) {
        self.fail_submit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    /// Every record passed to `submit`, in call order.
    pub fn submitted(&self) -> Vec<PlayerRecord> {
        self.submitted.lock().clone()
    }

    /// Number of `fetch_all` calls so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LeaderboardStore for FlakyLeaderboard {
    async fn submit(&self, collection: &str, record: &PlayerRecord) -> Result<()> {
        self.submitted.lock().push(record.clone());
        if self.fail_submit.load(Ordering::SeqCst) {
            return Err(DiceError::store("write rejected"));
        }
        self.inner.submit(collection, record).await
    }

    async fn fetch_all(&self, collection: &str) -> Result<LeaderboardSnapshot> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(DiceError::store("read rejected"));
        }
        self.inner.fetch_all(collection).await
    }
}
