//! Sequencing of one full round.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use super::state::{DiceDisplay, RoundEvent, RoundPhase};
use crate::core::config::RevealConfig;
use crate::core::die::{DieFace, DieSource};
use crate::core::seat::Seat;
use crate::reveal::RevealSequencer;
use crate::rules::{RoundOutcome, RuleMode};

/// Runs rounds for one session: player reveal, then opponent reveal, then
/// adjudication.
///
/// Clones share state, so the in-flight guard holds across every handle.
/// All writes are dropped once the session's cancellation token fires.
#[derive(Clone)]
pub struct RoundCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    sequencer: RevealSequencer,
    dice: Mutex<Box<dyn DieSource>>,
    state: Mutex<RoundState>,
    events: Option<UnboundedSender<RoundEvent>>,
    cancel: CancellationToken,
}

#[derive(Default)]
struct RoundState {
    phase: RoundPhase,
    display: DiceDisplay,
}

impl RoundCoordinator {
    /// Create a coordinator drawing faces from `dice`.
    ///
    /// `cancel` ties the coordinator to its session; `events` receives
    /// every tick, settle and result.
    pub fn new(
        reveal: RevealConfig,
        dice: impl DieSource + 'static,
        cancel: CancellationToken,
        events: Option<UnboundedSender<RoundEvent>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                sequencer: RevealSequencer::new(reveal),
                dice: Mutex::new(Box::new(dice)),
                state: Mutex::new(RoundState::default()),
                events,
                cancel,
            }),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.inner.state.lock().phase
    }

    /// Faces and result as last displayed.
    #[must_use]
    pub fn display(&self) -> DiceDisplay {
        self.inner.state.lock().display
    }

    /// Play one round under `mode`.
    ///
    /// Returns `None` without side effects if a round is already in flight,
    /// and `None` if the session is torn down before the round resolves.
    #[instrument(skip(self))]
    pub async fn play_round(&self, mode: RuleMode) -> Option<RoundOutcome> {
        if !self.begin() {
            debug!("round already in flight, ignoring");
            return None;
        }
        self.emit(RoundEvent::Started { mode });

        let player = self.reveal(Seat::Player).await?;
        if !self.transition(|state| state.phase = RoundPhase::OpponentRolling { player }) {
            return None;
        }
        self.emit(RoundEvent::Settled {
            seat: Seat::Player,
            face: player,
        });

        let opponent = self.reveal(Seat::Opponent).await?;
        self.emit(RoundEvent::Settled {
            seat: Seat::Opponent,
            face: opponent,
        });

        let outcome = RoundOutcome::adjudicate(mode, player, opponent);
        let resolved = self.transition(|state| {
            state.phase = RoundPhase::Resolved(outcome);
            state.display.outcome = Some(outcome);
        });
        if !resolved {
            return None;
        }
        self.emit(RoundEvent::Resolved(outcome));
        info!(%player, %opponent, verdict = ?outcome.verdict, "round resolved");

        self.transition(|state| state.phase = RoundPhase::Idle);
        Some(outcome)
    }

    /// Claim the idle coordinator for a new round.
    fn begin(&self) -> bool {
        let mut state = self.inner.state.lock();
        if !state.phase.is_idle() || self.inner.cancel.is_cancelled() {
            return false;
        }
        state.phase = RoundPhase::PlayerRolling;
        state.display = DiceDisplay::default();
        true
    }

    async fn reveal(&self, seat: Seat) -> Option<DieFace> {
        let inner = &self.inner;
        let reveal = inner
            .sequencer
            .run(
                &inner.cancel,
                || inner.dice.lock().roll(),
                |face| {
                    if self.transition(|state| state.display.faces[seat] = Some(face)) {
                        self.emit(RoundEvent::Tick { seat, face });
                    }
                },
            )
            .await;

        match reveal {
            Some(reveal) => Some(reveal.settled),
            None => {
                debug!(%seat, "reveal abandoned, session closed");
                None
            }
        }
    }

    /// Apply `update` unless the session has been torn down.
    fn transition(&self, update: impl FnOnce(&mut RoundState)) -> bool {
        let mut state = self.inner.state.lock();
        if self.inner.cancel.is_cancelled() {
            return false;
        }
        update(&mut state);
        true
    }

    fn emit(&self, event: RoundEvent) {
        if self.inner.cancel.is_cancelled() {
            return;
        }
        if let Some(events) = &self.inner.events {
            // A dropped receiver just means nobody is watching.
            let _ = events.send(event);
        }
    }
}
