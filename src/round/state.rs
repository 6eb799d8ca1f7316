//! Round state machine and what observers see of it.

use serde::{Deserialize, Serialize};

use crate::core::die::DieFace;
use crate::core::seat::{Seat, SeatMap};
use crate::rules::{RoundOutcome, RuleMode};

/// Where a round currently is.
///
/// `Idle -> PlayerRolling -> OpponentRolling -> Resolved -> Idle`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RoundPhase {
    #[default]
    Idle,
    PlayerRolling,
    OpponentRolling {
        /// The player's settled face.
        player: DieFace,
    },
    Resolved(RoundOutcome),
}

impl RoundPhase {
    /// Whether a new round may start.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, RoundPhase::Idle)
    }

    /// Seat whose die is animating, if any.
    #[must_use]
    pub fn rolling_seat(&self) -> Option<Seat> {
        match self {
            RoundPhase::PlayerRolling => Some(Seat::Player),
            RoundPhase::OpponentRolling { .. } => Some(Seat::Opponent),
            RoundPhase::Idle | RoundPhase::Resolved(_) => None,
        }
    }
}

/// Faces and result as currently displayed.
///
/// `None` faces have not been rolled this round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceDisplay {
    pub faces: SeatMap<Option<DieFace>>,
    pub outcome: Option<RoundOutcome>,
}

/// Notifications emitted while a round runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundEvent {
    /// A round began under `mode`; the display was cleared.
    Started { mode: RuleMode },
    /// A transient or final face was shown for `seat`.
    Tick { seat: Seat, face: DieFace },
    /// `seat`'s die committed to `face`.
    Settled { seat: Seat, face: DieFace },
    /// Both dice settled and the round was adjudicated.
    Resolved(RoundOutcome),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolling_seat() {
        let four = DieFace::new(4).unwrap();
        assert_eq!(RoundPhase::Idle.rolling_seat(), None);
        assert_eq!(RoundPhase::PlayerRolling.rolling_seat(), Some(Seat::Player));
        assert_eq!(
            RoundPhase::OpponentRolling { player: four }.rolling_seat(),
            Some(Seat::Opponent)
        );
        assert!(RoundPhase::default().is_idle());
    }

    #[test]
    fn test_display_starts_blank() {
        let display = DiceDisplay::default();
        assert_eq!(display.faces[Seat::Player], None);
        assert_eq!(display.faces[Seat::Opponent], None);
        assert_eq!(display.outcome, None);
    }
}
