//! Round adjudication.
//!
//! A round is decided purely from the two settled faces and the rule in
//! force; nothing else influences the verdict.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::die::DieFace;
use crate::error::DiceError;

/// Comparison rule for a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleMode {
    /// The higher face wins.
    #[default]
    #[serde(rename = "high")]
    HighWins,
    /// The lower face wins.
    #[serde(rename = "low")]
    LowWins,
}

impl RuleMode {
    /// Label shown next to the rule selector.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RuleMode::HighWins => "High Roll Wins",
            RuleMode::LowWins => "Low Roll Wins",
        }
    }
}

impl FromStr for RuleMode {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(RuleMode::HighWins),
            "low" => Ok(RuleMode::LowWins),
            other => Err(DiceError::InvalidConfig {
                reason: format!("unknown rule mode {other:?}, expected \"high\" or \"low\""),
            }),
        }
    }
}

impl std::fmt::Display for RuleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Who took the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    PlayerWin,
    OpponentWin,
    Tie,
}

/// Result of a completed round.
///
/// Created once per round and consumed by the score ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub verdict: Verdict,
    pub player: DieFace,
    pub opponent: DieFace,
    pub mode: RuleMode,
}

impl RoundOutcome {
    /// Decide a round from the two settled faces.
    #[must_use]
    pub fn adjudicate(mode: RuleMode, player: DieFace, opponent: DieFace) -> Self {
        let verdict = if player == opponent {
            Verdict::Tie
        } else {
            let player_wins = match mode {
                RuleMode::HighWins => player > opponent,
                RuleMode::LowWins => player < opponent,
            };
            if player_wins {
                Verdict::PlayerWin
            } else {
                Verdict::OpponentWin
            }
        };

        Self {
            verdict,
            player,
            opponent,
            mode,
        }
    }

    /// Whether this outcome changes a score.
    #[must_use]
    pub fn is_decisive(&self) -> bool {
        self.verdict != Verdict::Tie
    }

    /// Result line shown to the player.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self.verdict {
            Verdict::PlayerWin => "You win!",
            Verdict::OpponentWin => "You lose!",
            Verdict::Tie => "It's a tie!",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(v: u8) -> DieFace {
        DieFace::new(v).unwrap()
    }

    #[test]
    fn test_high_wins() {
        let outcome = RoundOutcome::adjudicate(RuleMode::HighWins, face(5), face(3));
        assert_eq!(outcome.verdict, Verdict::PlayerWin);
        assert_eq!(outcome.message(), "You win!");

        let outcome = RoundOutcome::adjudicate(RuleMode::HighWins, face(2), face(6));
        assert_eq!(outcome.verdict, Verdict::OpponentWin);
    }

    #[test]
    fn test_low_wins() {
        let outcome = RoundOutcome::adjudicate(RuleMode::LowWins, face(6), face(1));
        assert_eq!(outcome.verdict, Verdict::OpponentWin);
        assert_eq!(outcome.message(), "You lose!");

        let outcome = RoundOutcome::adjudicate(RuleMode::LowWins, face(1), face(2));
        assert_eq!(outcome.verdict, Verdict::PlayerWin);
    }

    #[test]
    fn test_tie_in_both_modes() {
        for mode in [RuleMode::HighWins, RuleMode::LowWins] {
            let outcome = RoundOutcome::adjudicate(mode, face(4), face(4));
            assert_eq!(outcome.verdict, Verdict::Tie);
            assert!(!outcome.is_decisive());
            assert_eq!(outcome.message(), "It's a tie!");
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("high".parse::<RuleMode>().unwrap(), RuleMode::HighWins);
        assert_eq!(" LOW ".parse::<RuleMode>().unwrap(), RuleMode::LowWins);
        assert!("middle".parse::<RuleMode>().is_err());
    }

    #[test]
    fn test_mode_serialization() {
        assert_eq!(serde_json::to_string(&RuleMode::LowWins).unwrap(), "\"low\"");
        let mode: RuleMode = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(mode, RuleMode::HighWins);
    }
}
