//! Game configuration types.
//!
//! - `RevealConfig`: tick count and delay schedule of the die animation
//! - `DiceConfig`: everything a session needs at startup
//!
//! Both deserialize with defaults for missing fields, so a config file only
//! needs to name what it changes.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DiceError, Result};
use crate::rules::RuleMode;

/// Default leaderboard collection shared by every client.
pub const DEFAULT_COLLECTION: &str = "dice_leaderboard";

/// Animation schedule for one die.
///
/// Tick `i` (0-based) is followed by a pause of
/// `base_delay_ms + delay_step_ms * (i + 1)`, so the die visibly slows down.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Transient values shown before the final one.
    pub transient_ticks: u32,

    /// Fixed part of every pause, in milliseconds.
    pub base_delay_ms: u64,

    /// Growth of the pause per tick, in milliseconds. Must be positive.
    pub delay_step_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            transient_ticks: 20,
            base_delay_ms: 50,
            delay_step_ms: 20,
        }
    }
}

impl RevealConfig {
    /// Pause that follows transient tick `index`.
    #[must_use]
    pub fn delay_after(&self, index: u32) -> Duration {
        let step = self.delay_step_ms.saturating_mul(u64::from(index) + 1);
        Duration::from_millis(self.base_delay_ms.saturating_add(step))
    }

    /// Wall time of a full reveal, excluding the final draw.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        (0..self.transient_ticks).map(|i| self.delay_after(i)).sum()
    }

    /// Set the number of transient ticks.
    #[must_use]
    pub fn with_ticks(mut self, ticks: u32) -> Self {
        self.transient_ticks = ticks;
        self
    }

    /// Set the base and per-tick delays.
    #[must_use]
    pub fn with_delays(mut self, base_ms: u64, step_ms: u64) -> Self {
        self.base_delay_ms = base_ms;
        self.delay_step_ms = step_ms;
        self
    }
}

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceConfig {
    /// Die animation schedule.
    pub reveal: RevealConfig,

    /// Leaderboard collection name.
    pub collection: String,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Rule in force when a session opens.
    pub default_mode: RuleMode,
}

impl Default for DiceConfig {
    fn default() -> Self {
        Self {
            reveal: RevealConfig::default(),
            collection: DEFAULT_COLLECTION.to_string(),
            seed: None,
            default_mode: RuleMode::HighWins,
        }
    }
}

impl DiceConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: DiceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.reveal.transient_ticks == 0 {
            return Err(DiceError::InvalidConfig {
                reason: "reveal.transient_ticks must be at least 1".into(),
            });
        }
        if self.reveal.delay_step_ms == 0 {
            return Err(DiceError::InvalidConfig {
                reason: "reveal.delay_step_ms must be positive so delays increase".into(),
            });
        }
        if self.collection.trim().is_empty() {
            return Err(DiceError::InvalidConfig {
                reason: "collection must not be empty".into(),
            });
        }
        Ok(())
    }

    /// Set the reveal schedule.
    #[must_use]
    pub fn with_reveal(mut self, reveal: RevealConfig) -> Self {
        self.reveal = reveal;
        self
    }

    /// Set the leaderboard collection.
    #[must_use]
    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }

    /// Use a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting rule.
    #[must_use]
    pub fn with_mode(mut self, mode: RuleMode) -> Self {
        self.default_mode = mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DiceConfig::default();
        assert_eq!(config.reveal.transient_ticks, 20);
        assert_eq!(config.collection, "dice_leaderboard");
        assert_eq!(config.seed, None);
        assert_eq!(config.default_mode, RuleMode::HighWins);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_delays_strictly_increase() {
        let reveal = RevealConfig::default();
        assert_eq!(reveal.delay_after(0), Duration::from_millis(70));
        assert_eq!(reveal.delay_after(19), Duration::from_millis(450));

        for i in 1..reveal.transient_ticks {
            assert!(reveal.delay_after(i) > reveal.delay_after(i - 1));
        }
    }

    #[test]
    fn test_total_duration() {
        let reveal = RevealConfig::default().with_ticks(3).with_delays(10, 5);
        // 15 + 20 + 25
        assert_eq!(reveal.total_duration(), Duration::from_millis(60));
    }

    #[test]
    fn test_builder_pattern() {
        let config = DiceConfig::default()
            .with_seed(123)
            .with_collection("office")
            .with_mode(RuleMode::LowWins)
            .with_reveal(RevealConfig::default().with_ticks(5));

        assert_eq!(config.seed, Some(123));
        assert_eq!(config.collection, "office");
        assert_eq!(config.default_mode, RuleMode::LowWins);
        assert_eq!(config.reveal.transient_ticks, 5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = DiceConfig::from_json_str(r#"{"seed": 9, "reveal": {"transient_ticks": 4}}"#).unwrap();
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.reveal.transient_ticks, 4);
        assert_eq!(config.reveal.base_delay_ms, 50);
        assert_eq!(config.collection, DEFAULT_COLLECTION);
    }

    #[test]
    fn test_validation_rejects_flat_schedule() {
        let err = DiceConfig::from_json_str(r#"{"reveal": {"delay_step_ms": 0}}"#).unwrap_err();
        assert!(matches!(err, DiceError::InvalidConfig { .. }));

        let err = DiceConfig::default().with_collection("  ").validate().unwrap_err();
        assert!(matches!(err, DiceError::InvalidConfig { .. }));
    }

    #[test]
    fn test_serialization() {
        let config = DiceConfig::default().with_seed(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: DiceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
