//! Crate-wide error type.

/// Errors surfaced by the dice engine, its stores and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum DiceError {
    #[error("player name must not be empty")]
    EmptyIdentity,

    #[error("die face out of range: {0}")]
    InvalidFace(u8),

    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("leaderboard store unavailable: {reason}")]
    StoreUnavailable {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl DiceError {
    /// Store failure without an underlying cause.
    pub fn store(reason: impl Into<String>) -> Self {
        DiceError::StoreUnavailable {
            reason: reason.into(),
            source: None,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DiceError>;
