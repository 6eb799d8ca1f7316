//! Round coordination.
//!
//! - `RoundCoordinator`: runs the player's reveal, then the opponent's, then
//!   adjudicates, with at most one round in flight
//! - `RoundPhase`: the explicit state machine behind it
//! - `RoundEvent` / `DiceDisplay`: what a shell renders

pub mod coordinator;
pub mod state;

pub use coordinator::RoundCoordinator;
pub use state::{DiceDisplay, RoundEvent, RoundPhase};
