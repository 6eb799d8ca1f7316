//! Core engine types: die faces, seats, RNG, configuration.
//!
//! These are the leaf building blocks every other module uses.

pub mod die;
pub mod seat;
pub mod rng;
pub mod config;

pub use die::{DieFace, DieSource};
pub use seat::{Seat, SeatMap};
pub use rng::GameRng;
pub use config::{DiceConfig, RevealConfig, DEFAULT_COLLECTION};
