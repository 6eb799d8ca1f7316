//! Comparison rules and round verdicts.
//!
//! - `RuleMode`: which face wins, selectable between rounds
//! - `RoundOutcome`: the verdict plus the two faces that produced it

pub mod engine;

pub use engine::{RoundOutcome, RuleMode, Verdict};
