//! Animated die reveal.
//!
//! A reveal shows a bounded run of transient faces at growing intervals and
//! then commits to one final face. It is a task plus a cancellation token
//! rather than a chain of timer callbacks, so tearing a session down aborts
//! pending ticks cleanly.

pub mod sequencer;

pub use sequencer::{Reveal, RevealSequencer};
