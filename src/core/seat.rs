//! The two sides of a round and per-side storage.
//!
//! ## Seat
//!
//! Either the local player or the computer opponent.
//!
//! ## SeatMap
//!
//! Fixed two-slot storage indexable by `Seat`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One side of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    /// The local, identified player. Always rolls first.
    Player,
    /// The computer-controlled opponent.
    Opponent,
}

impl Seat {
    /// Both seats in rolling order.
    pub const ORDER: [Seat; 2] = [Seat::Player, Seat::Opponent];

    /// Slot index (player first).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Seat::Player => write!(f, "You"),
            Seat::Opponent => write!(f, "Computer"),
        }
    }
}

/// Per-seat data storage.
///
/// ```
/// use dice_duel::core::{Seat, SeatMap};
///
/// let mut faces: SeatMap<Option<u8>> = SeatMap::default();
/// faces[Seat::Opponent] = Some(3);
/// assert_eq!(faces[Seat::Player], None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: [T; 2],
}

impl<T> SeatMap<T> {
    /// Create a map from the player's and opponent's values.
    pub fn new(player: T, opponent: T) -> Self {
        Self {
            data: [player, opponent],
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, seat: Seat) -> &T {
        &self.data[seat.index()]
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, seat: Seat) -> &mut T {
        &mut self.data[seat.index()]
    }

    /// Iterate over (Seat, &T) pairs in rolling order.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        Seat::ORDER.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        self.get(seat)
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        self.get_mut(seat)
    }
}
