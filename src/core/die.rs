//! Die faces and the sources that produce them.

use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// Glyphs for faces 1..=6, indexed by `value - 1`.
const GLYPHS: [char; 6] = ['⚀', '⚁', '⚂', '⚃', '⚄', '⚅'];

/// A rolled face in `1..=6`.
///
/// "Not rolled yet" is modelled as `Option<DieFace>::None`, so every
/// `DieFace` value is a real roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieFace(u8);

impl DieFace {
    /// Lowest face.
    pub const MIN: u8 = 1;
    /// Highest face.
    pub const MAX: u8 = 6;

    /// Create a face, returning `None` outside `1..=6`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Raw face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Unicode die glyph for this face.
    #[must_use]
    pub fn glyph(self) -> char {
        GLYPHS[(self.0 - 1) as usize]
    }

    /// All six faces in ascending order.
    pub fn all() -> impl Iterator<Item = DieFace> {
        (Self::MIN..=Self::MAX).map(DieFace)
    }
}

impl TryFrom<u8> for DieFace {
    type Error = DiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        DieFace::new(value).ok_or(DiceError::InvalidFace(value))
    }
}

impl From<DieFace> for u8 {
    fn from(face: DieFace) -> u8 {
        face.0
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Anything that can roll a six-sided die.
///
/// Implementations must draw uniformly from `1..=6`, independently per call.
pub trait DieSource: Send {
    /// Roll once.
    fn roll(&mut self) -> DieFace;
}

impl<D: DieSource + ?Sized> DieSource for Box<D> {
    fn roll(&mut self) -> DieFace {
        (**self).roll()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_range() {
        assert_eq!(DieFace::new(0), None);
        assert_eq!(DieFace::new(7), None);
        for v in 1..=6 {
            assert_eq!(DieFace::new(v).map(DieFace::value), Some(v));
        }
    }

    #[test]
    fn test_glyphs() {
        let glyphs: String = DieFace::all().map(DieFace::glyph).collect();
        assert_eq!(glyphs, "⚀⚁⚂⚃⚄⚅");
    }

    #[test]
    fn test_try_from_rejects_out_of_range() {
        assert!(matches!(DieFace::try_from(9), Err(DiceError::InvalidFace(9))));
    }

    #[test]
    fn test_serde_validates() {
        let face: DieFace = serde_json::from_str("4").unwrap();
        assert_eq!(face.value(), 4);
        assert!(serde_json::from_str::<DieFace>("0").is_err());
        assert_eq!(serde_json::to_string(&face).unwrap(), "4");
    }
}
