//! Castling rights.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

/// The four independent castling rights.
///
/// Rights only ever transition true -> false during play; the only way a
/// right comes back is a snapshot restore during move undo.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

/// Every (color, kingside) pair, in Zobrist key order
pub(crate) const CASTLING_SIDES: [(Color, bool); 4] = [
    (Color::White, true),
    (Color::White, false),
    (Color::Black, true),
    (Color::Black, false),
];

impl CastlingRights {
    /// All four rights granted (the starting position)
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    /// No rights at all
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// Check a specific right
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        match (color, kingside) {
            (Color::White, true) => self.white_kingside,
            (Color::White, false) => self.white_queenside,
            (Color::Black, true) => self.black_kingside,
            (Color::Black, false) => self.black_queenside,
        }
    }

    /// Grant a specific right (only used when setting up a position)
    #[inline]
    pub(crate) fn grant(&mut self, color: Color, kingside: bool) {
        *self.slot(color, kingside) = true;
    }

    /// Revoke a specific right
    #[inline]
    pub(crate) fn revoke(&mut self, color: Color, kingside: bool) {
        *self.slot(color, kingside) = false;
    }

    fn slot(&mut self, color: Color, kingside: bool) -> &mut bool {
        match (color, kingside) {
            (Color::White, true) => &mut self.white_kingside,
            (Color::White, false) => &mut self.white_queenside,
            (Color::Black, true) => &mut self.black_kingside,
            (Color::Black, false) => &mut self.black_queenside,
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        CastlingRights::all()
    }
}
