//! Castling rights and their inference from successive positions.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::position::Position;
use super::square::Square;

const RIGHT_WHITE_K: u8 = 1 << 0;
const RIGHT_WHITE_Q: u8 = 1 << 1;
const RIGHT_BLACK_K: u8 = 1 << 2;
const RIGHT_BLACK_Q: u8 = 1 << 3;

const ALL_RIGHTS: u8 = RIGHT_WHITE_K | RIGHT_WHITE_Q | RIGHT_BLACK_K | RIGHT_BLACK_Q;

/// One of the four castling-right flags, in rendering order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RightFlag {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

impl RightFlag {
    /// All flags in the fixed KQkq rendering order
    pub const ALL: [RightFlag; 4] = [
        RightFlag::WhiteKingside,
        RightFlag::WhiteQueenside,
        RightFlag::BlackKingside,
        RightFlag::BlackQueenside,
    ];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            RightFlag::WhiteKingside => RIGHT_WHITE_K,
            RightFlag::WhiteQueenside => RIGHT_WHITE_Q,
            RightFlag::BlackKingside => RIGHT_BLACK_K,
            RightFlag::BlackQueenside => RIGHT_BLACK_Q,
        }
    }

    /// The FEN character for this flag
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            RightFlag::WhiteKingside => 'K',
            RightFlag::WhiteQueenside => 'Q',
            RightFlag::BlackKingside => 'k',
            RightFlag::BlackQueenside => 'q',
        }
    }
}

impl fmt::Display for RightFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The four castling rights as a bitmask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rights(u8);

impl Rights {
    /// No rights
    #[must_use]
    pub const fn none() -> Self {
        Rights(0)
    }

    /// All four rights
    #[must_use]
    pub const fn all() -> Self {
        Rights(ALL_RIGHTS)
    }

    /// Check one flag
    #[inline]
    #[must_use]
    pub const fn has(self, flag: RightFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Clear one flag
    #[inline]
    pub fn clear(&mut self, flag: RightFlag) {
        self.0 &= !flag.bit();
    }

    /// Flip one flag
    #[inline]
    pub fn toggle(&mut self, flag: RightFlag) {
        self.0 ^= flag.bit();
    }

    /// Render set flags in fixed KQkq order, "-" when none are set
    #[must_use]
    pub fn as_string(self) -> String {
        let mut out = String::new();
        for flag in RightFlag::ALL {
            if self.has(flag) {
                out.push(flag.symbol());
            }
        }
        if out.is_empty() {
            out.push('-');
        }
        out
    }
}

impl Default for Rights {
    fn default() -> Self {
        Rights::all()
    }
}

/// Effect of a change on one sentinel square: the flags it clears.
const SENTINELS: [(Square, &[RightFlag]); 6] = [
    (
        Square::E1,
        &[RightFlag::WhiteKingside, RightFlag::WhiteQueenside],
    ),
    (
        Square::E8,
        &[RightFlag::BlackKingside, RightFlag::BlackQueenside],
    ),
    (Square::H1, &[RightFlag::WhiteKingside]),
    (Square::A1, &[RightFlag::WhiteQueenside]),
    (Square::H8, &[RightFlag::BlackKingside]),
    (Square::A8, &[RightFlag::BlackQueenside]),
];

/// Tracks the four rights across a game.
///
/// Flags are monotone: inference and manual toggles can clear them, but
/// only [`RightsTracker::reset`] at a new-game start sets them again.
#[derive(Clone, Debug, Default)]
pub struct RightsTracker {
    rights: Rights,
}

impl RightsTracker {
    /// New tracker with all rights intact
    #[must_use]
    pub fn new() -> Self {
        RightsTracker {
            rights: Rights::all(),
        }
    }

    /// Restore all four rights. Called exactly at new-game start.
    pub fn reset(&mut self) {
        self.rights = Rights::all();
    }

    /// The current flags
    #[inline]
    #[must_use]
    pub fn rights(&self) -> &Rights {
        &self.rights
    }

    /// Render the current flags
    #[must_use]
    pub fn as_string(&self) -> String {
        self.rights.as_string()
    }

    /// Manual out-of-band correction: flip one flag.
    pub fn toggle(&mut self, flag: RightFlag) {
        self.rights.toggle(flag);
        log::info!("castling right {} toggled, now {}", flag, self.as_string());
    }

    /// Infer lost rights by diffing the occupants of the six sentinel
    /// squares (king and rook home squares) between two successive
    /// positions.
    ///
    /// Each sentinel is checked independently, so a single ply that
    /// touches several home squares (castling, a capture on a rook
    /// square) clears every affected flag in one call.
    pub fn infer_from_diff(&mut self, previous: &Position, current: &Position) {
        for (square, flags) in SENTINELS {
            if previous.occupant_of(square) != current.occupant_of(square) {
                for &flag in flags {
                    if self.rights.has(flag) {
                        self.rights.clear(flag);
                        log::info!("castling right {} lost ({} changed)", flag, square);
                    }
                }
            }
        }
    }
}
