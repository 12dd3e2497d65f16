//! Move commands decoded from engine replies.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::MoveTokenError;
use super::piece::Piece;

/// A decoded move: zero-indexed source and destination coordinates,
/// plus an optional promotion piece.
///
/// Coordinates use the grid convention of the snapshot provider: file
/// 0 = file a, row 0 = the far rank (a rank digit `d` maps to row
/// `8 - d`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveCommand {
    pub from_file: usize,
    pub from_row: usize,
    pub to_file: usize,
    pub to_row: usize,
    pub promotion: Option<Piece>,
}

impl MoveCommand {
    /// Decode an engine move token ("e2e4", "a7a8q").
    pub fn parse(token: &str) -> Result<MoveCommand, MoveTokenError> {
        let chars: Vec<char> = token.chars().collect();
        if chars.len() < 4 || chars.len() > 5 {
            return Err(MoveTokenError::InvalidLength { len: chars.len() });
        }

        let file = |c: char| match c {
            'a'..='h' => Ok(c as usize - 'a' as usize),
            _ => Err(MoveTokenError::InvalidFile { char: c }),
        };
        let row = |c: char| match c.to_digit(10) {
            Some(d @ 1..=8) => Ok(8 - d as usize),
            _ => Err(MoveTokenError::InvalidRank { char: c }),
        };

        let promotion = if chars.len() == 5 {
            let piece = Piece::from_char(chars[4])
                .ok_or(MoveTokenError::InvalidPromotion { char: chars[4] })?;
            if matches!(piece, Piece::Pawn | Piece::King) {
                return Err(MoveTokenError::InvalidPromotion { char: chars[4] });
            }
            Some(piece)
        } else {
            None
        };

        Ok(MoveCommand {
            from_file: file(chars[0])?,
            from_row: row(chars[1])?,
            to_file: file(chars[2])?,
            to_row: row(chars[3])?,
            promotion,
        })
    }
}

impl fmt::Display for MoveCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            (self.from_file as u8 + b'a') as char,
            8 - self.from_row,
            (self.to_file as u8 + b'a') as char,
            8 - self.to_row
        )?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.to_char())?;
        }
        Ok(())
    }
}
