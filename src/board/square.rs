//! Square type and coordinate helpers.
//!
//! A [`Square`] uses the chess convention (rank 0 = rank 1, file 0 =
//! file a). Snapshots and move commands use the snapshot provider's
//! grid convention where row 0 is the far rank; [`Square::row`] bridges
//! the two.

use std::fmt;
use std::str::FromStr;

/// A square on the board, represented as (rank, file).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Square(pub usize, pub usize); // (rank, file)

impl Square {
    /// White king home square
    pub const E1: Square = Square(0, 4);
    /// Black king home square
    pub const E8: Square = Square(7, 4);
    /// White queenside rook home square
    pub const A1: Square = Square(0, 0);
    /// White kingside rook home square
    pub const H1: Square = Square(0, 7);
    /// Black queenside rook home square
    pub const A8: Square = Square(7, 0);
    /// Black kingside rook home square
    pub const H8: Square = Square(7, 7);

    /// Create a new square with bounds checking
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square(rank, file))
        } else {
            None
        }
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        self.0
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        self.1
    }

    /// Grid row under the far-rank-is-row-0 convention (rank 8 = row 0)
    #[inline]
    #[must_use]
    pub const fn row(self) -> usize {
        7 - self.0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.1 as u8 + b'a') as char, self.0 + 1)
    }
}

impl FromStr for Square {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.chars().collect();
        if chars.len() != 2 {
            return Err(());
        }
        let file = match chars[0] {
            'a'..='h' => chars[0] as usize - 'a' as usize,
            _ => return Err(()),
        };
        let rank = match chars[1] {
            '1'..='8' => chars[1] as usize - '1' as usize,
            _ => return Err(()),
        };
        Ok(Square(rank, file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_display() {
        assert_eq!(Square::E1.to_string(), "e1");
        assert_eq!(Square::A8.to_string(), "a8");
        assert_eq!(Square(3, 4).to_string(), "e4");
    }

    #[test]
    fn test_square_from_str() {
        assert_eq!("e1".parse::<Square>().unwrap(), Square::E1);
        assert_eq!("h8".parse::<Square>().unwrap(), Square::H8);
        assert!("z9".parse::<Square>().is_err());
        assert!("e10".parse::<Square>().is_err());
    }

    #[test]
    fn test_row_convention() {
        // Rank 8 (far rank) is grid row 0
        assert_eq!(Square::E8.row(), 0);
        assert_eq!(Square::E1.row(), 7);
    }

    #[test]
    fn test_bounds() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
        assert!(Square::new(7, 7).is_some());
    }
}
