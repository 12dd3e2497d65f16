//! Canonical position encoding.
//!
//! A [`Position`] is the fully-qualified FEN-like string the engine
//! consumes: run-length-encoded occupancy (far rank first), side to
//! move, rights string, and constant placeholders for the two clock
//! fields this core does not track.

use super::error::SnapshotError;
use super::piece::{Color, Piece};
use super::rights::Rights;
use super::snapshot::Snapshot;
use super::square::Square;

/// The standard initial position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Canonical encoding of occupancy + side to move + rights.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    fen: String,
}

impl Position {
    /// Encode a snapshot into a canonical position.
    ///
    /// Walks the grid from the far rank (row 0) to the near rank, left
    /// file to right, run-length-encoding empty runs. The half-move
    /// clock and full-move number are emitted as constants.
    #[must_use]
    pub fn encode(snapshot: &Snapshot, side_to_move: Color, rights: &Rights) -> Position {
        let mut rows: Vec<String> = Vec::with_capacity(8);
        for row in 0..8 {
            let mut segment = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Some((color, piece)) = snapshot.get(row, file) {
                    if empty > 0 {
                        segment.push_str(&empty.to_string());
                        empty = 0;
                    }
                    segment.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                segment.push_str(&empty.to_string());
            }
            rows.push(segment);
        }

        Position {
            fen: format!(
                "{} {} {} - 0 1",
                rows.join("/"),
                side_to_move.to_char(),
                rights.as_string()
            ),
        }
    }

    /// Parse a position from a FEN-like string, validating the
    /// occupancy component and side field.
    pub fn from_fen(fen: &str) -> Result<Position, SnapshotError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let board = parts.first().copied().unwrap_or("");

        let segments: Vec<&str> = board.split('/').collect();
        if segments.len() != 8 {
            return Err(SnapshotError::BadRankCount {
                found: segments.len(),
            });
        }
        for (rank_idx, segment) in segments.iter().enumerate() {
            let mut files = 0;
            for c in segment.chars() {
                if let Some(d) = c.to_digit(10) {
                    files += d as usize;
                } else if Piece::from_char(c).is_some() {
                    files += 1;
                } else {
                    return Err(SnapshotError::InvalidPieceCode {
                        code: c.to_string(),
                    });
                }
            }
            if files != 8 {
                return Err(SnapshotError::BadFileCount {
                    rank: rank_idx,
                    found: files,
                });
            }
        }

        let side = parts.get(1).copied().unwrap_or("w");
        if side.len() != 1 || Color::from_char(side.chars().next().unwrap_or(' ')).is_none() {
            return Err(SnapshotError::InvalidSideToMove {
                found: side.to_string(),
            });
        }

        Ok(Position {
            fen: fen.to_string(),
        })
    }

    /// The full canonical string
    #[inline]
    #[must_use]
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// The occupancy component (everything before the first space)
    #[must_use]
    pub fn board_field(&self) -> &str {
        self.fen.split(' ').next().unwrap_or(&self.fen)
    }

    /// The side-to-move component
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.fen
            .split(' ')
            .nth(1)
            .and_then(|s| s.chars().next())
            .and_then(Color::from_char)
            .unwrap_or(Color::White)
    }

    /// The rights component
    #[must_use]
    pub fn rights_field(&self) -> &str {
        self.fen.split(' ').nth(2).unwrap_or("-")
    }

    /// Whether two positions have identical occupancy, ignoring side
    /// and rights. This is the opponent-move synchronization primitive.
    #[must_use]
    pub fn same_occupancy(&self, other: &Position) -> bool {
        self.board_field() == other.board_field()
    }

    /// Occupant of one square, resolved by walking the run-length
    /// encoded occupancy component. Malformed segments read as empty.
    #[must_use]
    pub fn occupant_of(&self, square: Square) -> Option<(Color, Piece)> {
        let segment = self.board_field().split('/').nth(square.row())?;
        let mut file = 0;
        for c in segment.chars() {
            if let Some(d) = c.to_digit(10) {
                file += d as usize;
                if file > square.file() {
                    return None;
                }
            } else {
                if file == square.file() {
                    let color = if c.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    return Piece::from_char(c).map(|p| (color, p));
                }
                file += 1;
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::rights::RightsTracker;

    #[test]
    fn test_encode_start_position() {
        let snap = Snapshot::start_position();
        let rights = RightsTracker::new();
        let pos = Position::encode(&snap, Color::White, rights.rights());
        assert_eq!(pos.fen(), START_FEN);
    }

    #[test]
    fn test_encode_no_rights_marker() {
        let snap = Snapshot::empty();
        let pos = Position::encode(&snap, Color::Black, &Rights::none());
        assert_eq!(pos.fen(), "8/8/8/8/8/8/8/8 b - - 0 1");
    }

    #[test]
    fn test_accessors() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos.board_field(), "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR");
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.rights_field(), "KQkq");
    }

    #[test]
    fn test_same_occupancy_ignores_metadata() {
        let a = Position::from_fen("8/8/8/8/8/8/8/R7 w KQkq - 0 1").unwrap();
        let b = Position::from_fen("8/8/8/8/8/8/8/R7 b - - 0 1").unwrap();
        let c = Position::from_fen("8/8/8/8/8/8/8/1R6 w KQkq - 0 1").unwrap();
        assert!(a.same_occupancy(&b));
        assert!(!a.same_occupancy(&c));
    }

    #[test]
    fn test_occupant_lookup() {
        let pos = Position::from_fen(START_FEN).unwrap();
        assert_eq!(pos.occupant_of(Square::E1), Some((Color::White, Piece::King)));
        assert_eq!(pos.occupant_of(Square::A8), Some((Color::Black, Piece::Rook)));
        assert_eq!(pos.occupant_of(Square(3, 3)), None);
    }

    #[test]
    fn test_occupant_after_empty_run() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/3qK3 w - - 0 1").unwrap();
        assert_eq!(pos.occupant_of(Square(0, 3)), Some((Color::Black, Piece::Queen)));
        assert_eq!(pos.occupant_of(Square::E1), Some((Color::White, Piece::King)));
        assert_eq!(pos.occupant_of(Square(0, 5)), None);
    }

    #[test]
    fn test_from_fen_rejects_bad_rank_count() {
        assert!(matches!(
            Position::from_fen("8/8/8 w - - 0 1"),
            Err(SnapshotError::BadRankCount { found: 3 })
        ));
    }

    #[test]
    fn test_from_fen_rejects_short_rank() {
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/7 w - - 0 1"),
            Err(SnapshotError::BadFileCount { rank: 7, found: 7 })
        ));
    }

    #[test]
    fn test_from_fen_rejects_bad_side() {
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/8 x - - 0 1"),
            Err(SnapshotError::InvalidSideToMove { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::board::rights::RightFlag;
    use proptest::prelude::*;

    fn cell_strategy() -> impl Strategy<Value = Option<(Color, Piece)>> {
        prop_oneof![
            4 => Just(None),
            1 => (any::<bool>(), 0..6usize).prop_map(|(white, p)| {
                let color = if white { Color::White } else { Color::Black };
                let piece = [
                    Piece::Pawn,
                    Piece::Knight,
                    Piece::Bishop,
                    Piece::Rook,
                    Piece::Queen,
                    Piece::King,
                ][p];
                Some((color, piece))
            }),
        ]
    }

    fn snapshot_strategy() -> impl Strategy<Value = Snapshot> {
        proptest::collection::vec(cell_strategy(), 64).prop_map(|cells| {
            let mut snap = Snapshot::empty();
            for (idx, cell) in cells.into_iter().enumerate() {
                snap.set(idx / 8, idx % 8, cell);
            }
            snap
        })
    }

    fn rights_strategy() -> impl Strategy<Value = Rights> {
        // Any subset of the four flags, including the empty "-" case
        proptest::collection::vec(proptest::bool::ANY, 4).prop_map(|kept| {
            let mut rights = Rights::all();
            for (flag, keep) in RightFlag::ALL.into_iter().zip(kept) {
                if !keep {
                    rights.clear(flag);
                }
            }
            rights
        })
    }

    proptest! {
        /// Property: every encoded position has exactly 8 rank segments
        /// whose run-lengths plus piece counts each sum to 8, and the
        /// side and rights fields survive unchanged.
        #[test]
        fn prop_encode_round_trip(
            snap in snapshot_strategy(),
            white in any::<bool>(),
            rights in rights_strategy(),
        ) {
            let side = if white { Color::White } else { Color::Black };
            let pos = Position::encode(&snap, side, &rights);

            let segments: Vec<&str> = pos.board_field().split('/').collect();
            prop_assert_eq!(segments.len(), 8);
            for segment in segments {
                let mut files = 0;
                for c in segment.chars() {
                    match c.to_digit(10) {
                        Some(d) => files += d as usize,
                        None => files += 1,
                    }
                }
                prop_assert_eq!(files, 8);
            }

            prop_assert_eq!(pos.side_to_move(), side);
            prop_assert_eq!(pos.rights_field(), rights.as_string());
            // The validating parser accepts every encoder output
            prop_assert!(Position::from_fen(pos.fen()).is_ok());
        }

        /// Property: the occupant lookup agrees with the source grid
        #[test]
        fn prop_occupant_matches_snapshot(snap in snapshot_strategy()) {
            let pos = Position::encode(&snap, Color::White, &Rights::all());
            for rank in 0..8 {
                for file in 0..8 {
                    let sq = Square(rank, file);
                    prop_assert_eq!(pos.occupant_of(sq), snap.get(sq.row(), file));
                }
            }
        }
    }
}
