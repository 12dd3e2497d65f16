//! Raw per-square occupancy read from the external board source.

use super::error::SnapshotError;
use super::piece::{Color, Piece};

/// One board square: empty, or occupied by a colored piece.
pub type Cell = Option<(Color, Piece)>;

/// An 8x8 occupancy grid captured once per polling cycle.
///
/// Row 0 is the far rank (rank 8), matching the screen-reading order of
/// the snapshot provider. A `Snapshot` is immutable once captured; the
/// next polling cycle supersedes it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    cells: [[Cell; 8]; 8],
}

impl Snapshot {
    /// An empty board
    #[must_use]
    pub const fn empty() -> Self {
        Snapshot {
            cells: [[None; 8]; 8],
        }
    }

    /// Build a snapshot from provider rows, validating the 8x8 shape.
    ///
    /// This is the single place the malformed-snapshot condition is
    /// raised; downstream encoding is infallible.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, SnapshotError> {
        if rows.len() != 8 {
            return Err(SnapshotError::BadRankCount { found: rows.len() });
        }
        let mut cells = [[None; 8]; 8];
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != 8 {
                return Err(SnapshotError::BadFileCount {
                    rank: row_idx,
                    found: row.len(),
                });
            }
            for (file, cell) in row.into_iter().enumerate() {
                cells[row_idx][file] = cell;
            }
        }
        Ok(Snapshot { cells })
    }

    /// Parse one provider cell symbol.
    ///
    /// Symbols are the two-character color+piece codes the board page
    /// exposes ("wq", "bk", ...); an empty string or "_" is an empty
    /// square.
    pub fn parse_cell(code: &str) -> Result<Cell, SnapshotError> {
        if code.is_empty() || code == "_" {
            return Ok(None);
        }
        let invalid = || SnapshotError::InvalidPieceCode {
            code: code.to_string(),
        };
        let mut chars = code.chars();
        let (color_char, piece_char) = match (chars.next(), chars.next(), chars.next()) {
            (Some(c), Some(p), None) => (c, p),
            _ => return Err(invalid()),
        };
        let color = Color::from_char(color_char).ok_or_else(invalid)?;
        let piece = Piece::from_char(piece_char).ok_or_else(invalid)?;
        Ok(Some((color, piece)))
    }

    /// Occupant of a grid cell (row 0 = far rank)
    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, file: usize) -> Cell {
        self.cells[row][file]
    }

    /// Place or clear a piece on a grid cell
    pub fn set(&mut self, row: usize, file: usize, cell: Cell) {
        self.cells[row][file] = cell;
    }

    /// The standard initial setup
    #[must_use]
    pub fn start_position() -> Self {
        use Piece::{Bishop, King, Knight, Pawn, Queen, Rook};
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];
        let mut snap = Snapshot::empty();
        for (file, piece) in back.into_iter().enumerate() {
            snap.set(0, file, Some((Color::Black, piece)));
            snap.set(1, file, Some((Color::Black, Pawn)));
            snap.set(6, file, Some((Color::White, Pawn)));
            snap.set(7, file, Some((Color::White, piece)));
        }
        snap
    }
}
