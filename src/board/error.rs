//! Error types for board-state operations.

use std::fmt;

/// Error type for malformed occupancy snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    /// Grid does not have exactly 8 ranks
    BadRankCount { found: usize },
    /// A rank does not have exactly 8 files
    BadFileCount { rank: usize, found: usize },
    /// Piece symbol from the snapshot provider could not be parsed
    InvalidPieceCode { code: String },
    /// Side-to-move field is not 'w' or 'b'
    InvalidSideToMove { found: String },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::BadRankCount { found } => {
                write!(f, "Snapshot must have 8 ranks, found {found}")
            }
            SnapshotError::BadFileCount { rank, found } => {
                write!(f, "Rank {rank} must have 8 files, found {found}")
            }
            SnapshotError::InvalidPieceCode { code } => {
                write!(f, "Invalid piece symbol '{code}' in snapshot")
            }
            SnapshotError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Error type for engine move-token decoding failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveTokenError {
    /// Token has invalid length (must be 4-5 characters)
    InvalidLength { len: usize },
    /// File letter out of the a-h range
    InvalidFile { char: char },
    /// Rank digit out of the 1-8 range
    InvalidRank { char: char },
    /// Invalid promotion piece character
    InvalidPromotion { char: char },
}

impl fmt::Display for MoveTokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveTokenError::InvalidLength { len } => {
                write!(f, "Move token must be 4-5 characters, found {len}")
            }
            MoveTokenError::InvalidFile { char } => {
                write!(f, "Invalid file letter '{char}' in move token")
            }
            MoveTokenError::InvalidRank { char } => {
                write!(f, "Invalid rank digit '{char}' in move token")
            }
            MoveTokenError::InvalidPromotion { char } => {
                write!(f, "Invalid promotion piece '{char}'")
            }
        }
    }
}

impl std::error::Error for MoveTokenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_error_bad_rank_count() {
        let err = SnapshotError::BadRankCount { found: 7 };
        assert!(err.to_string().contains('7'));
        assert!(err.to_string().contains('8'));
    }

    #[test]
    fn test_snapshot_error_invalid_code() {
        let err = SnapshotError::InvalidPieceCode {
            code: "wx".to_string(),
        };
        assert!(err.to_string().contains("wx"));
    }

    #[test]
    fn test_move_token_error_length() {
        let err = MoveTokenError::InvalidLength { len: 3 };
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_move_token_error_file() {
        let err = MoveTokenError::InvalidFile { char: 'z' };
        assert!(err.to_string().contains("'z'"));
    }

    #[test]
    fn test_error_equality() {
        let err1 = MoveTokenError::InvalidRank { char: '9' };
        let err2 = MoveTokenError::InvalidRank { char: '9' };
        assert_eq!(err1, err2);
    }
}
