//! Board-state domain: snapshots, canonical positions, move commands and
//! castling rights.

pub mod error;
pub mod moves;
pub mod piece;
pub mod position;
pub mod rights;
pub mod snapshot;
pub mod square;

pub use error::{MoveTokenError, SnapshotError};
pub use moves::MoveCommand;
pub use piece::{Color, Piece};
pub use position::{Position, START_FEN};
pub use rights::{RightFlag, Rights, RightsTracker};
pub use snapshot::{Cell, Snapshot};
pub use square::Square;
