//! Collaborator seams: the snapshot provider and the action executor.
//!
//! Everything that touches the remote page lives behind these traits.
//! The core only decides which coordinates to act on, never how a
//! click is physically enacted.

use std::fmt;

use crate::board::{Piece, Snapshot};

/// Error type for snapshot-provider and action-executor failures.
///
/// Authentication/session errors are surfaced to the caller of the
/// loop; this core never retries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The page or board element could not be read or acted on
    Page { reason: String },
    /// The remote session is not authenticated or has expired
    Auth { reason: String },
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Page { reason } => write!(f, "Board page error: {reason}"),
            SourceError::Auth { reason } => write!(f, "Session error: {reason}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Board orientation as shown by the remote UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Far rank at the top: the local player controls White
    Normal,
    /// Board flipped: the local player controls Black
    Flipped,
}

/// Pixel geometry of the rendered board, for action executors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub cell_width: f64,
    pub cell_height: f64,
}

impl BoardGeometry {
    /// Pixel center of a grid cell (file 0 = left, row 0 = far rank)
    #[must_use]
    pub fn square_center(&self, file: usize, row: usize) -> (f64, f64) {
        (
            self.origin_x + self.cell_width / 2.0 + file as f64 * self.cell_width,
            self.origin_y + self.cell_height / 2.0 + row as f64 * self.cell_height,
        )
    }
}

/// Convert a scraped clock reading ("m:ss") to milliseconds.
#[must_use]
pub fn parse_clock(text: &str) -> Option<u64> {
    let (minutes, seconds) = text.split_once(':')?;
    let minutes: u64 = minutes.trim().parse().ok()?;
    let seconds: u64 = seconds.trim().parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(minutes * 60_000 + seconds * 1_000)
}

/// The snapshot provider: one observation of the remote board per call.
pub trait BoardSource {
    /// Read the current piece placement
    fn capture_snapshot(&mut self) -> Result<Snapshot, SourceError>;

    /// Pixel geometry of the board element
    fn board_geometry(&mut self) -> Result<BoardGeometry, SourceError>;

    /// Orientation marker, when the UI exposes one
    fn orientation_marker(&mut self) -> Option<Orientation>;

    /// (top, bottom) clock readings in milliseconds, when visible
    fn clock_readings(&mut self) -> Option<(u64, u64)>;

    /// Whether the UI shows a finished game
    fn game_over_detected(&mut self) -> bool;

    /// Ask the UI to start a new game
    fn dispatch_new_game(&mut self) -> Result<(), SourceError>;

    /// Issue the board-flip hotkey (compensation when the board is
    /// rendered flipped)
    fn send_flip_hotkey(&mut self) -> Result<(), SourceError>;
}

/// The action executor: enacts a move as two square clicks.
pub trait ActionSink {
    /// Click one grid cell (file 0 = left, row 0 = far rank)
    fn click_square(&mut self, file: usize, row: usize) -> Result<(), SourceError>;

    /// Pick a promotion piece. Boards that auto-queen need no
    /// override; boards with a promotion picker implement this.
    fn choose_promotion(&mut self, piece: Piece) -> Result<(), SourceError> {
        let _ = piece;
        Ok(())
    }
}
