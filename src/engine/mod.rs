//! External move-search engine session.

pub mod config;
pub mod error;
pub mod session;
pub mod uci;

pub use config::{EngineConfig, Pacing, Strength};
pub use error::EngineError;
pub use session::EngineSession;
pub use uci::{Evaluation, Score, Wdl};

use crate::board::Position;

/// The seam between the game loop and the move-search engine.
///
/// [`EngineSession`] is the production implementation; tests drive the
/// loop with scripted implementations.
pub trait MoveSearch {
    /// Locate and start the engine. Fails with
    /// [`EngineError::Unavailable`] when no executable can be found.
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Hand the engine its current analysis target.
    fn submit_position(&mut self, position: &Position) -> Result<(), EngineError>;

    /// Query the best move, after an optional randomized pacing delay.
    /// `None` means the engine reports no legal move (terminal
    /// position).
    fn best_move(&mut self, pacing: Pacing) -> Result<Option<String>, EngineError>;

    /// Latest evaluation/statistics, side-effect-free.
    fn evaluation(&self) -> Option<Evaluation>;

    /// Change playing strength; out-of-range values are rejected with
    /// [`EngineError::InvalidStrength`] and the previous setting stays.
    fn set_strength(&mut self, strength: Strength) -> Result<(), EngineError>;

    /// Discard the handle and start a fresh one with the same
    /// configuration. The only recovery action for a communication
    /// failure; the caller must resubmit the current position.
    fn reset(&mut self) -> Result<(), EngineError>;
}
