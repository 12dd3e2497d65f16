//! Board-state synchronization and move-execution core for an automated
//! chess player.
//!
//! The crate observes a remote board through a [`driver::BoardSource`],
//! derives a canonical [`board::Position`], consults an external UCI
//! engine through an [`engine::EngineSession`], and translates the
//! engine's reply into click coordinates for a [`driver::ActionSink`].
//! The [`driver::GameLoop`] sequences one play cycle at a time and owns
//! the Idle/Playing state machine and the engine-failure recovery
//! policy.

pub mod board;
pub mod driver;
pub mod engine;

pub use board::{
    Color, MoveCommand, Piece, Position, RightFlag, Rights, RightsTracker, Snapshot, Square,
};
pub use driver::{
    ActionSink, BoardGeometry, BoardSource, Command, Controls, CycleOutcome, GameLoop, LoopJob,
    LoopState, Orientation, SharedStatus, TurnMonitor,
};
pub use engine::{EngineConfig, EngineError, EngineSession, Evaluation, MoveSearch, Strength};
