//! Game-loop error type.

use std::fmt;

use crate::board::{MoveTokenError, SnapshotError};
use crate::engine::EngineError;

use super::source::SourceError;

/// Any failure a play cycle can surface to its caller.
#[derive(Debug)]
pub enum LoopError {
    /// The captured board state was malformed
    Snapshot(SnapshotError),
    /// The engine replied with an unparseable move token
    MoveToken(MoveTokenError),
    /// Engine failure the loop could not recover from
    Engine(EngineError),
    /// Snapshot provider or action executor failure
    Source(SourceError),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopError::Snapshot(err) => write!(f, "Snapshot error: {err}"),
            LoopError::MoveToken(err) => write!(f, "Move token error: {err}"),
            LoopError::Engine(err) => write!(f, "Engine error: {err}"),
            LoopError::Source(err) => write!(f, "Source error: {err}"),
        }
    }
}

impl std::error::Error for LoopError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoopError::Snapshot(err) => Some(err),
            LoopError::MoveToken(err) => Some(err),
            LoopError::Engine(err) => Some(err),
            LoopError::Source(err) => Some(err),
        }
    }
}

impl From<SnapshotError> for LoopError {
    fn from(err: SnapshotError) -> Self {
        LoopError::Snapshot(err)
    }
}

impl From<MoveTokenError> for LoopError {
    fn from(err: MoveTokenError) -> Self {
        LoopError::MoveToken(err)
    }
}

impl From<EngineError> for LoopError {
    fn from(err: EngineError) -> Self {
        LoopError::Engine(err)
    }
}

impl From<SourceError> for LoopError {
    fn from(err: SourceError) -> Self {
        LoopError::Source(err)
    }
}
