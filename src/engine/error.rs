//! Error types for engine-session operations.

use std::fmt;
use std::io;

/// Error type for external engine failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No engine executable could be located or started
    Unavailable { reason: String },
    /// The running engine process stopped answering or broke protocol.
    /// Recovered by discarding and recreating the handle.
    Communication { reason: String },
    /// Strength setting out of range; the previous setting is retained
    InvalidStrength { mode: &'static str, value: u32 },
}

impl EngineError {
    /// Whether this failure is recovered by a session reset
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, EngineError::Communication { .. })
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Unavailable { reason } => {
                write!(f, "Engine unavailable: {reason}")
            }
            EngineError::Communication { reason } => {
                write!(f, "Engine communication failure: {reason}")
            }
            EngineError::InvalidStrength { mode, value } => {
                write!(f, "Invalid {mode} strength value {value}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

impl From<io::Error> for EngineError {
    fn from(err: io::Error) -> Self {
        EngineError::Communication {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_context() {
        let err = EngineError::InvalidStrength {
            mode: "skill",
            value: 42,
        };
        assert!(err.to_string().contains("skill"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_recoverability() {
        assert!(EngineError::Communication {
            reason: "pipe closed".to_string()
        }
        .is_recoverable());
        assert!(!EngineError::Unavailable {
            reason: "not found".to_string()
        }
        .is_recoverable());
    }

    #[test]
    fn test_io_error_maps_to_communication() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe");
        let err: EngineError = io_err.into();
        assert!(matches!(err, EngineError::Communication { .. }));
    }
}
