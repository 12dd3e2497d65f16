//! Engine session: exclusive ownership of one engine handle.

use std::thread;
use std::time::Instant;

use crate::board::Position;

use super::config::{EngineConfig, Pacing, Strength};
use super::error::EngineError;
use super::uci::{Evaluation, UciHandle};
use super::MoveSearch;

/// Owns the lifetime of one external move-search engine process.
///
/// The handle is never shared: every operation goes through this
/// session, and a diagnosed communication failure is recovered by
/// discarding the handle wholesale and spawning a fresh one with the
/// same configuration ([`EngineSession::reset`]). No position state
/// survives a reset; the caller resubmits.
pub struct EngineSession {
    config: EngineConfig,
    handle: Option<UciHandle>,
}

impl EngineSession {
    /// Create a session; no process is spawned until `initialize`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        EngineSession {
            config,
            handle: None,
        }
    }

    /// The active configuration
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn handle_mut(&mut self) -> Result<&mut UciHandle, EngineError> {
        self.handle.as_mut().ok_or_else(|| EngineError::Communication {
            reason: "engine handle not initialized".to_string(),
        })
    }

    fn apply_strength(handle: &mut UciHandle, strength: Strength) -> Result<(), EngineError> {
        match strength {
            Strength::Skill(level) => {
                handle.set_option("UCI_LimitStrength", "false")?;
                handle.set_option("Skill Level", &level.to_string())?;
            }
            Strength::Elo(rating) => {
                handle.set_option("UCI_LimitStrength", "true")?;
                handle.set_option("UCI_Elo", &rating.to_string())?;
            }
        }
        Ok(())
    }
}

impl MoveSearch for EngineSession {
    fn initialize(&mut self) -> Result<(), EngineError> {
        let path = self.config.locate()?;
        let mut handle = UciHandle::spawn(&path)?;
        handle.set_option("Threads", &self.config.threads.to_string())?;
        handle.set_option("Minimum Thinking Time", &self.config.min_think_ms.to_string())?;
        Self::apply_strength(&mut handle, self.config.strength)?;
        handle.sync()?;
        log::info!("engine started: {}", path.display());
        self.handle = Some(handle);
        Ok(())
    }

    fn submit_position(&mut self, position: &Position) -> Result<(), EngineError> {
        let fen = position.fen().to_string();
        self.handle_mut()?.set_position(&fen)
    }

    fn best_move(&mut self, pacing: Pacing) -> Result<Option<String>, EngineError> {
        let delay = pacing.sample();
        if !delay.is_zero() {
            log::debug!("pacing delay {:.1}s", delay.as_secs_f64());
            thread::sleep(delay);
        }

        let depth = self.config.depth;
        let started = Instant::now();
        let token = self.handle_mut()?.go_best_move(depth)?;
        log::info!(
            "best-move query took {:.3}s (depth {depth})",
            started.elapsed().as_secs_f64()
        );
        Ok(token)
    }

    fn evaluation(&self) -> Option<Evaluation> {
        self.handle.as_ref().and_then(UciHandle::last_evaluation)
    }

    fn set_strength(&mut self, strength: Strength) -> Result<(), EngineError> {
        let strength = strength.validate()?;
        self.config.strength = strength;
        if let Some(handle) = self.handle.as_mut() {
            Self::apply_strength(handle, strength)?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<(), EngineError> {
        // Dropping the handle reaps the old process
        self.handle = None;
        log::warn!("engine handle discarded, restarting");
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_initialize_without_engine_is_unavailable() {
        let config = EngineConfig {
            path: Some(PathBuf::from("/nonexistent/engine-binary")),
            ..EngineConfig::default()
        };
        let mut session = EngineSession::new(config);
        assert!(matches!(
            session.initialize(),
            Err(EngineError::Unavailable { .. })
        ));
    }

    #[test]
    fn test_invalid_strength_keeps_previous_setting() {
        let mut session = EngineSession::new(EngineConfig::default());
        let before = session.config().strength;
        assert!(session.set_strength(Strength::Skill(0)).is_err());
        assert_eq!(session.config().strength, before);
    }

    #[test]
    fn test_valid_strength_is_stored() {
        let mut session = EngineSession::new(EngineConfig::default());
        session.set_strength(Strength::Elo(1500)).unwrap();
        assert_eq!(session.config().strength, Strength::Elo(1500));
    }

    #[test]
    fn test_query_before_initialize_is_communication_failure() {
        let mut session = EngineSession::new(EngineConfig::default());
        let position = Position::from_fen(crate::board::START_FEN).unwrap();
        assert!(matches!(
            session.submit_position(&position),
            Err(EngineError::Communication { .. })
        ));
    }
}
