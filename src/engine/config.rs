//! Engine session configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Executable names probed on PATH when no explicit path is configured
const DEFAULT_ENGINE_NAMES: &[&str] = &["stockfish", "stockfish.exe"];

/// Playing-strength setting for the external engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strength {
    /// Fixed skill level, 1-20
    Skill(u8),
    /// Target rating band, 100-3000
    Elo(u32),
}

impl Strength {
    /// Validate the value range, returning the setting unchanged.
    pub fn validate(self) -> Result<Strength, EngineError> {
        match self {
            Strength::Skill(level) if (1..=20).contains(&level) => Ok(self),
            Strength::Skill(level) => Err(EngineError::InvalidStrength {
                mode: "skill",
                value: u32::from(level),
            }),
            Strength::Elo(rating) if (100..=3000).contains(&rating) => Ok(self),
            Strength::Elo(rating) => Err(EngineError::InvalidStrength {
                mode: "rating",
                value: rating,
            }),
        }
    }
}

/// Randomized pre-query delay range (anti-pattern-detection pacing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pacing {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl Pacing {
    /// No delay (used by tests and manual-trigger play)
    #[must_use]
    pub const fn none() -> Self {
        Pacing { min_ms: 0, max_ms: 0 }
    }

    /// Draw a uniform delay from the configured range
    #[must_use]
    pub fn sample(self) -> Duration {
        if self.max_ms <= self.min_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing {
            min_ms: 5_000,
            max_ms: 50_000,
        }
    }
}

/// Configuration for one engine session.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Explicit engine executable; when `None`, PATH is searched
    pub path: Option<PathBuf>,
    /// Search depth per query
    pub depth: u32,
    /// Engine worker threads
    pub threads: u32,
    /// Minimum thinking time floor in milliseconds
    pub min_think_ms: u64,
    /// Playing strength applied at startup
    pub strength: Strength,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            path: None,
            depth: 18,
            threads: 2,
            min_think_ms: 30,
            strength: Strength::Skill(12),
        }
    }
}

impl EngineConfig {
    /// Resolve the engine executable: the configured path when it
    /// exists, otherwise a PATH search for a known engine name.
    pub fn locate(&self) -> Result<PathBuf, EngineError> {
        if let Some(path) = &self.path {
            if path.is_file() {
                return Ok(path.clone());
            }
            return Err(EngineError::Unavailable {
                reason: format!("configured engine path {} does not exist", path.display()),
            });
        }

        let search = env::var_os("PATH").unwrap_or_default();
        for dir in env::split_paths(&search) {
            for name in DEFAULT_ENGINE_NAMES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Ok(candidate);
                }
            }
        }

        Err(EngineError::Unavailable {
            reason: "no engine executable found on PATH; set an explicit path".to_string(),
        })
    }
}
