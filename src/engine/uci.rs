//! Child-process UCI client.
//!
//! One [`UciHandle`] wraps one spawned engine process with piped
//! stdin/stdout. All communication is line-oriented and strictly
//! sequential: send a command, read replies until the expected
//! terminator. A closed pipe or I/O error surfaces as
//! [`EngineError::Communication`]; the owning session recovers by
//! dropping the handle and spawning a fresh one.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Scalar evaluation from the engine's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Score {
    /// Centipawns for the side to move
    Centipawns(i32),
    /// Moves until mate (negative when being mated)
    Mate(i32),
}

/// Win/draw/loss distribution in per-mille, side to move first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wdl {
    pub win: u32,
    pub draw: u32,
    pub loss: u32,
}

/// Evaluation and statistics parsed from the engine's search output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Evaluation {
    /// Depth the line was reported at
    pub depth: u32,
    pub score: Score,
    pub wdl: Option<Wdl>,
}

/// Parse one `info ...` line into an evaluation, if it carries a score.
#[must_use]
pub fn parse_info_line(line: &str) -> Option<Evaluation> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.first() != Some(&"info") {
        return None;
    }

    let mut depth = 0;
    let mut score = None;
    let mut wdl = None;

    let mut i = 1;
    while i < parts.len() {
        match parts[i] {
            "depth" => {
                if let Some(d) = parts.get(i + 1).and_then(|v| v.parse().ok()) {
                    depth = d;
                }
                i += 2;
            }
            "score" => match (parts.get(i + 1), parts.get(i + 2)) {
                (Some(&"cp"), Some(v)) => {
                    score = v.parse().ok().map(Score::Centipawns);
                    i += 3;
                }
                (Some(&"mate"), Some(v)) => {
                    score = v.parse().ok().map(Score::Mate);
                    i += 3;
                }
                _ => i += 1,
            },
            "wdl" => {
                if let (Some(w), Some(d), Some(l)) = (
                    parts.get(i + 1).and_then(|v| v.parse().ok()),
                    parts.get(i + 2).and_then(|v| v.parse().ok()),
                    parts.get(i + 3).and_then(|v| v.parse().ok()),
                ) {
                    wdl = Some(Wdl {
                        win: w,
                        draw: d,
                        loss: l,
                    });
                }
                i += 4;
            }
            _ => i += 1,
        }
    }

    score.map(|score| Evaluation { depth, score, wdl })
}

/// One running engine process.
#[derive(Debug)]
pub struct UciHandle {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
    last_evaluation: Option<Evaluation>,
}

impl UciHandle {
    /// Spawn the engine and complete the UCI handshake.
    pub fn spawn(path: &Path) -> Result<Self, EngineError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| EngineError::Unavailable {
                reason: format!("failed to start {}: {e}", path.display()),
            })?;

        let stdin = child.stdin.take().ok_or_else(|| EngineError::Unavailable {
            reason: "engine stdin not captured".to_string(),
        })?;
        let stdout = child.stdout.take().ok_or_else(|| EngineError::Unavailable {
            reason: "engine stdout not captured".to_string(),
        })?;

        let mut handle = UciHandle {
            child,
            stdin,
            reader: BufReader::new(stdout),
            last_evaluation: None,
        };

        handle.send("uci")?;
        handle.wait_for("uciok")?;
        Ok(handle)
    }

    fn send(&mut self, command: &str) -> Result<(), EngineError> {
        writeln!(self.stdin, "{command}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        let bytes = self.reader.read_line(&mut line)?;
        if bytes == 0 {
            return Err(EngineError::Communication {
                reason: "engine closed its output pipe".to_string(),
            });
        }
        Ok(line.trim_end().to_string())
    }

    /// Read replies until a line starting with `token` arrives.
    fn wait_for(&mut self, token: &str) -> Result<String, EngineError> {
        loop {
            let line = self.read_line()?;
            if line.starts_with(token) {
                return Ok(line);
            }
        }
    }

    /// `isready`/`readyok` synchronization point
    pub fn sync(&mut self) -> Result<(), EngineError> {
        self.send("isready")?;
        self.wait_for("readyok")?;
        Ok(())
    }

    /// Set one UCI option
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        self.send(&format!("setoption name {name} value {value}"))
    }

    /// Hand the engine its current analysis target
    pub fn set_position(&mut self, fen: &str) -> Result<(), EngineError> {
        self.send(&format!("position fen {fen}"))?;
        self.sync()
    }

    /// Search to the given depth and return the best-move token, or
    /// `None` for a terminal position. Evaluation-bearing `info` lines
    /// seen along the way refresh the cached evaluation.
    pub fn go_best_move(&mut self, depth: u32) -> Result<Option<String>, EngineError> {
        self.send(&format!("go depth {depth}"))?;
        loop {
            let line = self.read_line()?;
            if let Some(eval) = parse_info_line(&line) {
                self.last_evaluation = Some(eval);
            } else if let Some(rest) = line.strip_prefix("bestmove") {
                let token = rest.split_whitespace().next().unwrap_or("");
                if token.is_empty() || token == "(none)" || token == "0000" {
                    return Ok(None);
                }
                return Ok(Some(token.to_string()));
            }
        }
    }

    /// Evaluation cached from the most recent search, if any
    #[must_use]
    pub fn last_evaluation(&self) -> Option<Evaluation> {
        self.last_evaluation
    }
}

impl Drop for UciHandle {
    fn drop(&mut self) {
        // Best effort: ask politely, then reap unconditionally
        let _ = self.send("quit");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info_with_cp_and_wdl() {
        let line = "info depth 18 seldepth 24 score cp 35 wdl 312 598 90 nodes 842000 pv e2e4";
        let eval = parse_info_line(line).unwrap();
        assert_eq!(eval.depth, 18);
        assert_eq!(eval.score, Score::Centipawns(35));
        assert_eq!(
            eval.wdl,
            Some(Wdl {
                win: 312,
                draw: 598,
                loss: 90
            })
        );
    }

    #[test]
    fn test_parse_info_mate_score() {
        let eval = parse_info_line("info depth 12 score mate -3 nodes 1000").unwrap();
        assert_eq!(eval.score, Score::Mate(-3));
        assert_eq!(eval.wdl, None);
    }

    #[test]
    fn test_parse_info_without_score_is_none() {
        assert_eq!(parse_info_line("info string NNUE evaluation enabled"), None);
        assert_eq!(parse_info_line("info depth 5 currmove e2e4"), None);
    }

    #[test]
    fn test_parse_non_info_line_is_none() {
        assert_eq!(parse_info_line("bestmove e2e4 ponder e7e5"), None);
        assert_eq!(parse_info_line("readyok"), None);
    }

    #[test]
    fn test_spawn_bogus_path_is_unavailable() {
        let err = UciHandle::spawn(Path::new("/nonexistent/engine-binary")).unwrap_err();
        assert!(matches!(err, EngineError::Unavailable { .. }));
    }
}
