//! Status surface for the presentation layer.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::engine::Evaluation;

/// Rolling event-log capacity; oldest entries drop beyond this
pub const EVENT_LOG_CAPACITY: usize = 8;

/// Bounded rolling log of human-readable events.
#[derive(Debug)]
pub struct EventLog {
    lines: VecDeque<String>,
    capacity: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(EVENT_LOG_CAPACITY)
    }
}

impl EventLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        EventLog {
            lines: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a line, dropping the oldest beyond capacity. Every line
    /// is mirrored to the `log` facade.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{line}");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    /// Current lines, oldest first
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.lines.iter().cloned().collect()
    }
}

/// Point-in-time copy of the loop state for display.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    pub rights: String,
    pub side_to_move: Color,
    pub playing: bool,
    pub evaluation: Option<Evaluation>,
    /// (top, bottom) clock readings in milliseconds, when visible
    pub clocks: Option<(u64, u64)>,
    pub events: Vec<String>,
}

#[derive(Debug)]
struct StatusInner {
    rights: String,
    side_to_move: Color,
    playing: bool,
    evaluation: Option<Evaluation>,
    clocks: Option<(u64, u64)>,
    events: EventLog,
}

/// Shared, thread-safe status the presentation layer reads while the
/// loop worker writes.
#[derive(Clone)]
pub struct SharedStatus {
    inner: Arc<Mutex<StatusInner>>,
}

impl Default for SharedStatus {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStatus {
    #[must_use]
    pub fn new() -> Self {
        SharedStatus {
            inner: Arc::new(Mutex::new(StatusInner {
                rights: "KQkq".to_string(),
                side_to_move: Color::White,
                playing: false,
                evaluation: None,
                clocks: None,
                events: EventLog::default(),
            })),
        }
    }

    /// Record one human-readable event
    pub fn push_event(&self, line: impl Into<String>) {
        self.inner.lock().events.push(line);
    }

    /// Update the board-state fields after a cycle
    pub fn set_board_state(&self, rights: String, side_to_move: Color) {
        let mut inner = self.inner.lock();
        inner.rights = rights;
        inner.side_to_move = side_to_move;
    }

    pub fn set_playing(&self, playing: bool) {
        self.inner.lock().playing = playing;
    }

    pub fn set_evaluation(&self, evaluation: Option<Evaluation>) {
        if let Some(evaluation) = evaluation {
            self.inner.lock().evaluation = Some(evaluation);
        }
    }

    /// Record the latest clock readings; `None` means the clocks were
    /// not visible this cycle
    pub fn set_clocks(&self, clocks: Option<(u64, u64)>) {
        self.inner.lock().clocks = clocks;
    }

    /// Point-in-time copy for display
    #[must_use]
    pub fn snapshot(&self) -> Status {
        let inner = self.inner.lock();
        Status {
            rights: inner.rights.clone(),
            side_to_move: inner.side_to_move,
            playing: inner.playing,
            evaluation: inner.evaluation,
            clocks: inner.clocks,
            events: inner.events.lines(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_log_drops_oldest() {
        let mut events = EventLog::new(3);
        for i in 0..5 {
            events.push(format!("event {i}"));
        }
        assert_eq!(events.lines(), vec!["event 2", "event 3", "event 4"]);
    }

    #[test]
    fn test_event_log_default_capacity() {
        let mut events = EventLog::default();
        for i in 0..20 {
            events.push(format!("event {i}"));
        }
        assert_eq!(events.lines().len(), EVENT_LOG_CAPACITY);
        assert_eq!(events.lines()[0], "event 12");
    }

    #[test]
    fn test_shared_status_snapshot() {
        let status = SharedStatus::new();
        status.set_board_state("Kq".to_string(), Color::Black);
        status.set_playing(true);
        status.push_event("played e2e4");

        let snap = status.snapshot();
        assert_eq!(snap.rights, "Kq");
        assert_eq!(snap.side_to_move, Color::Black);
        assert!(snap.playing);
        assert_eq!(snap.events, vec!["played e2e4"]);
    }

    #[test]
    fn test_clocks_track_visibility() {
        let status = SharedStatus::new();
        assert_eq!(status.snapshot().clocks, None);
        status.set_clocks(Some((205_000, 198_000)));
        assert_eq!(status.snapshot().clocks, Some((205_000, 198_000)));
        status.set_clocks(None);
        assert_eq!(status.snapshot().clocks, None);
    }

    #[test]
    fn test_set_evaluation_keeps_last_known() {
        use crate::engine::{Evaluation, Score};
        let status = SharedStatus::new();
        status.set_evaluation(Some(Evaluation {
            depth: 10,
            score: Score::Centipawns(25),
            wdl: None,
        }));
        // A cycle with no fresh evaluation keeps the previous one
        status.set_evaluation(None);
        assert!(status.snapshot().evaluation.is_some());
    }
}
