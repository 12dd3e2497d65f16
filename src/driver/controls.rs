//! Manual-override signals from the observing context.
//!
//! Overrides are queued and drained at the top of each loop iteration;
//! they take effect on iteration boundaries, never mid-cycle.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::{Color, RightFlag};
use crate::engine::Strength;

/// One queued manual override.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Override side to move / controlled side
    SetSide(Color),
    /// Flip one castling-right flag
    ToggleRight(RightFlag),
    /// Change engine playing strength
    SetStrength(Strength),
    /// Force a move on the next iteration regardless of detection
    MoveNow,
}

/// Shared control surface between the observing context and the loop
/// worker. Clone-cheap; all clones share the same state.
#[derive(Clone, Default)]
pub struct Controls {
    inner: Arc<ControlsInner>,
}

#[derive(Default)]
struct ControlsInner {
    queue: Mutex<Vec<Command>>,
    stop: AtomicBool,
}

impl Controls {
    #[must_use]
    pub fn new() -> Self {
        Controls::default()
    }

    /// Queue one override for the next iteration boundary
    pub fn push(&self, command: Command) {
        self.inner.queue.lock().push(command);
    }

    /// Take all queued overrides, oldest first
    #[must_use]
    pub fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.inner.queue.lock())
    }

    /// Ask the loop to stop scheduling further iterations
    pub fn stop(&self) {
        self.inner.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.stop.load(Ordering::Relaxed)
    }

    /// Clear the stop flag before a new run
    pub fn reset_stop(&self) {
        self.inner.stop.store(false, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_order() {
        let controls = Controls::new();
        controls.push(Command::MoveNow);
        controls.push(Command::SetSide(Color::Black));
        assert_eq!(
            controls.drain(),
            vec![Command::MoveNow, Command::SetSide(Color::Black)]
        );
        assert!(controls.drain().is_empty());
    }

    #[test]
    fn test_clones_share_state() {
        let controls = Controls::new();
        let other = controls.clone();
        other.push(Command::MoveNow);
        other.stop();
        assert_eq!(controls.drain(), vec![Command::MoveNow]);
        assert!(controls.is_stopped());
    }

    #[test]
    fn test_stop_flag_lifecycle() {
        let controls = Controls::new();
        assert!(!controls.is_stopped());
        controls.stop();
        assert!(controls.is_stopped());
        controls.reset_stop();
        assert!(!controls.is_stopped());
    }
}
