//! Turn state and opponent-move detection.

use crate::board::{Color, Position};

use super::source::Orientation;

/// Tracks whose turn it is and which side the local player controls.
///
/// The two sides coincide in practice: the bot only submits positions
/// when it is its own side to move, so a manual side override sets
/// both.
#[derive(Clone, Debug)]
pub struct TurnMonitor {
    side_to_move: Color,
    my_side: Color,
    playing: bool,
}

impl Default for TurnMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl TurnMonitor {
    #[must_use]
    pub fn new() -> Self {
        TurnMonitor {
            side_to_move: Color::White,
            my_side: Color::White,
            playing: false,
        }
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    #[must_use]
    pub fn my_side(&self) -> Color {
        self.my_side
    }

    #[inline]
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip the Idle/Playing gate
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    /// Manual side override. Rejected while a game is in progress to
    /// avoid corrupting an active game.
    pub fn set_side(&mut self, side: Color) {
        if self.playing {
            log::warn!("side override to {side} ignored while playing");
            return;
        }
        self.side_to_move = side;
        self.my_side = side;
        log::info!("side set to {side}");
    }

    /// Infer the controlled side from the UI's orientation marker.
    ///
    /// Returns `true` when the caller must issue the compensating
    /// board-flip hotkey (once, when the board is rendered flipped).
    /// An absent marker keeps the previous value.
    pub fn infer_from_orientation(&mut self, marker: Option<Orientation>) -> bool {
        match marker {
            Some(Orientation::Normal) => {
                self.side_to_move = Color::White;
                self.my_side = Color::White;
                false
            }
            Some(Orientation::Flipped) => {
                self.side_to_move = Color::Black;
                self.my_side = Color::Black;
                true
            }
            None => {
                log::warn!("orientation marker absent, keeping {}", self.side_to_move);
                false
            }
        }
    }

    /// Whether the board occupancy changed between two positions.
    ///
    /// Pure function of its inputs; side-to-move and rights fields are
    /// ignored. This is the single synchronization primitive the game
    /// loop polls.
    #[must_use]
    pub fn has_opponent_moved(previous: &Position, current: &Position) -> bool {
        !previous.same_occupancy(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::START_FEN;

    #[test]
    fn test_set_side_rejected_while_playing() {
        let mut monitor = TurnMonitor::new();
        monitor.set_playing(true);
        monitor.set_side(Color::Black);
        assert_eq!(monitor.side_to_move(), Color::White);

        monitor.set_playing(false);
        monitor.set_side(Color::Black);
        assert_eq!(monitor.side_to_move(), Color::Black);
        assert_eq!(monitor.my_side(), Color::Black);
    }

    #[test]
    fn test_orientation_inference() {
        let mut monitor = TurnMonitor::new();
        assert!(monitor.infer_from_orientation(Some(Orientation::Flipped)));
        assert_eq!(monitor.my_side(), Color::Black);

        assert!(!monitor.infer_from_orientation(Some(Orientation::Normal)));
        assert_eq!(monitor.my_side(), Color::White);
    }

    #[test]
    fn test_absent_marker_keeps_previous() {
        let mut monitor = TurnMonitor::new();
        monitor.infer_from_orientation(Some(Orientation::Flipped));
        assert!(!monitor.infer_from_orientation(None));
        assert_eq!(monitor.my_side(), Color::Black);
    }

    #[test]
    fn test_opponent_move_detection_is_idempotent() {
        let a = Position::from_fen(START_FEN).unwrap();
        let b = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();

        let first = TurnMonitor::has_opponent_moved(&a, &b);
        let second = TurnMonitor::has_opponent_moved(&a, &b);
        assert!(first && second);

        assert!(!TurnMonitor::has_opponent_moved(&a, &a));
        assert!(!TurnMonitor::has_opponent_moved(&a, &a));
    }

    #[test]
    fn test_metadata_change_is_not_a_move() {
        let a = Position::from_fen("8/8/8/8/8/8/8/R7 w KQkq - 0 1").unwrap();
        let b = Position::from_fen("8/8/8/8/8/8/8/R7 b - - 0 1").unwrap();
        assert!(!TurnMonitor::has_opponent_moved(&a, &b));
    }
}
