//! The play loop: observe, synchronize, search, act.
//!
//! [`GameLoop`] sequences one cycle at a time over three seams: a
//! [`BoardSource`] that observes the remote board, a [`MoveSearch`]
//! engine that picks moves, and an [`ActionSink`] that enacts them as
//! square clicks. The loop owns the Idle/Playing state machine, the
//! castling-rights and turn trackers, and the engine-failure recovery
//! policy.

pub mod controls;
pub mod error;
pub mod events;
pub mod source;
pub mod turn;

pub use controls::{Command, Controls};
pub use error::LoopError;
pub use events::{EventLog, SharedStatus, Status, EVENT_LOG_CAPACITY};
pub use source::{parse_clock, ActionSink, BoardGeometry, BoardSource, Orientation, SourceError};
pub use turn::TurnMonitor;

use std::io;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::board::{Color, MoveCommand, Position, RightsTracker};
use crate::engine::{EngineError, MoveSearch, Pacing};

/// Where the loop is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    /// Not playing; cycles are no-ops until [`GameLoop::start`]
    Idle,
    /// Actively observing and moving
    Playing,
    /// The engine reported a terminal position; collapses to Idle on
    /// the next cycle
    Ended,
}

/// What one call to [`GameLoop::step`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The loop is idle; nothing was observed
    NotPlaying,
    /// Observed, no move was due
    Waiting,
    /// A move was executed on the board
    Played { token: String },
    /// The engine reported no legal move
    Terminal,
    /// A finished game was detected and a new one was started
    NewGame,
    /// A communication failure was recovered by restarting the engine
    EngineRestarted,
}

/// Polling interval between cycles when running on a worker thread
const DEFAULT_TICK: Duration = Duration::from_millis(500);

/// The play loop over a snapshot provider, an engine and a click sink.
pub struct GameLoop<S, A, E> {
    source: S,
    sink: A,
    engine: E,
    rights: RightsTracker,
    turn: TurnMonitor,
    previous: Option<Position>,
    state: LoopState,
    controls: Controls,
    status: SharedStatus,
    pacing: Pacing,
    tick: Duration,
}

impl<S, A, E> GameLoop<S, A, E>
where
    S: BoardSource,
    A: ActionSink,
    E: MoveSearch,
{
    #[must_use]
    pub fn new(source: S, sink: A, engine: E) -> Self {
        GameLoop {
            source,
            sink,
            engine,
            rights: RightsTracker::new(),
            turn: TurnMonitor::new(),
            previous: None,
            state: LoopState::Idle,
            controls: Controls::new(),
            status: SharedStatus::new(),
            pacing: Pacing::default(),
            tick: DEFAULT_TICK,
        }
    }

    /// Replace the randomized pre-move delay
    #[must_use]
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Replace the polling interval used by [`GameLoop::run`]
    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Handle for queueing manual overrides and stopping the loop
    #[must_use]
    pub fn controls(&self) -> Controls {
        self.controls.clone()
    }

    /// Handle for reading loop status from another thread
    #[must_use]
    pub fn status(&self) -> SharedStatus {
        self.status.clone()
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Begin playing: start the engine, restore castling rights, infer
    /// the controlled side from the board orientation and compensate
    /// with the flip hotkey when needed. A second call while already
    /// playing is a no-op.
    pub fn start(&mut self) -> Result<(), LoopError> {
        if self.state == LoopState::Playing {
            log::warn!("start requested while already playing, ignored");
            return Ok(());
        }
        self.engine.initialize()?;
        self.rights.reset();
        self.previous = None;
        if self.turn.infer_from_orientation(self.source.orientation_marker()) {
            self.source.send_flip_hotkey()?;
        }
        self.state = LoopState::Playing;
        self.turn.set_playing(true);
        self.status.set_playing(true);
        self.status
            .set_board_state(self.rights.as_string(), self.turn.side_to_move());
        self.status
            .push_event(format!("session started as {}", self.turn.my_side()));
        Ok(())
    }

    /// Run one play cycle.
    ///
    /// Queued overrides are applied first, then the board is observed,
    /// lost castling rights are inferred, and a move is executed when
    /// one is due. A recoverable engine failure restarts the engine
    /// once and leaves the loop playing; the position is resubmitted on
    /// the next cycle. Any other failure aborts the game to Idle and is
    /// returned to the caller, never swallowed.
    pub fn step(&mut self) -> Result<CycleOutcome, LoopError> {
        match self.cycle() {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                log::error!("cycle aborted: {err}");
                self.abandon();
                Err(err)
            }
        }
    }

    fn cycle(&mut self) -> Result<CycleOutcome, LoopError> {
        let force_move = self.apply_commands();
        if self.state == LoopState::Idle {
            return Ok(CycleOutcome::NotPlaying);
        }
        if self.state == LoopState::Ended {
            // Ended is transient; only an explicit start re-arms the loop
            self.state = LoopState::Idle;
            return Ok(CycleOutcome::NotPlaying);
        }

        if self.source.game_over_detected() {
            self.begin_new_game()?;
            return Ok(CycleOutcome::NewGame);
        }

        let snapshot = self.source.capture_snapshot()?;
        let observed = Position::encode(&snapshot, self.turn.side_to_move(), self.rights.rights());
        if let Some(previous) = &self.previous {
            self.rights.infer_from_diff(previous, &observed);
        }
        let current = Position::encode(&snapshot, self.turn.side_to_move(), self.rights.rights());
        self.status
            .set_board_state(self.rights.as_string(), self.turn.side_to_move());

        let move_due = match &self.previous {
            Some(previous) => TurnMonitor::has_opponent_moved(previous, &current),
            // White opens immediately; Black waits for the first diff
            None => self.turn.my_side() == Color::White,
        };
        if !(move_due || force_move) {
            if self.previous.is_none() {
                self.previous = Some(current);
            }
            return Ok(CycleOutcome::Waiting);
        }

        if let Err(err) = self.engine.submit_position(&current) {
            return self.recover(err);
        }
        let token = match self.engine.best_move(self.pacing) {
            Ok(Some(token)) => token,
            Ok(None) => {
                self.state = LoopState::Ended;
                self.turn.set_playing(false);
                self.status.set_playing(false);
                self.status.push_event("no legal move, game over");
                return Ok(CycleOutcome::Terminal);
            }
            Err(err) => return self.recover(err),
        };

        let command = MoveCommand::parse(&token)?;
        self.sink.click_square(command.from_file, command.from_row)?;
        self.sink.click_square(command.to_file, command.to_row)?;
        if let Some(piece) = command.promotion {
            self.sink.choose_promotion(piece)?;
        }

        // Re-observe so our own ply feeds rights inference and becomes
        // the baseline for opponent-move detection
        let snapshot = self.source.capture_snapshot()?;
        let played = Position::encode(&snapshot, self.turn.side_to_move(), self.rights.rights());
        self.rights.infer_from_diff(&current, &played);
        let played = Position::encode(&snapshot, self.turn.side_to_move(), self.rights.rights());
        self.previous = Some(played);

        self.status.set_evaluation(self.engine.evaluation());
        self.status.set_clocks(self.source.clock_readings());
        self.status
            .set_board_state(self.rights.as_string(), self.turn.side_to_move());
        self.status.push_event(format!("played {token}"));
        Ok(CycleOutcome::Played { token })
    }

    /// Poll [`GameLoop::step`] until the controls ask to stop. Returns
    /// the first unrecovered cycle error.
    pub fn run(&mut self) -> Result<(), LoopError> {
        self.controls.reset_stop();
        while !self.controls.is_stopped() {
            let outcome = self.step()?;
            log::debug!("cycle outcome: {outcome:?}");
            thread::sleep(self.tick);
        }
        Ok(())
    }

    fn apply_commands(&mut self) -> bool {
        let mut force_move = false;
        for command in self.controls.drain() {
            match command {
                Command::SetSide(side) => self.turn.set_side(side),
                Command::ToggleRight(flag) => self.rights.toggle(flag),
                Command::SetStrength(strength) => {
                    if let Err(err) = self.engine.set_strength(strength) {
                        log::warn!("strength override rejected: {err}");
                    }
                }
                Command::MoveNow => force_move = true,
            }
        }
        force_move
    }

    fn begin_new_game(&mut self) -> Result<(), LoopError> {
        self.source.dispatch_new_game()?;
        self.rights.reset();
        self.previous = None;
        self.state = LoopState::Playing;
        if self.turn.infer_from_orientation(self.source.orientation_marker()) {
            self.source.send_flip_hotkey()?;
        }
        self.turn.set_playing(true);
        self.status.set_playing(true);
        self.status
            .set_board_state(self.rights.as_string(), self.turn.side_to_move());
        self.status.push_event("new game started");
        Ok(())
    }

    fn recover(&mut self, err: EngineError) -> Result<CycleOutcome, LoopError> {
        if !err.is_recoverable() {
            return Err(LoopError::Engine(err));
        }
        log::error!("engine failure: {err}, restarting");
        self.engine.reset()?;
        self.status
            .push_event("engine restarted after communication failure");
        Ok(CycleOutcome::EngineRestarted)
    }

    fn abandon(&mut self) {
        self.state = LoopState::Idle;
        self.turn.set_playing(false);
        self.status.set_playing(false);
    }
}

impl<S, A, E> GameLoop<S, A, E>
where
    S: BoardSource + Send + 'static,
    A: ActionSink + Send + 'static,
    E: MoveSearch + Send + 'static,
{
    /// Move the loop onto a named worker thread.
    pub fn spawn(mut self) -> io::Result<LoopJob> {
        let controls = self.controls.clone();
        let handle = thread::Builder::new()
            .name("game-loop".to_string())
            .spawn(move || {
                if let Err(err) = self.run() {
                    log::error!("game loop terminated: {err}");
                }
            })?;
        Ok(LoopJob { controls, handle })
    }
}

/// Handle to a loop running on its worker thread.
pub struct LoopJob {
    controls: Controls,
    handle: JoinHandle<()>,
}

impl LoopJob {
    /// Controls handle shared with the running loop
    #[must_use]
    pub fn controls(&self) -> Controls {
        self.controls.clone()
    }

    /// Ask the loop to stop and wait for the thread to finish.
    pub fn stop_and_wait(self) {
        self.controls.stop();
        if self.handle.join().is_err() {
            log::error!("game loop thread panicked");
        }
    }
}
