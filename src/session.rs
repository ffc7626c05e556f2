//! Command handling and tick driving for one player.
//!
//! The session is the only owner of the [`GameState`] between ticks. It turns
//! commands and timer ticks into state changes and reports everything the
//! outside world needs to know as [`SessionEvent`]s.

use std::mem;

use rand::Rng;
use rand::rngs::StdRng;

use crate::game::{self, GameState, GameStatus, Outcome, Snapshot};
use crate::grid::GridSize;
use crate::input::{Command, Direction};
use crate::scheduler::Scheduler;
use crate::score::ScoreRecord;
use crate::speed;

/// Sound cues for the audio sink.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AudioCue {
    GameStarted,
    FoodEaten,
    GameOver,
}

/// Everything a session reports to its collaborators.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum SessionEvent {
    /// A committed tick or status change to draw.
    Render(Snapshot),
    Audio(AudioCue),
    /// Final score of a game that just ended, for the leaderboard.
    GameOver(ScoreRecord),
    ToggleSound,
}

/// Game session state machine.
///
/// `Idle -> Running <-> Paused`, `Running -> GameOver`, `GameOver -> Running`.
#[derive(Debug)]
pub struct Session<S, R = StdRng> {
    state: GameState,
    pending_direction: Option<Direction>,
    scheduler: S,
    rng: R,
}

impl<S: Scheduler, R: Rng> Session<S, R> {
    /// Creates an idle session on `grid`.
    pub fn new(grid: GridSize, scheduler: S, rng: R) -> Self {
        Self {
            state: GameState::new(grid),
            pending_direction: None,
            scheduler,
            rng,
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Returns the direction request waiting for the next tick.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Applies one command and returns the resulting events.
    pub fn handle(&mut self, command: Command) -> Vec<SessionEvent> {
        match command {
            Command::Start => self.start(),
            Command::PauseResume => match self.state.status {
                GameStatus::Running => self.pause(),
                GameStatus::Paused => self.resume(),
                GameStatus::Idle | GameStatus::GameOver => Vec::new(),
            },
            Command::SetDirection(direction) => match self.state.status {
                GameStatus::Idle | GameStatus::GameOver => self.start(),
                GameStatus::Paused => {
                    let events = self.resume();
                    self.pending_direction = Some(direction);
                    events
                }
                GameStatus::Running => {
                    self.pending_direction = Some(direction);
                    Vec::new()
                }
            },
            Command::ToggleSound => vec![SessionEvent::ToggleSound],
        }
    }

    /// Runs one simulation step. Call when the scheduler fires.
    ///
    /// A tick that arrives while the game is not running is dropped.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        if self.state.status != GameStatus::Running {
            log::debug!("dropping tick while {:?}", self.state.status);
            return Vec::new();
        }

        let requested = self.pending_direction.take();
        let grid = self.state.grid();
        let state = mem::replace(&mut self.state, GameState::new(grid));
        let (state, outcome) = game::step(state, requested, &mut self.rng);
        self.state = state;

        let mut events = Vec::with_capacity(3);
        match outcome {
            Outcome::Continue => {
                self.arm_timer();
            }
            Outcome::Grew => {
                events.push(SessionEvent::Audio(AudioCue::FoodEaten));
                self.arm_timer();
            }
            Outcome::GameOver(reason) => {
                self.scheduler.cancel();
                log::info!(
                    "game over ({reason:?}) with score {}",
                    self.state.score
                );
                events.push(SessionEvent::Audio(AudioCue::GameOver));
                events.push(SessionEvent::GameOver(ScoreRecord::now(self.state.score)));
            }
        }
        events.push(SessionEvent::Render(self.state.snapshot()));
        events
    }

    fn start(&mut self) -> Vec<SessionEvent> {
        if !self.between_games() {
            return Vec::new();
        }

        self.scheduler.cancel();
        self.state = GameState::start(self.state.grid(), &mut self.rng);
        self.pending_direction = None;
        self.arm_timer();
        log::info!("game started on a {0}x{0} grid", self.state.grid().side);

        vec![
            SessionEvent::Audio(AudioCue::GameStarted),
            SessionEvent::Render(self.state.snapshot()),
        ]
    }

    fn pause(&mut self) -> Vec<SessionEvent> {
        self.scheduler.cancel();
        self.state.status = GameStatus::Paused;
        log::info!("paused");
        vec![SessionEvent::Render(self.state.snapshot())]
    }

    fn resume(&mut self) -> Vec<SessionEvent> {
        self.state.status = GameStatus::Running;
        self.arm_timer();
        log::info!("resumed");
        vec![SessionEvent::Render(self.state.snapshot())]
    }

    fn arm_timer(&mut self) {
        if !self.scheduler.is_pending() {
            self.scheduler
                .schedule_tick(speed::tick_interval(self.state.snake.len()));
        }
    }

    fn between_games(&self) -> bool {
        matches!(self.state.status, GameStatus::Idle | GameStatus::GameOver)
    }
}
