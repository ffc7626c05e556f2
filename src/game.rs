use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::food;
use crate::grid::{GridSize, Position};
use crate::input::{Direction, propose};
use crate::snake::Snake;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    GameOver,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum DeathReason {
    Wall,
    SelfCollision,
    /// The snake grew onto the last free cell.
    BoardFull,
}

/// Result of one simulation step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Outcome {
    Continue,
    Grew,
    GameOver(DeathReason),
}

/// Complete simulation state for one game.
///
/// Ownership moves into [`step`] and back out with the result, so nothing else
/// can observe a half-applied tick.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub direction: Option<Direction>,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    grid: GridSize,
}

impl GameState {
    /// Creates an idle state: one segment on the start cell, no heading, no food.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self {
            snake: Snake::new(grid.start_cell()),
            food: None,
            direction: None,
            score: 0,
            status: GameStatus::Idle,
            death_reason: None,
            grid,
        }
    }

    /// Creates a running state heading right with food already placed.
    #[must_use]
    pub fn start<R: Rng + ?Sized>(grid: GridSize, rng: &mut R) -> Self {
        let mut state = Self::new(grid);
        state.food = Some(food::spawn(&state.snake, grid, rng));
        state.direction = Some(Direction::Right);
        state.status = GameStatus::Running;
        state
    }

    /// Builds a running state from explicit parts, for replays and tests.
    #[must_use]
    pub fn with_parts(
        grid: GridSize,
        snake: Snake,
        food: Option<Position>,
        direction: Direction,
    ) -> Self {
        Self {
            snake,
            food,
            direction: Some(direction),
            score: 0,
            status: GameStatus::Running,
            death_reason: None,
            grid,
        }
    }

    /// Returns the grid this state lives on.
    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns a read-only copy for render and persistence consumers.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.to_vec(),
            food: self.food,
            direction: self.direction,
            score: self.score,
            status: self.status,
            death_reason: self.death_reason,
            grid: self.grid,
        }
    }

    fn end(mut self, reason: DeathReason) -> (Self, Outcome) {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        (self, Outcome::GameOver(reason))
    }
}

/// Frozen view of a [`GameState`].
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Snapshot {
    pub snake: Vec<Position>,
    pub food: Option<Position>,
    pub direction: Option<Direction>,
    pub score: u32,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    pub grid: GridSize,
}

impl Snapshot {
    #[must_use]
    pub fn head(&self) -> Option<Position> {
        self.snake.first().copied()
    }
}

/// Advances the simulation by one tick.
///
/// Only a [`GameStatus::Running`] state moves; any other state comes back
/// untouched with [`Outcome::Continue`]. A collision ends the game with the
/// snake, food and score left exactly as they were before the step. Eating
/// the food on the last free cell ends the game with the grown snake and no
/// food.
pub fn step<R: Rng + ?Sized>(
    mut state: GameState,
    requested: Option<Direction>,
    rng: &mut R,
) -> (GameState, Outcome) {
    if state.status != GameStatus::Running {
        return (state, Outcome::Continue);
    }

    let direction = match requested {
        Some(requested) => propose(state.direction, requested),
        None => match state.direction {
            Some(direction) => direction,
            None => return (state, Outcome::Continue),
        },
    };
    state.direction = Some(direction);

    let next_head = state.snake.head().stepped(direction);
    if !state.grid.in_bounds(next_head) {
        log::debug!("head left the grid at {next_head:?}");
        return state.end(DeathReason::Wall);
    }

    let eating = state.food == Some(next_head);
    if state.snake.would_collide(next_head, eating) {
        log::debug!("head ran into the body at {next_head:?}");
        return state.end(DeathReason::SelfCollision);
    }

    state.snake.advance(next_head, eating);
    if !eating {
        return (state, Outcome::Continue);
    }

    state.score += 1;
    if state.snake.len() >= state.grid.total_cells() {
        log::info!("board filled at score {}", state.score);
        state.food = None;
        return state.end(DeathReason::BoardFull);
    }
    state.food = Some(food::spawn(&state.snake, state.grid, rng));
    log::debug!(
        "food eaten, score {} length {}",
        state.score,
        state.snake.len()
    );
    (state, Outcome::Grew)
}
