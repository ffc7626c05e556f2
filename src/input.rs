use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use serde::{Deserialize, Serialize};

use crate::game::GameStatus;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions, in clockwise order from `Up`.
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit vector `(dx, dy)`; `y` grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Resolves a direction request against the current heading.
///
/// A request that would reverse the snake into its own neck is dropped and
/// `current` is kept. Before the first move (`current == None`) every request
/// is accepted.
#[must_use]
pub fn propose(current: Option<Direction>, requested: Direction) -> Direction {
    match current {
        Some(current) if requested == current.opposite() => current,
        _ => requested,
    }
}

/// Device-independent commands consumed by the session.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Command {
    Start,
    PauseResume,
    SetDirection(Direction),
    ToggleSound,
}

/// What a key press means to the terminal front end.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KeyAction {
    Command(Command),
    ToggleHelp,
    Quit,
}

/// Maps a terminal key event to an action.
///
/// Space is the one status-dependent key: it starts a game from the idle and
/// game-over screens and toggles pause otherwise.
#[must_use]
pub fn key_action(event: KeyEvent, status: GameStatus) -> Option<KeyAction> {
    if event.kind != KeyEventKind::Press {
        return None;
    }

    let action = match (event.modifiers, event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => KeyAction::Quit,
        (_, KeyCode::Esc | KeyCode::Char('q' | 'Q')) => KeyAction::Quit,
        (_, KeyCode::Up | KeyCode::Char('w' | 'W')) => {
            KeyAction::Command(Command::SetDirection(Direction::Up))
        }
        (_, KeyCode::Down | KeyCode::Char('s' | 'S')) => {
            KeyAction::Command(Command::SetDirection(Direction::Down))
        }
        (_, KeyCode::Left | KeyCode::Char('a' | 'A')) => {
            KeyAction::Command(Command::SetDirection(Direction::Left))
        }
        (_, KeyCode::Right | KeyCode::Char('d' | 'D')) => {
            KeyAction::Command(Command::SetDirection(Direction::Right))
        }
        (_, KeyCode::Char(' ') | KeyCode::Enter) => {
            if matches!(status, GameStatus::Idle | GameStatus::GameOver) {
                KeyAction::Command(Command::Start)
            } else {
                KeyAction::Command(Command::PauseResume)
            }
        }
        (_, KeyCode::Char('p' | 'P')) => KeyAction::Command(Command::PauseResume),
        (_, KeyCode::Char('m' | 'M')) => KeyAction::Command(Command::ToggleSound),
        (_, KeyCode::Char('?' | 'h' | 'H')) => KeyAction::ToggleHelp,
        _ => return None,
    };

    Some(action)
}
