use serde::{Deserialize, Serialize};

use crate::config::START_CELL;
use crate::input::Direction;

/// Side length of the square play grid.
///
/// Fixed for the lifetime of a session; a different size means a new session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub side: u16,
}

impl GridSize {
    #[must_use]
    pub fn new(side: u16) -> Self {
        Self { side }
    }

    /// Returns true when `position` lies inside the grid.
    #[must_use]
    pub fn in_bounds(self, position: Position) -> bool {
        let side = i32::from(self.side);
        (0..side).contains(&position.x) && (0..side).contains(&position.y)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.side) * usize::from(self.side)
    }

    /// Returns the cell a new snake starts on.
    ///
    /// This is [`START_CELL`] when it fits, else the grid centre.
    #[must_use]
    pub fn start_cell(self) -> Position {
        let start = Position::new(START_CELL.0, START_CELL.1);
        if self.in_bounds(start) {
            start
        } else {
            let centre = i32::from(self.side / 2);
            Position::new(centre, centre)
        }
    }
}

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one cell towards `direction`.
    ///
    /// The result may lie outside the grid.
    #[must_use]
    pub fn stepped(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when `other` shares an edge with this position.
    #[must_use]
    pub fn is_adjacent(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
