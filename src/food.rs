use rand::Rng;

use crate::config::MAX_REJECTION_ATTEMPTS;
use crate::grid::{GridSize, Position};
use crate::snake::Snake;

/// Picks a cell for new food that the snake does not occupy.
///
/// Draws uniformly random cells and rejects the ones on the snake. After
/// [`MAX_REJECTION_ATTEMPTS`] misses it picks uniformly among the free cells
/// instead, so a nearly full board still resolves in bounded time.
///
/// # Panics
///
/// Panics when the snake covers every cell of the grid.
#[must_use]
pub fn spawn<R: Rng + ?Sized>(snake: &Snake, grid: GridSize, rng: &mut R) -> Position {
    assert!(
        snake.len() < grid.total_cells(),
        "food::spawn: no free cells on the board ({side}×{side})",
        side = grid.side,
    );

    let side = i32::from(grid.side);
    for _ in 0..MAX_REJECTION_ATTEMPTS {
        let candidate = Position::new(rng.gen_range(0..side), rng.gen_range(0..side));
        if !snake.occupies(candidate) {
            return candidate;
        }
    }

    log::debug!(
        "food spawn fell back to free-cell scan (snake length {})",
        snake.len()
    );
    spawn_from_free_cells(snake, grid, rng)
}

fn spawn_from_free_cells<R: Rng + ?Sized>(snake: &Snake, grid: GridSize, rng: &mut R) -> Position {
    let side = i32::from(grid.side);
    let candidates: Vec<Position> = (0..side)
        .flat_map(|y| (0..side).map(move |x| Position::new(x, y)))
        .filter(|position| !snake.occupies(*position))
        .collect();

    let index = rng.gen_range(0..candidates.len());
    candidates[index]
}
