use ratatui::style::Color;
use ratatui::symbols::border;

/// Default side length of the square play grid, in cells.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Cell where a fresh snake is placed on grids large enough to hold it.
pub const START_CELL: (i32, i32) = (10, 10);

/// Tick rate of a freshly started snake.
pub const BASE_TICKS_PER_SECOND: u32 = 10;

/// Lowest tick rate the speed rule may reach.
pub const MIN_TICKS_PER_SECOND: u32 = 3;

/// Every this many segments the tick rate drops by one.
pub const LENGTH_DIVISOR: usize = 5;

/// Random draws the food spawner makes before enumerating free cells.
pub const MAX_REJECTION_ATTEMPTS: usize = 64;

/// Number of entries kept on the leaderboard.
pub const MAX_HIGH_SCORES: usize = 10;

/// Score at which the board switches to the special palette.
pub const SPECIAL_PALETTE_SCORE: u32 = 10;

/// Frame pacing of the terminal loop, independent of the tick rate.
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Colors used to draw the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Palette {
    pub snake: Color,
    pub snake_head: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
}

/// Palette used until the score reaches [`SPECIAL_PALETTE_SCORE`].
pub const PALETTE_BASE: Palette = Palette {
    snake: Color::Green,
    snake_head: Color::LightGreen,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
};

/// Palette used from [`SPECIAL_PALETTE_SCORE`] onwards.
pub const PALETTE_SPECIAL: Palette = Palette {
    snake: Color::Magenta,
    snake_head: Color::LightMagenta,
    food: Color::Red,
    play_bg: Color::Rgb(0x33, 0x00, 0x33),
    border_fg: Color::Magenta,
};

/// Returns the palette for the given score.
#[must_use]
pub fn palette_for_score(score: u32) -> Palette {
    if score >= SPECIAL_PALETTE_SCORE {
        PALETTE_SPECIAL
    } else {
        PALETTE_BASE
    }
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Glyph for one snake body cell (two columns wide).
pub const GLYPH_SNAKE_BODY: &str = "██";

/// Glyph for the snake head.
pub const GLYPH_SNAKE_HEAD: &str = "▓▓";

/// Glyph for the food cell.
pub const GLYPH_FOOD: &str = "◖◗";

/// Terminal columns used per grid cell, so cells look roughly square.
pub const CELL_WIDTH: u16 = 2;

#[cfg(test)]
mod tests {
    use super::{PALETTE_BASE, PALETTE_SPECIAL, SPECIAL_PALETTE_SCORE, palette_for_score};

    #[test]
    fn palette_switches_at_threshold() {
        assert_eq!(palette_for_score(0), PALETTE_BASE);
        assert_eq!(palette_for_score(SPECIAL_PALETTE_SCORE - 1), PALETTE_BASE);
        assert_eq!(palette_for_score(SPECIAL_PALETTE_SCORE), PALETTE_SPECIAL);
        assert_eq!(palette_for_score(42), PALETTE_SPECIAL);
    }
}
