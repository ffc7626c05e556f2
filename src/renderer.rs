use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Block;

use crate::config::{
    BORDER_HALF_BLOCK, CELL_WIDTH, GLYPH_FOOD, GLYPH_SNAKE_BODY, GLYPH_SNAKE_HEAD, Palette,
    palette_for_score,
};
use crate::game::{GameStatus, Snapshot};
use crate::grid::{GridSize, Position};
use crate::score::Leaderboard;
use crate::ui::hud::{HudInfo, render_hud};
use crate::ui::menu::{render_game_over_menu, render_help, render_pause_menu, render_start_menu};

/// Everything one frame is drawn from.
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub snapshot: &'a Snapshot,
    pub leaderboard: &'a Leaderboard,
    pub sound_on: bool,
    pub show_help: bool,
    /// Current Unix time in seconds, for leaderboard ages.
    pub now: u64,
}

/// Renders the full frame from an immutable snapshot.
pub fn render(frame: &mut Frame<'_>, view: View<'_>) {
    let snapshot = view.snapshot;
    let area = frame.area();
    let below_hud = render_hud(
        frame,
        area,
        snapshot,
        HudInfo {
            high_score: view.leaderboard.high_score(),
            sound_on: view.sound_on,
        },
    );

    let palette = palette_for_score(snapshot.score);
    let play_area = board_area(below_hud, snapshot.grid);
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(palette.border_fg).bg(palette.play_bg))
        .style(Style::new().bg(palette.play_bg));

    let inner = block.inner(play_area);
    frame.render_widget(block, play_area);

    render_food(frame, inner, snapshot, palette);
    render_snake(frame, inner, snapshot, palette);

    if view.show_help {
        render_help(frame, play_area);
        return;
    }

    match snapshot.status {
        GameStatus::Idle => render_start_menu(frame, play_area, view.leaderboard, view.now),
        GameStatus::Paused => render_pause_menu(frame, play_area),
        GameStatus::GameOver => render_game_over_menu(
            frame,
            play_area,
            snapshot.score,
            snapshot.death_reason,
            view.leaderboard,
            view.now,
        ),
        GameStatus::Running => {}
    }
}

/// Centers a bordered board of `grid` cells inside `area`.
fn board_area(area: Rect, grid: GridSize) -> Rect {
    let width = grid.side.saturating_mul(CELL_WIDTH).saturating_add(2);
    let height = grid.side.saturating_add(2);

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(column);
    board
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, palette: Palette) {
    let Some(food) = snapshot.food else {
        return;
    };
    let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(palette.food).bg(palette.play_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, palette: Palette) {
    let buffer = frame.buffer_mut();
    for (index, segment) in snapshot.snake.iter().enumerate() {
        let Some((x, y)) = logical_to_terminal(inner, snapshot.grid, *segment) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(palette.snake_head)
                    .bg(palette.play_bg)
                    .add_modifier(Modifier::BOLD),
            );
        } else {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_BODY,
                Style::new().fg(palette.snake).bg(palette.play_bg),
            );
        }
    }
}

fn logical_to_terminal(inner: Rect, grid: GridSize, position: Position) -> Option<(u16, u16)> {
    if !grid.in_bounds(position) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_WIDTH)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_WIDTH) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use super::{View, board_area, logical_to_terminal, render};
    use crate::config::GLYPH_SNAKE_HEAD;
    use crate::game::GameState;
    use crate::grid::{GridSize, Position};
    use crate::score::Leaderboard;

    #[test]
    fn cells_map_two_columns_wide() {
        let inner = Rect::new(1, 2, 40, 20);
        let grid = GridSize::new(20);

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(0, 0)),
            Some((1, 2))
        );
        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(3, 4)),
            Some((7, 6))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(20, 0)), None);
        assert_eq!(logical_to_terminal(inner, grid, Position::new(-1, 0)), None);
    }

    #[test]
    fn clipped_board_drops_cells_outside_area() {
        let inner = Rect::new(0, 0, 10, 5);

        assert_eq!(
            logical_to_terminal(inner, GridSize::new(20), Position::new(5, 0)),
            None
        );
    }

    #[test]
    fn board_is_centered() {
        let board = board_area(Rect::new(0, 0, 100, 40), GridSize::new(20));

        assert_eq!(board.width, 42);
        assert_eq!(board.height, 22);
        assert_eq!(board.x, 29);
        assert_eq!(board.y, 9);
    }

    fn draw_to_text(snapshot: &crate::game::Snapshot) -> String {
        let backend = TestBackend::new(80, 30);
        let mut terminal = Terminal::new(backend).expect("test terminal should build");
        let leaderboard = Leaderboard::new();

        terminal
            .draw(|frame| {
                render(
                    frame,
                    View {
                        snapshot,
                        leaderboard: &leaderboard,
                        sound_on: true,
                        show_help: false,
                        now: 0,
                    },
                );
            })
            .expect("draw should succeed");

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn idle_frame_shows_start_menu() {
        let text = draw_to_text(&GameState::new(GridSize::new(20)).snapshot());

        assert!(text.contains("SNAKE"));
        assert!(text.contains("No scores yet"));
    }

    #[test]
    fn running_frame_draws_snake_without_overlay() {
        let mut rng = StdRng::seed_from_u64(2);
        let text = draw_to_text(&GameState::start(GridSize::new(20), &mut rng).snapshot());

        assert!(text.contains(GLYPH_SNAKE_HEAD));
        assert!(text.contains("Score: 0"));
        assert!(!text.contains("SNAKE"));
    }
}
