use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::game::Snapshot;
use crate::speed;

const SEPARATOR: &str = " │ ";

/// Values shown in the HUD that do not live in the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub high_score: u32,
    pub sound_on: bool,
}

/// Renders the one-line HUD and returns the remaining area below it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, info: HudInfo) -> Rect {
    let [hud_area, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(snapshot, info, usize::from(hud_area.width)))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        hud_area,
    );

    play_area
}

fn info_line(snapshot: &Snapshot, info: HudInfo, available_width: usize) -> Line<'static> {
    let length = snapshot.snake.len();
    let rate = speed::ticks_per_second(length);
    let high_score = info.high_score.max(snapshot.score);
    let compact = full_width(length, rate, snapshot.score, high_score) > available_width;

    let label = |full: &'static str, short: &'static str| if compact { short } else { full };
    let value_style = Style::default().fg(Color::White);
    let score_style = if snapshot.score > info.high_score {
        value_style.add_modifier(Modifier::BOLD)
    } else {
        value_style
    };
    let sound = if info.sound_on { "♪" } else { "×" };

    Line::from(vec![
        Span::raw(format!("{}: ", label("Score", "S"))),
        Span::styled(snapshot.score.to_string(), score_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", label("Length", "L"))),
        Span::styled(length.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", label("Speed", "V"))),
        Span::styled(format!("{rate}/s"), value_style),
        Span::raw(SEPARATOR),
        Span::raw(format!("{}: ", label("Hi", "H"))),
        Span::styled(high_score.to_string(), value_style),
        Span::raw(SEPARATOR),
        Span::raw(sound),
    ])
}

fn full_width(length: usize, rate: u32, score: u32, high_score: u32) -> usize {
    let separators = 4 * SEPARATOR.chars().count();
    format!("Score: {score}").len()
        + format!("Length: {length}").len()
        + format!("Speed: {rate}/s").len()
        + format!("Hi: {high_score}").len()
        + separators
        + 1
}
