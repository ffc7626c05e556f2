use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::DeathReason;
use crate::score::Leaderboard;

/// Draws the start screen with the leaderboard.
pub fn render_start_menu(frame: &mut Frame<'_>, area: Rect, leaderboard: &Leaderboard, now: u64) {
    let popup = centered_popup(area, 80, 80);
    frame.render_widget(Clear, popup);

    let [title_row, body_row, footer_row] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(popup);

    frame.render_widget(
        Paragraph::new(Line::from("SNAKE"))
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        title_row,
    );

    let mut body = vec![Line::from("[Space]/arrows Start"), Line::from("")];
    body.extend(score_lines(leaderboard, now));
    frame.render_widget(
        Paragraph::new(body)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" top 10 ")),
        body_row,
    );

    frame.render_widget(
        Paragraph::new(Line::from("[?] Help  [M] Sound  [Q] Quit"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        footer_row,
    );
}

/// Draws the pause screen as a centered popup.
pub fn render_pause_menu(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 60, 30);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("PAUSED"),
        Line::from(""),
        Line::from("[Space]/[P]/arrows Resume"),
        Line::from("[Q] Quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" pause ")),
        popup,
    );
}

/// Draws the game-over screen with the final score and leaderboard.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    leaderboard: &Leaderboard,
    now: u64,
) {
    let popup = centered_popup(area, 80, 90);
    frame.render_widget(Clear, popup);

    let mut lines = vec![
        Line::from("GAME OVER"),
        Line::from(match death_reason {
            Some(DeathReason::Wall) => "Cause: hit wall",
            Some(DeathReason::SelfCollision) => "Cause: hit yourself",
            Some(DeathReason::BoardFull) => "Cause: board full",
            None => "",
        }),
        Line::from(format!("Score: {score}")),
        Line::from(if score > 0 && score >= leaderboard.high_score() {
            "New high score!"
        } else {
            ""
        }),
    ];
    lines.extend(score_lines(leaderboard, now));
    lines.push(Line::from(""));
    lines.push(Line::from("[Space]/arrows Play Again  [Q] Quit"));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

/// Draws the controls overlay.
pub fn render_help(frame: &mut Frame<'_>, area: Rect) {
    let popup = centered_popup(area, 80, 70);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("Eat the food to grow. Every five segments"),
        Line::from("the snake slows down a little."),
        Line::from("Hitting a wall or yourself ends the game."),
        Line::from(""),
        Line::from("Arrows/WASD  steer (also start and resume)"),
        Line::from("Space        start / pause"),
        Line::from("P            pause"),
        Line::from("M            sound on/off"),
        Line::from("? / H        close this help"),
        Line::from("Q / Esc      quit"),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Left)
            .block(Block::bordered().title(" help ")),
        popup,
    );
}

fn score_lines(leaderboard: &Leaderboard, now: u64) -> Vec<Line<'static>> {
    if leaderboard.is_empty() {
        return vec![Line::from("No scores yet. Play a game!")];
    }

    leaderboard
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            Line::from(format!(
                "#{:<2} {:>4} pts  {}",
                index + 1,
                entry.score,
                format_age(now, entry.timestamp)
            ))
        })
        .collect()
}

/// Formats how long ago `timestamp` was, relative to `now` (both Unix seconds).
#[must_use]
pub fn format_age(now: u64, timestamp: u64) -> String {
    let seconds = now.saturating_sub(timestamp);
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    match (days, hours, minutes) {
        (1, _, _) => "yesterday".to_owned(),
        (2.., _, _) => format!("{days} days ago"),
        (_, 1, _) => "1 hour ago".to_owned(),
        (_, 2.., _) => format!("{hours} hours ago"),
        (_, _, 1) => "1 min ago".to_owned(),
        (_, _, 2..) => format!("{minutes} mins ago"),
        _ => "just now".to_owned(),
    }
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
