use std::io::{self, Stdout};
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

const WINDOW_TITLE: &str = "snake-sim";

/// Terminal the game draws into.
pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Holds the screen in game mode (raw input, alternate screen, hidden cursor)
/// until dropped.
#[derive(Debug)]
pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    /// Switches the screen to game mode. A panic anywhere after this call
    /// puts the screen back before the message is printed.
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        screen_on().inspect_err(|_| screen_off())?;

        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))
            .inspect_err(|_| screen_off())?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        screen_off();
    }
}

fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        screen_off();
        previous(info);
    }));
}

fn screen_on() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, Hide, SetTitle(WINDOW_TITLE))
}

/// Best effort: every step runs even when an earlier one fails.
fn screen_off() {
    let _ = terminal::disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
}
