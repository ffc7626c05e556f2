use crossterm::event::KeyEvent;
use rand::Rng;
use rand::rngs::StdRng;

use crate::audio::AudioSink;
use crate::game::{GameStatus, Snapshot};
use crate::input::{Command, KeyAction, key_action};
use crate::renderer::View;
use crate::scheduler::Scheduler;
use crate::score::ScoreStore;
use crate::session::{Session, SessionEvent};

/// Terminal front end: routes keys into the session and session events out
/// to the render, audio and persistence sinks.
#[derive(Debug)]
pub struct App<S, A, R = StdRng> {
    session: Session<S, R>,
    latest: Snapshot,
    audio: A,
    scores: ScoreStore,
    show_help: bool,
    quitting: bool,
}

impl<S: Scheduler, A: AudioSink, R: Rng> App<S, A, R> {
    pub fn new(session: Session<S, R>, audio: A, scores: ScoreStore) -> Self {
        let latest = session.snapshot();
        Self {
            session,
            latest,
            audio,
            scores,
            show_help: false,
            quitting: false,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Session<S, R> {
        &self.session
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        self.session.scheduler_mut()
    }

    /// Returns the last snapshot handed to the render sink.
    #[must_use]
    pub fn latest(&self) -> &Snapshot {
        &self.latest
    }

    #[must_use]
    pub fn scores(&self) -> &ScoreStore {
        &self.scores
    }

    #[must_use]
    pub fn audio(&self) -> &A {
        &self.audio
    }

    #[must_use]
    pub fn show_help(&self) -> bool {
        self.show_help
    }

    #[must_use]
    pub fn quitting(&self) -> bool {
        self.quitting
    }

    /// Handles one terminal key event.
    pub fn handle_key(&mut self, event: KeyEvent) {
        match key_action(event, self.session.status()) {
            Some(KeyAction::Quit) => self.quitting = true,
            Some(KeyAction::ToggleHelp) => self.toggle_help(),
            Some(KeyAction::Command(command)) => {
                if command != Command::ToggleSound {
                    self.show_help = false;
                }
                self.apply(command);
            }
            None => {}
        }
    }

    /// Applies a device-independent command.
    pub fn apply(&mut self, command: Command) {
        let events = self.session.handle(command);
        self.dispatch(events);
    }

    /// Runs one tick. Call when the scheduler fires.
    pub fn tick(&mut self) {
        let events = self.session.tick();
        self.dispatch(events);
    }

    /// Builds the frame description for the renderer.
    #[must_use]
    pub fn view(&self, now: u64) -> View<'_> {
        View {
            snapshot: &self.latest,
            leaderboard: self.scores.leaderboard(),
            sound_on: self.audio.is_sound_on(),
            show_help: self.show_help,
            now,
        }
    }

    fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help && self.session.status() == GameStatus::Running {
            self.apply(Command::PauseResume);
        }
    }

    fn dispatch(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::Render(snapshot) => self.latest = snapshot,
                SessionEvent::Audio(cue) => self.audio.play(cue),
                SessionEvent::ToggleSound => {
                    let _ = self.audio.toggle();
                }
                SessionEvent::GameOver(record) => match self.scores.submit(record) {
                    Ok(Some(rank)) => log::info!("score {} ranked #{rank}", record.score),
                    Ok(None) => log::debug!("score {} did not place", record.score),
                    Err(error) => log::warn!("failed to save score {}: {error}", record.score),
                },
            }
        }
    }
}
