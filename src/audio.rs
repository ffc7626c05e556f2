use std::io::{self, Write};

use crate::session::AudioCue;

/// Consumer of sound cues. Owns the mute switch.
pub trait AudioSink {
    /// Plays `cue` unless muted. Failures are the sink's own business.
    fn play(&mut self, cue: AudioCue);

    /// Flips the mute switch and returns whether sound is now on.
    fn toggle(&mut self) -> bool;

    fn is_sound_on(&self) -> bool;
}

/// Rings the terminal bell for each cue.
///
/// Terminals only have one sound, so the cues differ in the number of rings.
#[derive(Debug)]
pub struct TerminalBell<W = io::Stdout> {
    out: W,
    sound_on: bool,
}

impl TerminalBell {
    #[must_use]
    pub fn stdout(sound_on: bool) -> Self {
        Self::new(io::stdout(), sound_on)
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W, sound_on: bool) -> Self {
        Self { out, sound_on }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

fn rings_for(cue: AudioCue) -> usize {
    match cue {
        AudioCue::FoodEaten => 1,
        AudioCue::GameStarted => 2,
        AudioCue::GameOver => 3,
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: AudioCue) {
        if !self.sound_on {
            return;
        }
        if let Err(error) = self.ring(rings_for(cue)) {
            log::warn!("failed to play {cue:?}: {error}");
        }
    }

    fn toggle(&mut self) -> bool {
        self.sound_on = !self.sound_on;
        log::info!("sound {}", if self.sound_on { "on" } else { "off" });
        self.sound_on
    }

    fn is_sound_on(&self) -> bool {
        self.sound_on
    }
}
