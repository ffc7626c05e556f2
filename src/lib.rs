//! Grid snake simulation.
//!
//! The core is pure: [`game::step`] moves a [`game::GameState`] forward by one
//! tick and [`session::Session`] wraps it in the start/pause/game-over state
//! machine. Rendering, sound and score storage sit behind the events the
//! session emits.

pub mod app;
pub mod audio;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod speed;
pub mod terminal_runtime;
pub mod ui;
