//! Minimal terminal runtime: a fixed-rate tick for game frames, redraws when
//! something changed, and crossterm input in between.

pub use self::runner::Tui;

use crossterm::event::Event;
use ratatui::Frame;

mod event_loop;
mod runner;

/// Application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Use this to set the tick rate.
    fn init(&mut self, tui: &mut Tui);

    fn should_exit(&self) -> bool;

    /// Handles key input, resize and other terminal events.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    fn draw(&self, frame: &mut Frame);

    /// Advances the game by one frame.
    fn update(&mut self, tui: &mut Tui);
}
