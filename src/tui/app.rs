//! Application state and logic.

use crossterm::event::KeyEvent;
use tracing::debug;

use super::input::{map_key, KeyAction};
use crate::{NumberSource, SubmitOutcome, Tick, TickOutcome, TickScheduler, Trainer};

/// Main application state.
pub struct App<N, S> {
    trainer: Trainer<N, S>,
    input_focused: bool,
    should_quit: bool,
}

impl<N: NumberSource, S: TickScheduler> App<N, S> {
    /// Creates a new application around an idle trainer.
    pub fn new(trainer: Trainer<N, S>) -> Self {
        Self {
            trainer,
            input_focused: false,
            should_quit: false,
        }
    }

    /// Starts the session.
    pub fn start(&mut self) {
        self.trainer.start_session();
        self.input_focused = false;
    }

    /// Gets the trainer.
    pub fn trainer(&self) -> &Trainer<N, S> {
        &self.trainer
    }

    /// Whether the recall field has focus.
    pub fn input_focused(&self) -> bool {
        self.input_focused
    }

    /// Whether the user asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Forwards a clock tick; focuses the recall field when recall starts.
    pub fn on_tick(&mut self, tick: Tick) {
        if let TickOutcome::Advanced {
            entered_recall: true,
            ..
        } = self.trainer.on_tick(tick)
        {
            debug!("Focusing recall field");
            self.input_focused = true;
        }
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match map_key(key) {
            KeyAction::Digit(c) => {
                let mut text = self.trainer.input().to_string();
                text.push(c);
                self.submit(&text);
            }
            KeyAction::Backspace => {
                let mut text = self.trainer.input().to_string();
                if text.pop().is_some() {
                    self.submit(&text);
                }
            }
            KeyAction::Restart => {
                self.trainer.restart();
                self.input_focused = false;
            }
            KeyAction::Quit => {
                debug!("Quit requested");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn submit(&mut self, text: &str) {
        if let SubmitOutcome::Scored(result) = self.trainer.submit_partial_input(text) {
            debug!(success = *result.success(), "Round finished, next round revealing");
            self.input_focused = false;
        }
    }
}
