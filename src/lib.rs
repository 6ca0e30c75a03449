//! Strictly Digits library - an adaptive digit-span memory trainer
//!
//! A number is shown for a time budget that grows with its length, then
//! hidden; the player retypes it from memory. Each correct recall adds a
//! digit, each mistake removes one (never below two).
//!
//! # Architecture
//!
//! - **Trainer**: the round state machine (reveal, recall, score, next round)
//! - **Timer**: signed round clock and cancelable tick scheduling
//! - **Difficulty**: digit-count escalation and de-escalation
//! - **Results**: append-only result log and session statistics
//! - **Diff**: positional mismatch marks for feedback
//! - **TUI**: ratatui front end driving the trainer
//!
//! # Example
//!
//! ```
//! use strictly_digits::{
//!     DigitCount, ManualScheduler, ScriptedNumbers, SpanNumber, SubmitOutcome, Trainer,
//!     TrainerState, DEFAULT_TICK,
//! };
//!
//! let mut trainer = Trainer::new(
//!     ScriptedNumbers::new([SpanNumber::from(427)]),
//!     ManualScheduler::new(),
//!     DigitCount::default(),
//!     DEFAULT_TICK,
//! );
//! trainer.start_session();
//! while trainer.state() != TrainerState::Recalling {
//!     let tick = trainer.scheduler().next_tick().unwrap();
//!     trainer.on_tick(tick);
//! }
//! assert!(matches!(trainer.submit_partial_input("427"), SubmitOutcome::Scored(_)));
//! assert_eq!(trainer.digit_count().get(), 4);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod tui;

// Crate-level exports - Configuration
pub use config::{ConfigError, TrainerConfig};

// Crate-level exports - Terminal UI
pub use tui::{map_key, run_tui, App, KeyAction};

// Crate-level exports - Digit-span game
pub use games::digit_span::{
    assert_invariants, diff, mark, mismatch_mask, next_digit_count, reveal_budget_ms,
    DifficultyChainInvariant, DifficultyController, DiffRendering, DigitCount,
    DigitFloorInvariant, DisplayState, Invariant, InvariantSet, InvariantViolation,
    ManualScheduler, MarkedChar, NumberSource, ParseNumberError, Phase, RandomNumberGenerator,
    ResultLog, RoundId, RoundResult, RoundTimer, ScoredInRecallInvariant, ScriptedNumbers,
    SessionInvariants, SessionStats, SpanNumber, SubmitOutcome, Tick, TickOutcome,
    TickScheduler, TokioTicker, Trainer, TrainerState, DEFAULT_TICK, HIDDEN_DIGIT,
};
