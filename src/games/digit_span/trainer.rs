//! The round state machine.
//!
//! One [`Trainer`] owns a whole session: the live round, the difficulty, and
//! the result log. Its only mutators are [`Trainer::start_session`],
//! [`Trainer::restart`], [`Trainer::submit_partial_input`] and
//! [`Trainer::on_tick`].
//!
//! ```text
//! Idle ──start/restart──▶ Revealing ──elapsed > 0──▶ Recalling
//!                             ▲                          │
//!                             └──── input complete ──────┘
//! ```

use super::difficulty::DifficultyController;
use super::generator::NumberSource;
use super::invariants::assert_invariants;
use super::results::{ResultLog, SessionStats};
use super::timer::{Phase, RoundTimer, Tick, TickScheduler};
use super::{DigitCount, RoundId, RoundResult, SpanNumber};
use crate::TrainerConfig;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, instrument, trace};

/// Coarse state of the trainer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum TrainerState {
    /// No round armed yet.
    Idle,
    /// Target visible, input ignored.
    Revealing,
    /// Target hidden, input scored.
    Recalling,
}

impl From<Phase> for TrainerState {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Reveal => TrainerState::Revealing,
            Phase::Recall => TrainerState::Recalling,
        }
    }
}

/// What happened to a piece of recall input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Dropped: no round, still revealing, not a number, or too long.
    Ignored,
    /// Retained; more digits are needed.
    Pending,
    /// The round was scored and the next round armed.
    Scored(RoundResult),
}

/// What happened to a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to no live round and was dropped.
    Stale,
    /// The live round's clock advanced.
    Advanced {
        /// Phase after the tick.
        phase: Phase,
        /// True only for the tick that crossed from reveal into recall.
        entered_recall: bool,
    },
}

/// Snapshot for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct DisplayState {
    /// Coarse state.
    state: TrainerState,
    /// Target while revealing, `?` placeholders while recalling.
    visible_value: String,
    /// Signed elapsed milliseconds of the live round.
    elapsed_ms: i64,
    /// Digit count of the live round.
    digits: DigitCount,
}

/// Placeholder drawn for each hidden digit.
pub const HIDDEN_DIGIT: char = '?';

#[derive(Debug, Clone)]
struct Round {
    id: RoundId,
    digits: DigitCount,
    target: SpanNumber,
    timer: RoundTimer,
    input: String,
}

/// A digit-span training session.
///
/// `N` supplies targets and `S` delivers ticks; both are seams for tests.
#[derive(Debug)]
pub struct Trainer<N, S> {
    numbers: N,
    scheduler: S,
    cadence: Duration,
    difficulty: DifficultyController,
    last_round_id: RoundId,
    round: Option<Round>,
    log: ResultLog,
}

impl<N: NumberSource, S: TickScheduler> Trainer<N, S> {
    /// Creates an idle trainer.
    #[instrument(skip(numbers, scheduler))]
    pub fn new(numbers: N, scheduler: S, starting: DigitCount, cadence: Duration) -> Self {
        info!("Creating trainer");
        Self {
            numbers,
            scheduler,
            cadence,
            difficulty: DifficultyController::new(starting),
            last_round_id: RoundId::default(),
            round: None,
            log: ResultLog::new(),
        }
    }

    /// Creates an idle trainer from configuration.
    pub fn from_config(numbers: N, scheduler: S, config: &TrainerConfig) -> Self {
        Self::new(numbers, scheduler, config.starting(), config.cadence())
    }

    /// Starts a session: fresh result log, starting difficulty, first round.
    #[instrument(skip(self))]
    pub fn start_session(&mut self) {
        info!(starting = %self.difficulty.starting(), "Starting session");
        self.difficulty.reset();
        self.log = ResultLog::new();
        self.begin_round(*self.difficulty.current());
    }

    /// Abandons the live round and arms a fresh one at the same difficulty.
    #[instrument(skip(self))]
    pub fn restart(&mut self) {
        let digits = *self.difficulty.current();
        info!(%digits, "Restarting round");
        self.begin_round(digits);
    }

    /// Handles the full current content of the recall field.
    ///
    /// Call on every change. Input is ignored while idle or revealing, and
    /// when it is not a plain digit string or is longer than the target.
    /// Otherwise it is retained and scored once its length reaches the digit
    /// count.
    #[instrument(skip(self))]
    pub fn submit_partial_input(&mut self, text: &str) -> SubmitOutcome {
        let Some(round) = self.round.as_mut() else {
            trace!("Input with no live round");
            return SubmitOutcome::Ignored;
        };
        if round.timer.phase() == Phase::Reveal {
            trace!("Input during reveal discarded");
            return SubmitOutcome::Ignored;
        }
        if text.is_empty() {
            round.input.clear();
            return SubmitOutcome::Pending;
        }
        let guessed: SpanNumber = match text.parse() {
            Ok(number) => number,
            Err(e) => {
                debug!(error = %e, "Non-numeric input ignored");
                return SubmitOutcome::Ignored;
            }
        };
        if guessed.len() > round.digits.len() {
            debug!(len = guessed.len(), digits = %round.digits, "Input longer than target ignored");
            return SubmitOutcome::Ignored;
        }

        round.input = text.to_string();
        if guessed.len() < round.digits.len() {
            return SubmitOutcome::Pending;
        }
        match self.round.take() {
            Some(round) => SubmitOutcome::Scored(self.score(round, guessed.normalized())),
            None => SubmitOutcome::Ignored,
        }
    }

    /// Advances the live round's clock.
    #[instrument(skip(self), level = "trace")]
    pub fn on_tick(&mut self, tick: Tick) -> TickOutcome {
        let Some(round) = self.round.as_mut() else {
            return TickOutcome::Stale;
        };
        let before = round.timer.phase();
        if !round.timer.tick(tick) {
            return TickOutcome::Stale;
        }
        let phase = round.timer.phase();
        let entered_recall = before == Phase::Reveal && phase == Phase::Recall;
        if entered_recall {
            info!(round = %round.id, digits = %round.digits, "Target hidden, recall started");
        }
        TickOutcome::Advanced {
            phase,
            entered_recall,
        }
    }

    /// Scores the live round and arms the next one.
    fn score(&mut self, mut round: Round, guessed: SpanNumber) -> RoundResult {
        // Capture elapsed before cancelling so a late tick cannot change it.
        let duration_ms = round.timer.elapsed_ms();
        round.timer.cancel();
        self.scheduler.cancel();

        let success = round.target.numerically_eq(&guessed);
        let result = RoundResult::new(round.digits, round.target, guessed, success, duration_ms);
        info!(
            round = %round.id,
            digits = %round.digits,
            success,
            duration_ms,
            "Round scored"
        );
        self.log.append(result.clone());
        assert_invariants(&self.log);

        let next = self.difficulty.advance(success);
        self.begin_round(next);
        result
    }

    /// Cancels whatever is running and arms a new round at `digits`.
    fn begin_round(&mut self, digits: DigitCount) {
        self.scheduler.cancel();
        if let Some(mut old) = self.round.take() {
            old.timer.cancel();
        }

        let id = self.last_round_id.next();
        self.last_round_id = id;
        let target = self.numbers.generate(digits.get());
        let timer = RoundTimer::arm(id, digits, self.cadence);
        self.scheduler.arm(id, self.cadence);
        debug!(round = %id, %digits, elapsed_ms = timer.elapsed_ms(), "Round armed");

        self.round = Some(Round {
            id,
            digits,
            target,
            timer,
            input: String::new(),
        });
    }

    /// Coarse state, derived from the live round's clock.
    pub fn state(&self) -> TrainerState {
        match &self.round {
            None => TrainerState::Idle,
            Some(round) => round.timer.phase().into(),
        }
    }

    /// What the presentation layer should show right now.
    pub fn display_state(&self) -> DisplayState {
        let state = self.state();
        let digits = *self.difficulty.current();
        let (visible_value, elapsed_ms) = match &self.round {
            None => (String::new(), 0),
            Some(round) => {
                let visible = match state {
                    TrainerState::Revealing => round.target.to_string(),
                    _ => HIDDEN_DIGIT.to_string().repeat(round.digits.len()),
                };
                (visible, round.timer.elapsed_ms())
            }
        };
        DisplayState {
            state,
            visible_value,
            elapsed_ms,
            digits,
        }
    }

    /// Recall input retained for the live round.
    pub fn input(&self) -> &str {
        self.round.as_ref().map(|r| r.input.as_str()).unwrap_or("")
    }

    /// Difficulty of the live or next round.
    pub fn digit_count(&self) -> DigitCount {
        *self.difficulty.current()
    }

    /// Id of the live round.
    pub fn current_round(&self) -> Option<RoundId> {
        self.round.as_ref().map(|r| r.id)
    }

    /// Most recent result.
    pub fn last_result(&self) -> Option<&RoundResult> {
        self.log.last()
    }

    /// Every result of the session, oldest first.
    pub fn all_results(&self) -> &[RoundResult] {
        self.log.all()
    }

    /// The session's result log.
    pub fn log(&self) -> &ResultLog {
        &self.log
    }

    /// Aggregate statistics for the session so far.
    pub fn stats(&self) -> SessionStats {
        SessionStats::from_log(&self.log)
    }

    /// The tick scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }
}
