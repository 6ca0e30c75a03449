mod difficulty;
mod diff;
mod generator;
mod invariants;
mod results;
mod timer;
mod trainer;
mod types;

pub use difficulty::{next_digit_count, DifficultyController};
pub use diff::{diff, mark, mismatch_mask, DiffRendering, MarkedChar};
pub use generator::{NumberSource, RandomNumberGenerator, ScriptedNumbers};
pub use invariants::{
    assert_invariants, DifficultyChainInvariant, DigitFloorInvariant, Invariant, InvariantSet,
    InvariantViolation, ScoredInRecallInvariant, SessionInvariants,
};
pub use results::{ResultLog, SessionStats};
pub use timer::{
    reveal_budget_ms, ManualScheduler, Phase, RoundTimer, Tick, TickScheduler, TokioTicker,
    DEFAULT_TICK,
};
pub use trainer::{DisplayState, SubmitOutcome, TickOutcome, Trainer, TrainerState, HIDDEN_DIGIT};
pub use types::{DigitCount, ParseNumberError, RoundId, RoundResult, SpanNumber};
