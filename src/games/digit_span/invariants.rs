//! First-class invariants over a session's result log.
//!
//! Checked after every scored round in debug builds and testable on their own.

use super::difficulty::next_digit_count;
use super::{DigitCount, ResultLog};
use tracing::{instrument, warn};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Returns every violated invariant, or `Ok(())` if all hold.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if !I3::holds(state) {
            violations.push(InvariantViolation::new(I3::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// No round is ever played below the digit floor.
pub struct DigitFloorInvariant;

impl Invariant<ResultLog> for DigitFloorInvariant {
    fn holds(log: &ResultLog) -> bool {
        log.iter().all(|r| r.digit_count().get() >= DigitCount::MIN)
    }

    fn description() -> &'static str {
        "Every round is played with at least two digits"
    }
}

/// Each round's difficulty follows from the previous round's outcome.
pub struct DifficultyChainInvariant;

impl Invariant<ResultLog> for DifficultyChainInvariant {
    fn holds(log: &ResultLog) -> bool {
        log.all().windows(2).all(|pair| {
            *pair[1].digit_count() == next_digit_count(*pair[0].digit_count(), *pair[0].success())
        })
    }

    fn description() -> &'static str {
        "Digit count escalates after success and de-escalates after failure"
    }
}

/// Rounds are only scored during recall, so every duration is positive.
pub struct ScoredInRecallInvariant;

impl Invariant<ResultLog> for ScoredInRecallInvariant {
    fn holds(log: &ResultLog) -> bool {
        log.iter().all(|r| *r.duration_ms() > 0)
    }

    fn description() -> &'static str {
        "Rounds are scored only after the reveal phase ends"
    }
}

/// All result-log invariants.
pub type SessionInvariants = (
    DigitFloorInvariant,
    DifficultyChainInvariant,
    ScoredInRecallInvariant,
);

/// Logs and debug-asserts every result-log invariant.
#[instrument(skip(log), fields(rounds = log.len()))]
pub fn assert_invariants(log: &ResultLog) {
    if let Err(violations) = SessionInvariants::check_all(log) {
        for violation in &violations {
            warn!(description = %violation.description, "Invariant violated");
        }
        debug_assert!(violations.is_empty(), "Result log invariants violated");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::digit_span::{RoundResult, SpanNumber};

    fn result(digits: u32, success: bool, duration_ms: i64) -> RoundResult {
        RoundResult::new(
            DigitCount::new(digits),
            SpanNumber::from(1),
            SpanNumber::from(if success { 1 } else { 2 }),
            success,
            duration_ms,
        )
    }

    #[test]
    fn test_valid_chain_holds() {
        let mut log = ResultLog::new();
        log.append(result(3, true, 500));
        log.append(result(4, false, 700));
        log.append(result(3, false, 300));
        log.append(result(2, false, 300));
        log.append(result(2, true, 300));
        assert!(SessionInvariants::check_all(&log).is_ok());
    }

    #[test]
    fn test_broken_chain_detected() {
        let mut log = ResultLog::new();
        log.append(result(3, true, 500));
        log.append(result(3, true, 500));
        assert!(!DifficultyChainInvariant::holds(&log));
    }

    #[test]
    fn test_reveal_phase_scoring_detected() {
        let mut log = ResultLog::new();
        log.append(result(3, true, 0));
        let violations = SessionInvariants::check_all(&log).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].description,
            ScoredInRecallInvariant::description()
        );
    }
}
