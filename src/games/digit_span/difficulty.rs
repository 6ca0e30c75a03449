//! Adaptive difficulty: one digit up on success, one down on failure.

use super::DigitCount;
use derive_getters::Getters;
use tracing::{debug, instrument};

/// Computes the digit count for the round after `current`.
///
/// Success always escalates by one with no upper bound. Failure
/// de-escalates by one but never below [`DigitCount::MIN`].
#[instrument]
pub fn next_digit_count(current: DigitCount, success: bool) -> DigitCount {
    if success {
        DigitCount::new(current.get().saturating_add(1))
    } else {
        DigitCount::new(current.get().saturating_sub(1))
    }
}

/// Tracks the live difficulty of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
pub struct DifficultyController {
    /// Digit count of the first round of a session.
    starting: DigitCount,
    /// Digit count of the current or next round.
    current: DigitCount,
}

impl DifficultyController {
    /// Creates a controller that starts sessions at `starting` digits.
    #[instrument]
    pub fn new(starting: DigitCount) -> Self {
        Self {
            starting,
            current: starting,
        }
    }

    /// Returns to the starting difficulty.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.current = self.starting;
    }

    /// Applies a round outcome and returns the new digit count.
    #[instrument(skip(self), fields(current = %self.current))]
    pub fn advance(&mut self, success: bool) -> DigitCount {
        let next = next_digit_count(self.current, success);
        debug!(from = %self.current, to = %next, "Adjusted difficulty");
        self.current = next;
        next
    }
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DigitCount::default())
    }
}
