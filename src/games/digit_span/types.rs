//! Core domain types for the digit-span trainer.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of decimal digits in a challenge: the difficulty knob.
///
/// Never below [`DigitCount::MIN`]. Smaller values are clamped on
/// construction, so underflow cannot be represented.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display("{}", _0)]
#[serde(from = "u32", into = "u32")]
pub struct DigitCount(u32);

impl DigitCount {
    /// Smallest difficulty the trainer ever asks for.
    pub const MIN: u32 = 2;

    /// Difficulty of the first round of a session.
    pub const DEFAULT_START: u32 = 3;

    /// Creates a digit count, clamping to [`DigitCount::MIN`].
    pub fn new(digits: u32) -> Self {
        Self(digits.max(Self::MIN))
    }

    /// Returns the raw number of digits.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Returns the number of digits as a length.
    pub fn len(self) -> usize {
        self.0 as usize
    }
}

impl Default for DigitCount {
    fn default() -> Self {
        Self(Self::DEFAULT_START)
    }
}

impl From<u32> for DigitCount {
    fn from(digits: u32) -> Self {
        Self::new(digits)
    }
}

impl From<DigitCount> for u32 {
    fn from(digits: DigitCount) -> Self {
        digits.0
    }
}

/// A non-negative number kept as its decimal digits.
///
/// Leading zeros are significant for display: a generated `042` renders with
/// three characters. Storing digits rather than a fixed-width integer keeps
/// escalation unbounded.
///
/// The empty digit sequence is the accumulator before any digit is pushed and
/// renders as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SpanNumber {
    digits: Vec<u8>,
}

impl SpanNumber {
    /// Appends a decimal digit: `self * 10 + digit`.
    ///
    /// Values above 9 are reduced modulo 10.
    pub fn push_digit(&mut self, digit: u8) {
        self.digits.push(digit % 10);
    }

    /// Returns the individual digits, most significant first.
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }

    /// Returns the number of rendered digits (0 for the empty accumulator).
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// Returns true if no digit was ever pushed.
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// Returns the integer value, or `None` if it does not fit in a `u128`.
    pub fn value(&self) -> Option<u128> {
        self.digits.iter().try_fold(0u128, |acc, &d| {
            acc.checked_mul(10)?.checked_add(u128::from(d))
        })
    }

    /// Compares as integers: leading zeros are ignored.
    pub fn numerically_eq(&self, other: &SpanNumber) -> bool {
        self.significant() == other.significant()
    }

    /// Returns the integer form: leading zeros stripped, all-zero input kept as `0`.
    pub fn normalized(&self) -> SpanNumber {
        let significant = self.significant();
        if significant.is_empty() {
            return SpanNumber { digits: vec![0] };
        }
        SpanNumber {
            digits: significant.to_vec(),
        }
    }

    fn significant(&self) -> &[u8] {
        let start = self
            .digits
            .iter()
            .position(|&d| d != 0)
            .unwrap_or(self.digits.len());
        &self.digits[start..]
    }
}

impl std::fmt::Display for SpanNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.digits.is_empty() {
            return write!(f, "0");
        }
        for digit in &self.digits {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

impl From<u64> for SpanNumber {
    fn from(value: u64) -> Self {
        let digits = value
            .to_string()
            .bytes()
            .map(|b| b - b'0')
            .collect();
        Self { digits }
    }
}

impl FromStr for SpanNumber {
    type Err = ParseNumberError;

    #[instrument]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if text.is_empty() {
            return Err(ParseNumberError::Empty);
        }
        let digits = text
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                ch.to_digit(10)
                    .map(|d| d as u8)
                    .ok_or(ParseNumberError::InvalidDigit { ch, position })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { digits })
    }
}

impl TryFrom<String> for SpanNumber {
    type Error = ParseNumberError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<SpanNumber> for String {
    fn from(number: SpanNumber) -> Self {
        number.to_string()
    }
}

/// Error returned when text is not a plain decimal number.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseNumberError {
    /// No characters were given.
    #[display("Number is empty")]
    Empty,

    /// A character other than `0`-`9` was found.
    #[display("Invalid digit {:?} at position {}", ch, position)]
    InvalidDigit {
        /// The offending character.
        ch: char,
        /// Zero-based character offset.
        position: usize,
    },
}

/// Identifier of one round within a trainer.
///
/// Ticks carry the id of the round that armed them so a stale tick can be
/// told apart from a live one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, Serialize, Deserialize,
)]
#[display("round-{}", _0)]
pub struct RoundId(u64);

impl RoundId {
    /// Returns the id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Outcome of one completed round. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct RoundResult {
    /// Difficulty the round was played at.
    digit_count: DigitCount,
    /// The number shown during reveal.
    number_to_guess: SpanNumber,
    /// The recall input as an integer, leading zeros stripped.
    number_guessed: SpanNumber,
    /// Whether the guess matched the target exactly.
    success: bool,
    /// Round clock at scoring: milliseconds past the recall boundary, since
    /// the clock starts at minus the reveal budget.
    duration_ms: i64,
}
