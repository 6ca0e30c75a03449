//! Sources of target numbers.
//!
//! In play the trainer draws from a real RNG. Tests and replays inject a
//! seeded or scripted source through the same trait.

use super::SpanNumber;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use tracing::{instrument, trace, warn};

/// Produces the number to memorize for a round.
pub trait NumberSource {
    /// Returns a number rendered with exactly `digits` characters.
    fn generate(&mut self, digits: u32) -> SpanNumber;
}

/// Uniform random numbers with an exact digit count.
///
/// Builds the value digit by digit: each position multiplies the accumulator
/// by ten and adds an independent draw from `0..10`, so the result is uniform
/// over `[0, 10^digits - 1]` with leading zeros kept.
///
/// `digits == 0` performs no draws and yields the empty accumulator, which
/// renders as `0`.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator<R = StdRng> {
    rng: R,
}

impl RandomNumberGenerator<StdRng> {
    /// Creates a generator seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Creates a reproducible generator.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomNumberGenerator<R> {
    /// Wraps an existing RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> NumberSource for RandomNumberGenerator<R> {
    #[instrument(skip(self))]
    fn generate(&mut self, digits: u32) -> SpanNumber {
        let mut number = SpanNumber::default();
        for _ in 0..digits {
            number.push_digit(self.rng.gen_range(0..10));
        }
        trace!(%number, "Generated target");
        number
    }
}

/// Replays a fixed sequence of numbers, one per round.
///
/// Once the script runs out every position is `0`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedNumbers {
    script: VecDeque<SpanNumber>,
}

impl ScriptedNumbers {
    /// Creates a source that yields `numbers` in order.
    pub fn new(numbers: impl IntoIterator<Item = SpanNumber>) -> Self {
        Self {
            script: numbers.into_iter().collect(),
        }
    }

    /// Returns how many scripted numbers are left.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl NumberSource for ScriptedNumbers {
    #[instrument(skip(self))]
    fn generate(&mut self, digits: u32) -> SpanNumber {
        match self.script.pop_front() {
            Some(number) => {
                if number.len() != digits as usize {
                    warn!(%number, digits, "Scripted number has the wrong length");
                }
                number
            }
            None => {
                warn!(digits, "Script exhausted, falling back to zeros");
                let mut number = SpanNumber::default();
                for _ in 0..digits {
                    number.push_digit(0);
                }
                number
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_has_exact_length_and_range() {
        let mut generator = RandomNumberGenerator::seeded(7);
        for digits in 1..=12u32 {
            for _ in 0..50 {
                let number = generator.generate(digits);
                assert_eq!(number.len(), digits as usize);
                let value = number.value().unwrap();
                assert!(value < 10u128.pow(digits));
            }
        }
    }

    #[test]
    fn test_generate_zero_digits_is_degenerate_zero() {
        let mut generator = RandomNumberGenerator::seeded(1);
        let number = generator.generate(0);
        assert!(number.is_empty());
        assert_eq!(number.value(), Some(0));
    }

    #[test]
    fn test_generate_draws_every_digit() {
        let mut generator = RandomNumberGenerator::seeded(42);
        let mut seen = [false; 10];
        for _ in 0..200 {
            for &digit in generator.generate(5).digits() {
                seen[digit as usize] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomNumberGenerator::seeded(99);
        let mut b = RandomNumberGenerator::seeded(99);
        for _ in 0..10 {
            assert_eq!(a.generate(6), b.generate(6));
        }
    }

    #[test]
    fn test_scripted_numbers_in_order_then_zeros() {
        let mut source = ScriptedNumbers::new([SpanNumber::from(427), SpanNumber::from(81)]);
        assert_eq!(source.generate(3), SpanNumber::from(427));
        assert_eq!(source.generate(2), SpanNumber::from(81));
        assert_eq!(source.remaining(), 0);
        assert_eq!(source.generate(3).to_string(), "000");
    }
}
