//! Append-only history of completed rounds.

use super::{DigitCount, RoundResult};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Chronological log of [`RoundResult`]s.
///
/// There is no removal: entries stay, unchanged and in insertion order, for
/// the life of the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLog {
    results: Vec<RoundResult>,
}

impl ResultLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a result after every earlier one.
    #[instrument(skip(self, result), fields(index = self.results.len(), success = *result.success()))]
    pub fn append(&mut self, result: RoundResult) {
        debug!("Recorded round result");
        self.results.push(result);
    }

    /// Most recent result, if any round finished.
    pub fn last(&self) -> Option<&RoundResult> {
        self.results.last()
    }

    /// All results, oldest first.
    pub fn all(&self) -> &[RoundResult] {
        &self.results
    }

    /// Number of finished rounds.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True before the first round finishes.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> std::slice::Iter<'_, RoundResult> {
        self.results.iter()
    }
}

impl<'a> IntoIterator for &'a ResultLog {
    type Item = &'a RoundResult;
    type IntoIter = std::slice::Iter<'a, RoundResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Aggregate view over a [`ResultLog`].
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
pub struct SessionStats {
    /// Finished rounds.
    total: usize,
    /// Rounds recalled exactly.
    successes: usize,
    /// Rounds recalled wrongly.
    failures: usize,
    /// Longest digit span recalled exactly.
    longest_span: Option<DigitCount>,
    /// Mean duration of successful rounds, in milliseconds.
    mean_success_ms: Option<f64>,
}

impl SessionStats {
    /// Computes statistics for every round in `log`.
    #[instrument(skip(log), fields(rounds = log.len()))]
    pub fn from_log(log: &ResultLog) -> Self {
        let total = log.len();
        let wins: Vec<&RoundResult> = log.iter().filter(|r| *r.success()).collect();
        let successes = wins.len();
        let longest_span = wins.iter().map(|r| *r.digit_count()).max();
        let mean_success_ms = if wins.is_empty() {
            None
        } else {
            let sum: i64 = wins.iter().map(|r| *r.duration_ms()).sum();
            Some(sum as f64 / successes as f64)
        };

        Self {
            total,
            successes,
            failures: total - successes,
            longest_span,
            mean_success_ms,
        }
    }

    /// Percentage of rounds recalled exactly, 0 when nothing was played.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successes as f64 * 100.0 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::digit_span::SpanNumber;

    fn result(digits: u32, target: u64, guess: u64, duration_ms: i64) -> RoundResult {
        RoundResult::new(
            DigitCount::new(digits),
            SpanNumber::from(target),
            SpanNumber::from(guess),
            target == guess,
            duration_ms,
        )
    }

    #[test]
    fn test_log_keeps_insertion_order() {
        let mut log = ResultLog::new();
        assert!(log.last().is_none());

        let first = result(3, 427, 427, 1500);
        let second = result(4, 1234, 1243, 2100);
        log.append(first.clone());
        log.append(second.clone());

        assert_eq!(log.all(), &[first, second.clone()]);
        assert_eq!(log.last(), Some(&second));
        assert_eq!(log.len(), 2);

        let mut durations = Vec::new();
        for result in &log {
            durations.push(*result.duration_ms());
        }
        assert_eq!(durations, vec![1500, 2100]);
    }

    #[test]
    fn test_stats_empty_log() {
        let stats = SessionStats::from_log(&ResultLog::new());
        assert_eq!(*stats.total(), 0);
        assert_eq!(stats.success_rate(), 0.0);
        assert!(stats.longest_span().is_none());
        assert!(stats.mean_success_ms().is_none());
    }

    #[test]
    fn test_stats_counts_and_longest_span() {
        let mut log = ResultLog::new();
        log.append(result(3, 427, 427, 1000));
        log.append(result(4, 1234, 1234, 3000));
        log.append(result(5, 12345, 12354, 900));
        log.append(result(4, 9876, 9876, 2000));

        let stats = SessionStats::from_log(&log);
        assert_eq!(*stats.total(), 4);
        assert_eq!(*stats.successes(), 3);
        assert_eq!(*stats.failures(), 1);
        assert_eq!(*stats.longest_span(), Some(DigitCount::new(4)));
        assert_eq!(*stats.mean_success_ms(), Some(2000.0));
        assert_eq!(stats.success_rate(), 75.0);
    }
}
