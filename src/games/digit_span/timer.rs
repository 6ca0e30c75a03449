//! Round clock and tick scheduling.
//!
//! A round's clock is a single signed elapsed value. It starts at minus the
//! reveal budget and grows by the cadence on every tick, so its sign is the
//! round phase: reveal while `<= 0`, recall once `> 0`.
//!
//! Ticks come from a [`TickScheduler`]. Each armed schedule stamps its ticks
//! with the [`RoundId`] that armed it; a [`RoundTimer`] only accepts ticks
//! stamped with its own round.

use super::{DigitCount, RoundId};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace};

/// Tick cadence of the reference trainer.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Milliseconds the target stays visible: `1000 + 1000 × digits`.
pub fn reveal_budget_ms(digits: u32) -> i64 {
    1000 + 1000 * i64::from(digits)
}

/// Phase of a live round, derived from the sign of its elapsed time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// Target visible, input ignored.
    Reveal,
    /// Target hidden, input scored.
    Recall,
}

impl Phase {
    /// Derives the phase from a round's elapsed time.
    pub fn from_elapsed(elapsed_ms: i64) -> Self {
        if elapsed_ms <= 0 {
            Phase::Reveal
        } else {
            Phase::Recall
        }
    }
}

/// One clock tick, stamped with the round that armed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, new)]
pub struct Tick {
    /// Round whose schedule produced this tick.
    pub round: RoundId,
}

/// Elapsed-time clock for one round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTimer {
    round: RoundId,
    elapsed_ms: i64,
    cadence_ms: i64,
    armed: bool,
}

impl RoundTimer {
    /// Arms a clock for `round` at minus the reveal budget of `digits`.
    #[instrument]
    pub fn arm(round: RoundId, digits: DigitCount, cadence: Duration) -> Self {
        let elapsed_ms = -reveal_budget_ms(digits.get());
        debug!(%round, elapsed_ms, "Armed round timer");
        Self {
            round,
            elapsed_ms,
            cadence_ms: i64::try_from(cadence.as_millis()).unwrap_or(i64::MAX).max(1),
            armed: true,
        }
    }

    /// Advances by one cadence step if the tick belongs to this round.
    ///
    /// Returns false, leaving the clock untouched, for ticks of other rounds
    /// and for any tick after [`RoundTimer::cancel`].
    pub fn tick(&mut self, tick: Tick) -> bool {
        if !self.armed || tick.round != self.round {
            trace!(timer_round = %self.round, tick_round = %tick.round, armed = self.armed, "Dropped tick");
            return false;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(self.cadence_ms);
        true
    }

    /// Stops the clock. Cancelling twice is a no-op.
    pub fn cancel(&mut self) {
        if self.armed {
            debug!(round = %self.round, elapsed_ms = self.elapsed_ms, "Cancelled round timer");
        }
        self.armed = false;
    }

    /// Round this clock belongs to.
    pub fn round(&self) -> RoundId {
        self.round
    }

    /// Signed elapsed milliseconds since the recall boundary.
    pub fn elapsed_ms(&self) -> i64 {
        self.elapsed_ms
    }

    /// Whether ticks are still accepted.
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        Phase::from_elapsed(self.elapsed_ms)
    }
}

/// Something that delivers [`Tick`]s for at most one round at a time.
pub trait TickScheduler {
    /// Starts delivering ticks for `round` every `cadence`.
    ///
    /// Any schedule armed earlier is cancelled first.
    fn arm(&mut self, round: RoundId, cadence: Duration);

    /// Stops the current schedule. Idempotent.
    fn cancel(&mut self);

    /// Round currently being ticked, if any.
    fn active_round(&self) -> Option<RoundId>;
}

/// Tick source backed by a tokio interval task.
///
/// Ticks are sent into an unbounded channel drained by the event loop.
/// Arming aborts the previous task before spawning the next, so at most one
/// interval task exists per ticker.
#[derive(Debug)]
pub struct TokioTicker {
    tx: mpsc::UnboundedSender<Tick>,
    task: Option<(RoundId, JoinHandle<()>)>,
}

impl TokioTicker {
    /// Creates a ticker and the receiver its ticks arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Tick>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, task: None }, rx)
    }
}

impl TickScheduler for TokioTicker {
    #[instrument(skip(self))]
    fn arm(&mut self, round: RoundId, cadence: Duration) {
        self.cancel();

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(cadence);
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Tick::new(round)).is_err() {
                    trace!(%round, "Tick receiver dropped, stopping ticker");
                    break;
                }
            }
        });
        debug!(%round, ?cadence, "Spawned ticker task");
        self.task = Some((round, handle));
    }

    fn cancel(&mut self) {
        if let Some((round, handle)) = self.task.take() {
            handle.abort();
            debug!(%round, "Aborted ticker task");
        }
    }

    fn active_round(&self) -> Option<RoundId> {
        self.task.as_ref().map(|(round, _)| *round)
    }
}

impl Drop for TokioTicker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Scheduler that never ticks on its own.
///
/// Callers feed [`Tick`]s by hand. Arm and cancel calls are counted so a
/// headless driver or a test can observe the scheduling discipline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualScheduler {
    active: Option<(RoundId, Duration)>,
    arms: usize,
    cancels: usize,
}

impl ManualScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a schedule was armed.
    pub fn arms(&self) -> usize {
        self.arms
    }

    /// Number of cancel calls that stopped a live schedule.
    pub fn cancels(&self) -> usize {
        self.cancels
    }

    /// Cadence of the live schedule.
    pub fn cadence(&self) -> Option<Duration> {
        self.active.map(|(_, cadence)| cadence)
    }

    /// Builds the tick the live schedule would deliver next.
    pub fn next_tick(&self) -> Option<Tick> {
        self.active.map(|(round, _)| Tick::new(round))
    }
}

impl TickScheduler for ManualScheduler {
    fn arm(&mut self, round: RoundId, cadence: Duration) {
        self.cancel();
        self.active = Some((round, cadence));
        self.arms += 1;
    }

    fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.cancels += 1;
        }
    }

    fn active_round(&self) -> Option<RoundId> {
        self.active.map(|(round, _)| round)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round(n: u64) -> RoundId {
        (0..n).fold(RoundId::default(), |id, _| id.next())
    }

    #[test]
    fn test_reveal_budget_is_linear() {
        for d in 0..20 {
            assert_eq!(reveal_budget_ms(d), 1000 + 1000 * i64::from(d));
        }
    }

    #[test]
    fn test_phase_boundary_is_inclusive_zero() {
        assert_eq!(Phase::from_elapsed(-100), Phase::Reveal);
        assert_eq!(Phase::from_elapsed(0), Phase::Reveal);
        assert_eq!(Phase::from_elapsed(1), Phase::Recall);
    }

    #[test]
    fn test_timer_crosses_into_recall() {
        let id = round(1);
        let mut timer = RoundTimer::arm(id, DigitCount::new(3), DEFAULT_TICK);
        assert_eq!(timer.round(), id);
        assert_eq!(timer.elapsed_ms(), -4000);

        for _ in 0..40 {
            assert!(timer.tick(Tick::new(id)));
        }
        assert_eq!(timer.elapsed_ms(), 0);
        assert_eq!(timer.phase(), Phase::Reveal);

        assert!(timer.tick(Tick::new(id)));
        assert_eq!(timer.elapsed_ms(), 100);
        assert_eq!(timer.phase(), Phase::Recall);
    }

    #[test]
    fn test_timer_drops_foreign_and_cancelled_ticks() {
        let mut timer = RoundTimer::arm(round(2), DigitCount::new(2), DEFAULT_TICK);
        assert!(!timer.tick(Tick::new(round(1))));
        assert_eq!(timer.elapsed_ms(), -3000);

        timer.cancel();
        timer.cancel();
        assert!(!timer.is_armed());
        assert!(!timer.tick(Tick::new(round(2))));
        assert_eq!(timer.elapsed_ms(), -3000);
    }

    #[test]
    fn test_manual_scheduler_replaces_schedule() {
        let mut scheduler = ManualScheduler::new();
        scheduler.cancel();
        assert_eq!(scheduler.cancels(), 0);

        scheduler.arm(round(1), DEFAULT_TICK);
        scheduler.arm(round(2), DEFAULT_TICK);
        assert_eq!(scheduler.arms(), 2);
        assert_eq!(scheduler.cancels(), 1);
        assert_eq!(scheduler.active_round(), Some(round(2)));
        assert_eq!(scheduler.next_tick(), Some(Tick::new(round(2))));
        assert_eq!(scheduler.cadence(), Some(DEFAULT_TICK));

        scheduler.cancel();
        assert_eq!(scheduler.cadence(), None);
        assert_eq!(scheduler.next_tick(), None);
    }

    #[tokio::test]
    async fn test_tokio_ticker_delivers_and_stops() {
        let (mut ticker, mut rx) = TokioTicker::new();
        ticker.arm(round(1), Duration::from_millis(5));

        let tick = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("tick within timeout")
            .expect("channel open");
        assert_eq!(tick.round, round(1));

        ticker.arm(round(2), Duration::from_millis(5));
        assert_eq!(ticker.active_round(), Some(round(2)));

        ticker.cancel();
        assert_eq!(ticker.active_round(), None);
        tokio::time::sleep(Duration::from_millis(30)).await;
        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
