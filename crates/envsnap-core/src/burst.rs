//! Bounded polling burst used by the "check for a new event" action.
//!
//! The burst is a small state machine. The runtime owns the timer and feeds
//! ticks and fetch results in; the burst decides whether to fetch, keep going
//! or stop.

use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::constants::{status, POLL_INTERVAL_MS, POLL_TOTAL_MS};
use crate::store::IngestOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurstSchedule {
    pub interval: Duration,
    pub total: Duration,
}

impl BurstSchedule {
    pub fn from_millis(interval_ms: u64, total_ms: u64) -> Self {
        Self {
            interval: Duration::from_millis(interval_ms),
            total: Duration::from_millis(total_ms),
        }
    }
}

impl Default for BurstSchedule {
    fn default() -> Self {
        Self::from_millis(POLL_INTERVAL_MS, POLL_TOTAL_MS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstOutcome {
    NewArrival { event_id: i64 },
    TimedOut,
    Cancelled,
}

impl BurstOutcome {
    pub fn status_message(&self, schedule: &BurstSchedule) -> String {
        match self {
            BurstOutcome::NewArrival { event_id } => {
                format!("✅ New entry detected: id={}", event_id)
            }
            BurstOutcome::TimedOut => {
                format!("No new event detected in {}.", format_secs(schedule.total))
            }
            BurstOutcome::Cancelled => status::CHECK_CANCELLED.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstState {
    Idle,
    Polling { started_at: Instant, ticks: u32 },
    Stopped(BurstOutcome),
}

/// Identifies one started burst, so cancelling a stale handle cannot stop a
/// newer burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BurstHandle {
    generation: u64,
}

/// What to do with a timer tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Fetch { tick: u32 },
    Stop(BurstOutcome),
}

#[derive(Debug)]
pub struct PollingBurst {
    state: BurstState,
    schedule: BurstSchedule,
    generation: u64,
    /// Highest id known when the burst started. `None` until the store has
    /// loaded once, in which case the first successful cycle sets it.
    baseline: Option<i64>,
    skipped_ticks: u32,
}

impl PollingBurst {
    pub fn new() -> Self {
        Self {
            state: BurstState::Idle,
            schedule: BurstSchedule::default(),
            generation: 0,
            baseline: None,
            skipped_ticks: 0,
        }
    }

    /// Start a new burst, replacing any active one.
    pub fn start(&mut self, now: Instant, schedule: BurstSchedule, baseline: Option<i64>) -> BurstHandle {
        self.generation += 1;
        self.state = BurstState::Polling {
            started_at: now,
            ticks: 0,
        };
        self.schedule = schedule;
        self.baseline = baseline;
        self.skipped_ticks = 0;
        BurstHandle {
            generation: self.generation,
        }
    }

    pub fn on_tick(&mut self, now: Instant) -> TickDecision {
        let BurstState::Polling { started_at, ticks } = self.state else {
            return TickDecision::Stop(self.last_outcome().unwrap_or(BurstOutcome::Cancelled));
        };

        if now.duration_since(started_at) >= self.schedule.total {
            self.stop(BurstOutcome::TimedOut);
            return TickDecision::Stop(BurstOutcome::TimedOut);
        }

        let tick = ticks + 1;
        self.state = BurstState::Polling {
            started_at,
            ticks: tick,
        };
        TickDecision::Fetch { tick }
    }

    /// When the running burst must stop, whether or not a tick is due.
    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            BurstState::Polling { started_at, .. } => Some(started_at + self.schedule.total),
            _ => None,
        }
    }

    /// Stop with `TimedOut` once `now` has reached the deadline.
    pub fn on_deadline(&mut self, now: Instant) -> Option<BurstOutcome> {
        let deadline = self.deadline()?;
        if now < deadline {
            return None;
        }
        self.stop(BurstOutcome::TimedOut);
        Some(BurstOutcome::TimedOut)
    }

    /// A tick fired while the previous fetch was still in flight.
    pub fn record_skipped_tick(&mut self) {
        self.skipped_ticks += 1;
    }

    /// Feed the result of a fetch cycle. Returns the outcome if the burst
    /// just ended.
    pub fn on_cycle(&mut self, outcome: &IngestOutcome) -> Option<BurstOutcome> {
        if !self.is_active() {
            return None;
        }
        let IngestOutcome::Loaded { arrival, .. } = outcome else {
            return None;
        };

        // A max id of 0 means nothing was loaded yet; it never counts as a baseline
        match self.baseline.filter(|&b| b != 0) {
            None => {
                self.baseline = Some(arrival.max_id);
                None
            }
            Some(baseline) if arrival.max_id > baseline => {
                let done = BurstOutcome::NewArrival {
                    event_id: arrival.max_id,
                };
                self.stop(done);
                Some(done)
            }
            Some(_) => None,
        }
    }

    /// Cancel the burst identified by `handle`, or whichever is active when
    /// `handle` is `None`. Returns true if a burst was stopped.
    pub fn cancel(&mut self, handle: Option<BurstHandle>) -> bool {
        if !self.is_active() {
            return false;
        }
        if handle.is_some_and(|h| h.generation != self.generation) {
            return false;
        }
        self.stop(BurstOutcome::Cancelled);
        true
    }

    fn stop(&mut self, outcome: BurstOutcome) {
        info!(?outcome, skipped_ticks = self.skipped_ticks, "polling burst stopped");
        self.state = BurstState::Stopped(outcome);
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, BurstState::Polling { .. })
    }

    pub fn state(&self) -> BurstState {
        self.state
    }

    pub fn schedule(&self) -> &BurstSchedule {
        &self.schedule
    }

    pub fn handle(&self) -> Option<BurstHandle> {
        self.is_active().then_some(BurstHandle {
            generation: self.generation,
        })
    }

    pub fn baseline(&self) -> Option<i64> {
        self.baseline
    }

    pub fn skipped_ticks(&self) -> u32 {
        self.skipped_ticks
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match self.state {
            BurstState::Polling { started_at, .. } => Some(now.duration_since(started_at)),
            _ => None,
        }
    }

    pub fn last_outcome(&self) -> Option<BurstOutcome> {
        match self.state {
            BurstState::Stopped(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl Default for PollingBurst {
    fn default() -> Self {
        Self::new()
    }
}

/// "15s", or "1.5s" when the duration is not a whole number of seconds.
pub fn format_secs(duration: Duration) -> String {
    if duration.subsec_millis() == 0 {
        format!("{}s", duration.as_secs())
    } else {
        format!("{:.1}s", duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewArrival;

    fn loaded(max_id: i64) -> IngestOutcome {
        IngestOutcome::Loaded {
            count: 1,
            arrival: NewArrival {
                max_id,
                is_new_arrival: false,
            },
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_ticks_until_deadline() {
        let start = Instant::now();
        let mut burst = PollingBurst::new();
        burst.start(start, BurstSchedule::default(), Some(4));

        assert_eq!(burst.on_tick(start + ms(3_000)), TickDecision::Fetch { tick: 1 });
        assert_eq!(burst.on_tick(start + ms(6_000)), TickDecision::Fetch { tick: 2 });
        assert_eq!(burst.on_tick(start + ms(9_000)), TickDecision::Fetch { tick: 3 });
        assert_eq!(burst.on_tick(start + ms(12_000)), TickDecision::Fetch { tick: 4 });
        assert_eq!(
            burst.on_tick(start + ms(15_000)),
            TickDecision::Stop(BurstOutcome::TimedOut)
        );
        assert!(!burst.is_active());
        assert_eq!(burst.last_outcome(), Some(BurstOutcome::TimedOut));
    }

    #[test]
    fn test_higher_max_id_ends_burst() {
        let start = Instant::now();
        let mut burst = PollingBurst::new();
        burst.start(start, BurstSchedule::default(), Some(4));

        assert_eq!(burst.on_cycle(&loaded(4)), None);
        assert_eq!(
            burst.on_cycle(&loaded(5)),
            Some(BurstOutcome::NewArrival { event_id: 5 })
        );
        assert!(!burst.is_active());
        // Further results are ignored once stopped
        assert_eq!(burst.on_cycle(&loaded(9)), None);
    }

    #[test]
    fn test_first_cycle_sets_missing_baseline() {
        let mut burst = PollingBurst::new();
        burst.start(Instant::now(), BurstSchedule::default(), None);

        assert_eq!(burst.on_cycle(&loaded(8)), None);
        assert_eq!(burst.baseline(), Some(8));
        assert_eq!(
            burst.on_cycle(&loaded(9)),
            Some(BurstOutcome::NewArrival { event_id: 9 })
        );
    }

    #[test]
    fn test_zero_baseline_is_treated_as_missing() {
        let mut burst = PollingBurst::new();
        burst.start(Instant::now(), BurstSchedule::default(), Some(0));

        // An empty store has max id 0; the first records only set the baseline
        assert_eq!(burst.on_cycle(&loaded(5)), None);
        assert!(burst.is_active());
        assert_eq!(burst.baseline(), Some(5));
        assert_eq!(
            burst.on_cycle(&loaded(6)),
            Some(BurstOutcome::NewArrival { event_id: 6 })
        );
    }

    #[test]
    fn test_deadline_stops_between_ticks() {
        let start = Instant::now();
        let mut burst = PollingBurst::new();
        assert_eq!(burst.deadline(), None);

        burst.start(start, BurstSchedule::from_millis(3_000, 10_000), Some(1));
        assert_eq!(burst.deadline(), Some(start + ms(10_000)));
        assert_eq!(burst.on_deadline(start + ms(9_999)), None);
        assert!(burst.is_active());

        assert_eq!(
            burst.on_deadline(start + ms(10_000)),
            Some(BurstOutcome::TimedOut)
        );
        assert!(!burst.is_active());
        assert_eq!(burst.deadline(), None);
        assert_eq!(burst.on_deadline(start + ms(12_000)), None);
    }

    #[test]
    fn test_failed_cycle_keeps_polling() {
        let mut burst = PollingBurst::new();
        burst.start(Instant::now(), BurstSchedule::default(), Some(2));

        let failed = IngestOutcome::Failed {
            reason: "HTTP 502".to_string(),
        };
        assert_eq!(burst.on_cycle(&failed), None);
        assert!(burst.is_active());
        assert_eq!(burst.baseline(), Some(2));
    }

    #[test]
    fn test_stale_handle_does_not_cancel_newer_burst() {
        let mut burst = PollingBurst::new();
        let first = burst.start(Instant::now(), BurstSchedule::default(), Some(1));
        let second = burst.start(Instant::now(), BurstSchedule::default(), Some(1));

        assert!(!burst.cancel(Some(first)));
        assert!(burst.is_active());
        assert!(burst.cancel(Some(second)));
        assert_eq!(burst.state(), BurstState::Stopped(BurstOutcome::Cancelled));
        assert!(!burst.cancel(None));
    }

    #[test]
    fn test_status_messages() {
        let schedule = BurstSchedule::default();
        assert_eq!(
            BurstOutcome::TimedOut.status_message(&schedule),
            "No new event detected in 15s."
        );
        assert_eq!(
            BurstOutcome::NewArrival { event_id: 12 }.status_message(&schedule),
            "✅ New entry detected: id=12"
        );
        assert_eq!(format_secs(ms(1_500)), "1.5s");
    }
}
