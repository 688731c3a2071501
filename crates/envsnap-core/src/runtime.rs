use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::burst::{format_secs, BurstHandle, BurstOutcome, BurstSchedule, PollingBurst, TickDecision};
use crate::config::FeedConfig;
use crate::events::FeedChange;
use crate::feed::{FeedError, FeedSource};
use crate::models::{MissingReadings, RawEventRecord};
use crate::store::{EventFeedStore, IngestOutcome, SelectionPolicy};

type FetchResult = Result<Vec<RawEventRecord>, FeedError>;

struct InFlightFetch {
    task: JoinHandle<FetchResult>,
    policy: SelectionPolicy,
}

/// Owns the store, the feed source, the in-flight fetch and the burst timer.
///
/// Everything is mutated from the task that calls into the runtime. Only the
/// network request runs elsewhere; its result comes back through
/// [`FeedRuntime::next_change`], which the UI loop awaits next to its own
/// events.
pub struct FeedRuntime {
    store: EventFeedStore,
    source: Arc<dyn FeedSource>,
    burst: PollingBurst,
    burst_timer: Option<Interval>,
    in_flight: Option<InFlightFetch>,
    schedule: BurstSchedule,
}

impl FeedRuntime {
    pub fn new(source: Arc<dyn FeedSource>, missing_readings: MissingReadings) -> Self {
        Self {
            store: EventFeedStore::new(missing_readings),
            source,
            burst: PollingBurst::new(),
            burst_timer: None,
            in_flight: None,
            schedule: BurstSchedule::default(),
        }
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        config.validate()?;
        let source = config.build_source()?;
        info!(source = %source.describe(), "feed runtime created");
        Ok(Self::new(source, config.missing_readings).with_schedule(config.burst_schedule()))
    }

    /// Default schedule used by [`FeedRuntime::start_burst_check`]
    pub fn with_schedule(mut self, schedule: BurstSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    // ===== Commands =====

    /// Start one fetch cycle. Returns false when a fetch is already in
    /// flight; the request is dropped, not queued.
    pub fn refresh(&mut self, reason: &str) -> bool {
        if !self.store.begin_fetch(reason) {
            return false;
        }

        // First load jumps to the newest record, later loads keep the selection
        let policy = if self.store.has_loaded() {
            SelectionPolicy::Preserve
        } else {
            SelectionPolicy::JumpToLatest
        };

        let source = Arc::clone(&self.source);
        debug!(reason, source = %source.describe(), "starting feed fetch");
        let task = tokio::spawn(async move { source.fetch().await });
        self.in_flight = Some(InFlightFetch { task, policy });
        true
    }

    /// Start a burst with the configured schedule.
    pub fn start_burst_check(&mut self) -> BurstHandle {
        self.start_burst(self.schedule)
    }

    /// Fetch now, then every `schedule.interval` until a newer record shows
    /// up or `schedule.total` has elapsed. Replaces any running burst.
    pub fn start_burst(&mut self, schedule: BurstSchedule) -> BurstHandle {
        self.stop_burst_timer();

        let interval = schedule.interval.max(Duration::from_millis(1));
        let now = Instant::now();
        let baseline = self.store.has_loaded().then(|| self.store.last_max_id());
        let handle = self.burst.start(now, schedule, baseline);

        let mut timer = tokio::time::interval_at(now + interval, interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
        self.burst_timer = Some(timer);

        info!(
            interval_ms = schedule.interval.as_millis() as u64,
            total_ms = schedule.total.as_millis() as u64,
            ?baseline,
            "polling burst started"
        );

        self.refresh("Refresh burst");
        self.store.set_status(format!(
            "Checking… (polling every {} for {})",
            format_secs(schedule.interval),
            format_secs(schedule.total)
        ));
        handle
    }

    /// Cancel the burst `handle` refers to. A fetch already in flight is not
    /// aborted; its result is applied normally.
    pub fn cancel_burst(&mut self, handle: BurstHandle) -> bool {
        self.cancel(Some(handle))
    }

    /// Cancel whichever burst is running.
    pub fn stop_burst(&mut self) -> bool {
        self.cancel(None)
    }

    fn cancel(&mut self, handle: Option<BurstHandle>) -> bool {
        if !self.burst.cancel(handle) {
            return false;
        }
        self.stop_burst_timer();
        self.store
            .set_status(BurstOutcome::Cancelled.status_message(self.burst.schedule()));
        true
    }

    fn stop_burst_timer(&mut self) {
        self.burst_timer = None;
    }

    pub fn select(&mut self, index: usize) {
        self.store.set_selected_index(index);
    }

    // ===== Event pump =====

    /// Wait for the next fetch completion, burst tick or burst deadline and
    /// apply it.
    ///
    /// Cancel-safe: dropping the future before it resolves loses nothing, so
    /// it can sit in a `tokio::select!` loop. Pends forever while there is
    /// neither a fetch in flight nor a burst running.
    pub async fn next_change(&mut self) -> FeedChange {
        let deadline = self.burst.deadline();
        tokio::select! {
            joined = wait_fetch(&mut self.in_flight) => {
                let policy = self
                    .in_flight
                    .take()
                    .map(|f| f.policy)
                    .unwrap_or_default();
                let result = joined.unwrap_or_else(|e| {
                    Err(FeedError::Transport(format!("fetch task failed: {}", e)))
                });
                self.finish_fetch(result, policy)
            }
            _ = wait_tick(&mut self.burst_timer) => {
                self.on_burst_tick()
            }
            _ = wait_deadline(deadline) => {
                self.on_burst_deadline()
            }
        }
    }

    fn on_burst_deadline(&mut self) -> FeedChange {
        let outcome = self
            .burst
            .on_deadline(Instant::now())
            .unwrap_or(BurstOutcome::TimedOut);
        self.stop_burst_timer();
        self.store.set_status(outcome.status_message(self.burst.schedule()));
        FeedChange::BurstFinished { outcome }
    }

    fn finish_fetch(&mut self, result: FetchResult, policy: SelectionPolicy) -> FeedChange {
        let policy = if self.burst.is_active() {
            SelectionPolicy::JumpToLatestOnGrowth
        } else {
            policy
        };

        let outcome = self.store.apply_fetch(result, policy);
        if let Some(done) = self.burst.on_cycle(&outcome) {
            self.stop_burst_timer();
            self.store.set_status(done.status_message(self.burst.schedule()));
            return FeedChange::BurstFinished { outcome: done };
        }

        match outcome {
            IngestOutcome::Loaded { count, arrival } => FeedChange::Loaded {
                count,
                new_arrival: arrival.is_new_arrival.then_some(arrival.max_id),
            },
            IngestOutcome::Failed { reason } => FeedChange::FetchFailed { reason },
        }
    }

    fn on_burst_tick(&mut self) -> FeedChange {
        match self.burst.on_tick(Instant::now()) {
            TickDecision::Stop(outcome) => {
                self.stop_burst_timer();
                self.store.set_status(outcome.status_message(self.burst.schedule()));
                FeedChange::BurstFinished { outcome }
            }
            TickDecision::Fetch { tick } => {
                let fetch_started = self.refresh(&format!("Poll {}", tick));
                if !fetch_started {
                    self.burst.record_skipped_tick();
                }
                FeedChange::BurstTick { tick, fetch_started }
            }
        }
    }

    // ===== Query Methods =====

    pub fn store(&self) -> &EventFeedStore {
        &self.store
    }

    pub fn burst(&self) -> &PollingBurst {
        &self.burst
    }

    pub fn is_burst_active(&self) -> bool {
        self.burst.is_active()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn source_label(&self) -> String {
        self.source.describe()
    }

    /// False for fixed data sets, where a burst could never see a new record.
    pub fn is_live_source(&self) -> bool {
        self.source.is_live()
    }
}

async fn wait_fetch(
    in_flight: &mut Option<InFlightFetch>,
) -> Result<FetchResult, tokio::task::JoinError> {
    match in_flight {
        Some(fetch) => (&mut fetch.task).await,
        None => std::future::pending().await,
    }
}

async fn wait_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

async fn wait_tick(timer: &mut Option<Interval>) {
    match timer {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
