use crate::burst::BurstOutcome;

/// Something the runtime did that the UI may want to react to. The store
/// already reflects the change when this is returned.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedChange {
    Loaded {
        count: usize,
        /// Highest id when the load brought a record newer than any seen before
        new_arrival: Option<i64>,
    },
    FetchFailed {
        reason: String,
    },
    /// A burst timer tick. `fetch_started` is false when the previous fetch
    /// was still in flight and the tick was skipped.
    BurstTick {
        tick: u32,
        fetch_started: bool,
    },
    BurstFinished {
        outcome: BurstOutcome,
    },
}
