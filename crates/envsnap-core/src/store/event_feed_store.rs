use tracing::{debug, info, warn};

use crate::constants::status;
use crate::feed::FeedError;
use crate::models::{MissingReadings, NormalizedEvent, RawEventRecord};
use crate::store::ingest::{detect_new_arrival, ingest_records, NewArrival};
use crate::store::selection::{resolve_selection, PreviousSelection, SelectionPolicy};

/// Result of applying one fetch to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum IngestOutcome {
    Loaded { count: usize, arrival: NewArrival },
    Failed { reason: String },
}

/// Authoritative in-memory copy of the feed.
///
/// Holds the ordered, filtered record set, the highest id seen so far, the
/// selected index and the status line. A successful fetch replaces the set
/// wholesale; a failed one only changes the status line.
pub struct EventFeedStore {
    events: Vec<NormalizedEvent>,
    last_max_id: i64,
    selected_index: usize,
    status: String,
    fetching: bool,
    loaded: bool,
    missing_readings: MissingReadings,
}

impl EventFeedStore {
    pub fn new(missing_readings: MissingReadings) -> Self {
        Self {
            events: Vec::new(),
            last_max_id: 0,
            selected_index: 0,
            status: status::NOT_LOADED.to_string(),
            fetching: false,
            loaded: false,
            missing_readings,
        }
    }

    // ===== Fetch lifecycle =====

    /// Mark a fetch as in flight. Returns false, and changes nothing, when
    /// another fetch has not resolved yet.
    pub fn begin_fetch(&mut self, reason: &str) -> bool {
        if self.fetching {
            debug!(reason, "fetch already in flight, dropping request");
            return false;
        }
        self.fetching = true;
        self.status = format!("Loading… ({})", reason);
        true
    }

    /// Apply the result of the fetch started by [`Self::begin_fetch`].
    pub fn apply_fetch(
        &mut self,
        result: Result<Vec<RawEventRecord>, FeedError>,
        policy: SelectionPolicy,
    ) -> IngestOutcome {
        self.fetching = false;
        match result {
            Ok(records) => {
                let events = ingest_records(&records, self.missing_readings);
                let arrival = self.replace(events, policy);
                IngestOutcome::Loaded {
                    count: self.events.len(),
                    arrival,
                }
            }
            Err(err) => {
                warn!(error = %err, "feed fetch failed, keeping previous set");
                let reason = err.to_string();
                self.status = format!("Fetch error: {}", reason);
                IngestOutcome::Failed { reason }
            }
        }
    }

    /// Replace the whole set with an already normalized one.
    pub fn replace(&mut self, events: Vec<NormalizedEvent>, policy: SelectionPolicy) -> NewArrival {
        let previous = self.previous_selection();
        let arrival = detect_new_arrival(self.last_max_id, &events);

        self.selected_index = resolve_selection(&previous, &events, policy);
        self.events = events;
        self.last_max_id = arrival.max_id;
        self.loaded = true;

        if arrival.is_new_arrival {
            info!(event_id = arrival.max_id, "new entry detected");
            self.status = format!("✅ New entry detected: id={}", arrival.max_id);
        } else {
            info!(count = self.events.len(), max_id = arrival.max_id, "feed loaded");
            self.status = format!("OK • {} valid events", self.events.len());
        }
        arrival
    }

    fn previous_selection(&self) -> PreviousSelection {
        PreviousSelection {
            event_id: self.selected().map(|e| e.event_id),
            index: self.selected_index(),
            len: self.events.len(),
        }
    }

    // ===== Query Methods =====

    pub fn display_list(&self) -> &[NormalizedEvent] {
        &self.events
    }

    /// Selected index, clamped to the current set.
    pub fn selected_index(&self) -> usize {
        self.selected_index.min(self.events.len().saturating_sub(1))
    }

    pub fn set_selected_index(&mut self, index: usize) {
        self.selected_index = index;
    }

    pub fn selected(&self) -> Option<&NormalizedEvent> {
        self.events.get(self.selected_index())
    }

    pub fn status_message(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    pub fn last_max_id(&self) -> i64 {
        self.last_max_id
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// True once any fetch has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn missing_readings(&self) -> MissingReadings {
        self.missing_readings
    }
}

impl Default for EventFeedStore {
    fn default() -> Self {
        Self::new(MissingReadings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn records(value: Value) -> Vec<RawEventRecord> {
        value
            .as_array()
            .map(|items| items.iter().map(RawEventRecord::from_value).collect())
            .unwrap_or_default()
    }

    fn load(store: &mut EventFeedStore, value: Value, policy: SelectionPolicy) -> IngestOutcome {
        assert!(store.begin_fetch("test"));
        store.apply_fetch(Ok(records(value)), policy)
    }

    fn ids(store: &EventFeedStore) -> Vec<i64> {
        store.display_list().iter().map(|e| e.event_id).collect()
    }

    #[test]
    fn test_initial_state() {
        let store = EventFeedStore::default();
        assert!(store.display_list().is_empty());
        assert_eq!(store.selected_index(), 0);
        assert!(store.selected().is_none());
        assert_eq!(store.status_message(), "Not loaded yet.");
        assert!(!store.has_loaded());
    }

    #[test]
    fn test_reentrancy_guard() {
        let mut store = EventFeedStore::default();
        assert!(store.begin_fetch("first"));
        assert!(!store.begin_fetch("second"));
        assert_eq!(store.status_message(), "Loading… (first)");

        store.apply_fetch(Ok(vec![]), SelectionPolicy::Preserve);
        assert!(!store.is_fetching());
        assert!(store.begin_fetch("third"));
    }

    #[test]
    fn test_successful_load_sets_status_and_baseline() {
        let mut store = EventFeedStore::default();
        let outcome = load(
            &mut store,
            json!([{"event_id": 2}, {"event_id": 5, "note": "null"}, {"event_id": 1}]),
            SelectionPolicy::JumpToLatest,
        );

        assert_eq!(
            outcome,
            IngestOutcome::Loaded {
                count: 2,
                arrival: NewArrival { max_id: 2, is_new_arrival: false }
            }
        );
        assert_eq!(ids(&store), vec![1, 2]);
        assert_eq!(store.selected_index(), 1);
        assert_eq!(store.last_max_id(), 2);
        assert_eq!(store.status_message(), "OK • 2 valid events");
    }

    #[test]
    fn test_new_arrival_status() {
        let mut store = EventFeedStore::default();
        load(&mut store, json!([{"event_id": 5}]), SelectionPolicy::Preserve);
        load(&mut store, json!([{"event_id": 5}, {"event_id": 7}]), SelectionPolicy::Preserve);

        assert_eq!(store.last_max_id(), 7);
        assert_eq!(store.status_message(), "✅ New entry detected: id=7");
    }

    #[test]
    fn test_failed_fetch_keeps_everything() {
        let mut store = EventFeedStore::default();
        load(&mut store, json!([{"event_id": 1}, {"event_id": 4}]), SelectionPolicy::Preserve);
        store.set_selected_index(1);

        assert!(store.begin_fetch("retry"));
        let outcome = store.apply_fetch(Err(FeedError::Status(500)), SelectionPolicy::JumpToLatest);

        assert_eq!(outcome, IngestOutcome::Failed { reason: "HTTP 500".to_string() });
        assert_eq!(ids(&store), vec![1, 4]);
        assert_eq!(store.last_max_id(), 4);
        assert_eq!(store.selected_index(), 1);
        assert_eq!(store.status_message(), "Fetch error: HTTP 500");
        assert!(!store.is_fetching());
    }

    #[test]
    fn test_selection_follows_record() {
        let mut store = EventFeedStore::default();
        load(&mut store, json!([{"event_id": 3}, {"event_id": 7}]), SelectionPolicy::Preserve);
        store.set_selected_index(1);

        load(
            &mut store,
            json!([{"event_id": 7}, {"event_id": 1}, {"event_id": 3}]),
            SelectionPolicy::Preserve,
        );
        assert_eq!(ids(&store), vec![1, 3, 7]);
        assert_eq!(store.selected().map(|e| e.event_id), Some(7));
        assert_eq!(store.selected_index(), 2);
    }

    #[test]
    fn test_selected_index_clamped_on_read() {
        let mut store = EventFeedStore::default();
        load(&mut store, json!([{"event_id": 1}, {"event_id": 2}]), SelectionPolicy::Preserve);

        store.set_selected_index(40);
        assert_eq!(store.selected_index(), 1);

        load(&mut store, json!([]), SelectionPolicy::Preserve);
        assert_eq!(store.selected_index(), 0);
        assert!(store.selected().is_none());
    }

    #[test]
    fn test_absent_readings_policy_is_applied() {
        let mut store = EventFeedStore::new(MissingReadings::Absent);
        load(&mut store, json!([{"event_id": 1, "humidity_pct": "n/a"}]), SelectionPolicy::Preserve);
        assert_eq!(store.display_list()[0].humidity_pct, None);
    }
}
