use serde_json::Value;

use crate::models::{MissingReadings, NormalizedEvent, RawEventRecord};

/// Normalize, drop hidden rows, and order by id. The sort is stable, so rows
/// sharing an id keep their upstream order.
pub fn ingest_records(records: &[RawEventRecord], missing: MissingReadings) -> Vec<NormalizedEvent> {
    let mut events: Vec<NormalizedEvent> = records
        .iter()
        .map(|raw| NormalizedEvent::from_raw(raw, missing))
        .filter(|event| !event.is_hidden())
        .collect();
    events.sort_by_key(|event| event.event_id);
    events
}

/// Same as [`ingest_records`] for an undecoded value. Anything but an array
/// ingests as an empty set.
pub fn ingest_value(value: &Value, missing: MissingReadings) -> Vec<NormalizedEvent> {
    match value {
        Value::Array(items) => {
            let records: Vec<RawEventRecord> = items.iter().map(RawEventRecord::from_value).collect();
            ingest_records(&records, missing)
        }
        _ => Vec::new(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewArrival {
    pub max_id: i64,
    pub is_new_arrival: bool,
}

/// Compare the set's highest id with the last one seen. A previous max of 0
/// means nothing was loaded yet, so the first load is a baseline and never an
/// arrival.
pub fn detect_new_arrival(previous_max_id: i64, events: &[NormalizedEvent]) -> NewArrival {
    let max_id = events.iter().fold(0, |max, e| max.max(e.event_id));
    NewArrival {
        max_id,
        is_new_arrival: previous_max_id != 0 && max_id > previous_max_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ingest(value: Value) -> Vec<NormalizedEvent> {
        ingest_value(&value, MissingReadings::Zero)
    }

    fn ids(events: &[NormalizedEvent]) -> Vec<i64> {
        events.iter().map(|e| e.event_id).collect()
    }

    #[test]
    fn test_sentinel_rows_are_dropped() {
        let events = ingest(json!([
            {"event_id": 1, "note": "null", "temp_c": 40},
            {"event_id": 2, "note": "kept"},
            {"event_id": 3, "note": "NULL"}
        ]));
        assert_eq!(ids(&events), vec![2, 3]);
    }

    #[test]
    fn test_empty_note_rows_are_kept() {
        let events = ingest(json!([{"event_id": 1, "note": ""}, {"event_id": 2}]));
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.note_word_count == 0));
    }

    #[test]
    fn test_sorted_by_id() {
        let events = ingest(json!([{"event_id": 3}, {"event_id": 1}, {"event_id": 2}]));
        assert_eq!(ids(&events), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_is_stable_for_duplicate_ids() {
        let events = ingest(json!([
            {"event_id": 2, "note": "A"},
            {"event_id": 2, "note": "B"},
            {"event_id": 1, "note": "C"}
        ]));
        let notes: Vec<&str> = events.iter().map(|e| e.note.as_str()).collect();
        assert_eq!(notes, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_non_array_ingests_empty() {
        assert!(ingest(json!({"event_id": 1})).is_empty());
        assert!(ingest(Value::Null).is_empty());
    }

    #[test]
    fn test_end_to_end_scenario() {
        let events = ingest(json!([
            {"event_id": "2", "note": "null"},
            {"event_id": 1, "note": ""},
            {"event_id": 3, "note": "hi there"}
        ]));

        assert_eq!(events.len(), 2);
        assert_eq!((events[0].event_id, events[0].note.as_str(), events[0].note_word_count), (1, "", 0));
        assert_eq!(
            (events[1].event_id, events[1].note.as_str(), events[1].note_word_count),
            (3, "hi there", 2)
        );
    }

    #[test]
    fn test_first_load_is_not_an_arrival() {
        let events = ingest(json!([{"event_id": 5}, {"event_id": 2}]));
        assert_eq!(
            detect_new_arrival(0, &events),
            NewArrival { max_id: 5, is_new_arrival: false }
        );
    }

    #[test]
    fn test_higher_id_is_an_arrival() {
        let events = ingest(json!([{"event_id": 7}]));
        assert_eq!(
            detect_new_arrival(5, &events),
            NewArrival { max_id: 7, is_new_arrival: true }
        );
        assert!(!detect_new_arrival(7, &events).is_new_arrival);
    }

    #[test]
    fn test_empty_and_negative_sets_have_zero_max() {
        assert_eq!(detect_new_arrival(3, &[]).max_id, 0);
        let events = ingest(json!([{"event_id": -4}]));
        assert_eq!(detect_new_arrival(0, &events).max_id, 0);
    }
}
