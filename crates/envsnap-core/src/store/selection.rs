use crate::models::NormalizedEvent;

/// What the view should do with the selection after the set is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Keep the selected record, wherever it moved to.
    #[default]
    Preserve,
    /// Always select the newest record (first load).
    JumpToLatest,
    /// Select the newest record only if the set got longer (burst polling).
    JumpToLatestOnGrowth,
}

/// Selection state captured just before a set replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreviousSelection {
    pub event_id: Option<i64>,
    pub index: usize,
    pub len: usize,
}

/// Pick the index to select in `new_set`. Rules, first match wins:
/// empty set → 0; `JumpToLatest` → last; `JumpToLatestOnGrowth` with a longer
/// set → last; previously selected id still present → its new index;
/// otherwise the previous index clamped into range.
pub fn resolve_selection(
    previous: &PreviousSelection,
    new_set: &[NormalizedEvent],
    policy: SelectionPolicy,
) -> usize {
    if new_set.is_empty() {
        return 0;
    }
    let last = new_set.len() - 1;

    match policy {
        SelectionPolicy::JumpToLatest => return last,
        SelectionPolicy::JumpToLatestOnGrowth if new_set.len() > previous.len => return last,
        _ => {}
    }

    previous
        .event_id
        .and_then(|id| new_set.iter().position(|e| e.event_id == id))
        .unwrap_or_else(|| previous.index.min(last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissingReadings, RawEventRecord};
    use serde_json::json;

    fn set(ids: &[i64]) -> Vec<NormalizedEvent> {
        ids.iter()
            .map(|id| {
                NormalizedEvent::from_raw(
                    &RawEventRecord::from_value(&json!({ "event_id": id })),
                    MissingReadings::Zero,
                )
            })
            .collect()
    }

    fn previous(event_id: Option<i64>, index: usize, len: usize) -> PreviousSelection {
        PreviousSelection { event_id, index, len }
    }

    #[test]
    fn test_empty_set_selects_zero() {
        let idx = resolve_selection(&previous(Some(3), 5, 6), &[], SelectionPolicy::JumpToLatest);
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_jump_to_latest() {
        let idx = resolve_selection(&previous(Some(1), 0, 3), &set(&[1, 2, 3]), SelectionPolicy::JumpToLatest);
        assert_eq!(idx, 2);
    }

    #[test]
    fn test_jump_on_growth_only_when_grown() {
        let grown = resolve_selection(
            &previous(Some(1), 0, 2),
            &set(&[1, 2, 3]),
            SelectionPolicy::JumpToLatestOnGrowth,
        );
        assert_eq!(grown, 2);

        let same = resolve_selection(
            &previous(Some(1), 0, 3),
            &set(&[1, 2, 3]),
            SelectionPolicy::JumpToLatestOnGrowth,
        );
        assert_eq!(same, 0);
    }

    #[test]
    fn test_selection_follows_id_across_reorder() {
        // id 7 was at index 1; a lower id arrived so it moved to index 2
        let idx = resolve_selection(&previous(Some(7), 1, 3), &set(&[2, 5, 7, 9]), SelectionPolicy::Preserve);
        assert_eq!(idx, 2);
    }

    #[test]
    fn test_missing_id_clamps_previous_index() {
        let idx = resolve_selection(&previous(Some(42), 5, 6), &set(&[1, 2, 3]), SelectionPolicy::Preserve);
        assert_eq!(idx, 2);

        let idx = resolve_selection(&previous(None, 1, 0), &set(&[1, 2, 3]), SelectionPolicy::Preserve);
        assert_eq!(idx, 1);
    }
}
