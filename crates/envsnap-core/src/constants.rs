//! Application-wide constants
//!
//! Centralized location for the sentinel values, timing defaults and status
//! texts shared by the store, the runtime and the viewer.

/// Note value the upstream sheet uses to hide a record from display
pub const HIDDEN_NOTE_SENTINEL: &str = "null";

/// Query parameter appended to feed URLs to defeat intermediary caches
pub const CACHE_BUST_PARAM: &str = "t";

// Polling burst defaults
pub const POLL_INTERVAL_MS: u64 = 3_000;
pub const POLL_TOTAL_MS: u64 = 15_000;

/// HTTP request timeout for a single feed fetch
pub const REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Word count at which the note stem stops growing in the viewer
pub const MAX_STEM_WORDS: usize = 60;

// Status texts
pub mod status {
    pub const NOT_LOADED: &str = "Not loaded yet.";
    pub const CHECK_CANCELLED: &str = "Check cancelled.";
}

/// Built-in demo data set, served by the static feed source when no URL is
/// configured. Record 9 carries the hidden-note sentinel and record 2 an
/// empty note that must stay visible.
pub const DEMO_FEED_JSON: &str = r#"[
  {"created_at": "2025-12-12T07:52:10", "event_id": 1, "temp_c": 21.2, "humidity_pct": 18.0, "sound_loudness": 8, "note": "Quiet indoor morning. Heater running.", "photo_url": ""},
  {"created_at": "2025-12-12T08:15:42", "event_id": 2, "temp_c": 20.1, "humidity_pct": 23.0, "sound_loudness": 14, "note": "", "photo_url": ""},
  {"created_at": "2025-12-12T09:03:11", "event_id": 3, "temp_c": 3.4, "humidity_pct": 68.0, "sound_loudness": 22, "note": "Outside walk. Windy and damp. Light traffic.", "photo_url": ""},
  {"created_at": "2025-12-12T09:55:09", "event_id": 4, "temp_c": -5.8, "humidity_pct": 54.0, "sound_loudness": 19, "note": "Cold street. Crunchy steps. Few cars.", "photo_url": ""},
  {"created_at": "2025-12-12T10:40:50", "event_id": 5, "temp_c": 24.6, "humidity_pct": 13.0, "sound_loudness": 11, "note": "Very dry indoor air. Felt static on clothes.", "photo_url": ""},
  {"created_at": "2025-12-12T12:18:33", "event_id": 6, "temp_c": 17.2, "humidity_pct": 42.0, "sound_loudness": 47, "note": "Café/lobby chatter. Espresso machine bursts.", "photo_url": ""},
  {"created_at": "2025-12-12T14:06:27", "event_id": 7, "temp_c": 1.1, "humidity_pct": 79.0, "sound_loudness": 28, "note": "Snowy sidewalk. Quiet, occasional bus rumble.", "photo_url": ""},
  {"created_at": "2025-12-12T16:02:40", "event_id": 8, "temp_c": 7.9, "humidity_pct": 61.0, "sound_loudness": 74, "note": "Busy intersection. Siren spike + crosswalk beeps.", "photo_url": ""},
  {"created_at": "2025-12-12T18:30:05", "event_id": 9, "temp_c": 19.8, "humidity_pct": 31.0, "sound_loudness": 16, "note": "null", "photo_url": ""},
  {"created_at": "2025-12-12T21:12:18", "event_id": 10, "temp_c": 22.9, "humidity_pct": 36.0, "sound_loudness": 91, "note": "Crowded indoor room. Music + overlapping voices.", "photo_url": ""}
]"#;
