use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::HIDDEN_NOTE_SENTINEL;
use crate::models::lenient::{coerce_string, parse_float, parse_int};

/// One row of the feed exactly as it arrived. Every field is optional and
/// loosely typed; nothing here is trusted until it goes through
/// [`NormalizedEvent::from_raw`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventRecord {
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub event_id: Option<Value>,
    #[serde(default)]
    pub temp_c: Option<Value>,
    #[serde(default)]
    pub temp_f: Option<Value>,
    #[serde(default)]
    pub humidity_pct: Option<Value>,
    #[serde(default)]
    pub sound_loudness: Option<Value>,
    #[serde(default)]
    pub note: Option<Value>,
    #[serde(default)]
    pub photo_url: Option<Value>,
}

impl RawEventRecord {
    /// Build a record from an arbitrary array element. Anything that is not a
    /// JSON object yields a record with every field absent.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value.clone()).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

/// How an unparsable or missing reading is represented after normalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingReadings {
    /// Store `0.0`. A missing humidity is indistinguishable from 0 %.
    #[default]
    Zero,
    /// Store `None` so the viewer can show the reading as absent.
    Absent,
}

impl MissingReadings {
    fn apply(self, reading: Option<f64>) -> Option<f64> {
        match self {
            MissingReadings::Zero => Some(reading.unwrap_or(0.0)),
            MissingReadings::Absent => reading,
        }
    }
}

/// A feed record after soft defaulting. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedEvent {
    pub created_at: String,
    pub event_id: i64,
    pub temp_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub sound_loudness: Option<f64>,
    pub note: String,
    pub note_word_count: usize,
    pub photo_url: String,
}

impl NormalizedEvent {
    pub fn from_raw(raw: &RawEventRecord, missing: MissingReadings) -> Self {
        let note = coerce_string(raw.note.as_ref());
        let note_word_count = word_count(&note);

        // Older sheets only carry Fahrenheit
        let temp_c = parse_float(raw.temp_c.as_ref()).or_else(|| {
            parse_float(raw.temp_f.as_ref()).map(|f| (f - 32.0) * 5.0 / 9.0)
        });

        Self {
            created_at: coerce_string(raw.created_at.as_ref()),
            event_id: parse_int(raw.event_id.as_ref()).unwrap_or(0),
            temp_c: missing.apply(temp_c),
            humidity_pct: missing.apply(parse_float(raw.humidity_pct.as_ref())),
            sound_loudness: missing.apply(parse_float(raw.sound_loudness.as_ref())),
            note,
            note_word_count,
            photo_url: coerce_string(raw.photo_url.as_ref()),
        }
    }

    /// True when the upstream sheet marked this row as hidden.
    pub fn is_hidden(&self) -> bool {
        self.note == HIDDEN_NOTE_SENTINEL
    }

    /// True when nobody has attached a note yet.
    pub fn needs_note(&self) -> bool {
        self.note.trim().is_empty()
    }
}

/// Number of maximal runs of non-whitespace characters in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
