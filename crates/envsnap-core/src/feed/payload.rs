//! Payload shape decoding.
//!
//! Accepted shapes, tried in this order:
//! 1. a JSON array of records;
//! 2. an object whose `events`, `presets` or `robots` key holds an array;
//! 3. a non-empty object whose keys are all non-negative integers, taken in
//!    ascending key order.
//!
//! Anything else is [`FeedError::UnrecognizedShape`].

use serde_json::{Map, Value};

use crate::feed::FeedError;
use crate::models::RawEventRecord;

const LIST_KEYS: [&str; 3] = ["events", "presets", "robots"];

pub fn decode_bytes(body: &[u8]) -> Result<Vec<RawEventRecord>, FeedError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| FeedError::MalformedJson(e.to_string()))?;
    decode_payload(&value)
}

pub fn decode_payload(value: &Value) -> Result<Vec<RawEventRecord>, FeedError> {
    match value {
        Value::Array(items) => Ok(records(items.iter())),
        Value::Object(map) => decode_object(map),
        other => Err(FeedError::UnrecognizedShape(format!(
            "expected an array, got {}",
            kind_name(other)
        ))),
    }
}

fn decode_object(map: &Map<String, Value>) -> Result<Vec<RawEventRecord>, FeedError> {
    for key in LIST_KEYS {
        if let Some(Value::Array(items)) = map.get(key) {
            return Ok(records(items.iter()));
        }
    }

    if !map.is_empty() {
        let keyed: Option<Vec<(u64, &Value)>> = map
            .iter()
            .map(|(k, v)| k.parse::<u64>().ok().map(|idx| (idx, v)))
            .collect();
        if let Some(mut keyed) = keyed {
            keyed.sort_by_key(|(idx, _)| *idx);
            return Ok(records(keyed.into_iter().map(|(_, v)| v)));
        }
    }

    Err(FeedError::UnrecognizedShape(
        "object without an events, presets or robots array".to_string(),
    ))
}

fn records<'a>(items: impl Iterator<Item = &'a Value>) -> Vec<RawEventRecord> {
    items.map(RawEventRecord::from_value).collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
