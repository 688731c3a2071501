pub mod http;
pub mod local;
pub mod payload;

use async_trait::async_trait;

use crate::models::RawEventRecord;

pub use http::HttpFeedSource;
pub use local::{FileFeedSource, StaticFeedSource};
pub use payload::{decode_bytes, decode_payload};

/// Why a fetch produced no usable record list. The store turns every variant
/// into a status message; none of them escape to the UI as a failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FeedError {
    #[error("{0}")]
    Transport(String),
    #[error("HTTP {0}")]
    Status(u16),
    #[error("malformed JSON: {0}")]
    MalformedJson(String),
    #[error("unrecognized payload shape: {0}")]
    UnrecognizedShape(String),
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// Somewhere the raw record list can be fetched from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError>;

    /// Short human-readable origin, used in logs and the viewer header.
    fn describe(&self) -> String;

    /// Whether the contents can change between fetches. Polling a source
    /// that never changes cannot find a new record.
    fn is_live(&self) -> bool {
        true
    }
}
