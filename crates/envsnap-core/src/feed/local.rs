use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::constants::DEMO_FEED_JSON;
use crate::feed::{decode_bytes, FeedError, FeedSource};
use crate::models::RawEventRecord;

/// Serves a fixed JSON body. Used for the built-in demo data set.
pub struct StaticFeedSource {
    body: String,
    label: String,
}

impl StaticFeedSource {
    pub fn new(body: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            label: label.into(),
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_FEED_JSON, "demo data")
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError> {
        decode_bytes(self.body.as_bytes())
    }

    fn describe(&self) -> String {
        self.label.clone()
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// Re-reads a JSON file on every fetch, so editing the file while the viewer
/// runs behaves like new rows arriving upstream.
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError> {
        let body = tokio::fs::read(&self.path).await.map_err(|e| FeedError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })?;
        decode_bytes(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
