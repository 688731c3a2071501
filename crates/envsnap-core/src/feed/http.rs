use std::time::{Duration, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tracing::debug;

use crate::constants::CACHE_BUST_PARAM;
use crate::feed::{decode_bytes, FeedError, FeedSource};
use crate::models::RawEventRecord;

/// Feed served over HTTP GET, typically a spreadsheet web app.
pub struct HttpFeedSource {
    url: String,
    cache_bust: bool,
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>, timeout: Duration, cache_bust: bool) -> Result<Self, FeedError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        Ok(Self {
            url: url.into(),
            cache_bust,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> Result<Vec<RawEventRecord>, FeedError> {
        let mut request = self.client.get(&self.url);
        if self.cache_bust {
            let millis = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default();
            request = request.query(&[(CACHE_BUST_PARAM, millis.to_string())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FeedError::Transport(e.to_string()))?;
        debug!(url = %self.url, bytes = body.len(), "feed response received");

        decode_bytes(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use serde_json::json;

    fn source(server: &MockServer, cache_bust: bool) -> HttpFeedSource {
        HttpFeedSource::new(server.url("/exec"), Duration::from_secs(5), cache_bust)
            .expect("client should build")
    }

    #[tokio::test]
    async fn test_fetch_array_with_cache_bust() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/exec").query_param_exists("t");
            then.status(200)
                .json_body(json!([{"event_id": 1, "note": ""}, {"event_id": 2}]));
        });

        let records = source(&server, true).fetch().await.expect("fetch should succeed");

        mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event_id, Some(json!(1)));
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(503).body("busy");
        });

        let err = source(&server, false).fetch().await.unwrap_err();
        assert_eq!(err, FeedError::Status(503));
        assert_eq!(err.to_string(), "HTTP 503");
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(200).body("<html>Sign in</html>");
        });

        let err = source(&server, false).fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::MalformedJson(_)));
    }

    #[tokio::test]
    async fn test_fetch_non_array_json() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/exec");
            then.status(200).json_body(json!({"error": "Script function not found"}));
        });

        let err = source(&server, false).fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::UnrecognizedShape(_)));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host() {
        let source = HttpFeedSource::new("http://127.0.0.1:9/exec", Duration::from_secs(2), false)
            .expect("client should build");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FeedError::Transport(_)));
    }
}
