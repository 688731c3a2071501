use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::burst::BurstSchedule;
use crate::constants::{POLL_INTERVAL_MS, POLL_TOTAL_MS, REQUEST_TIMEOUT_MS};
use crate::feed::{FeedSource, FileFeedSource, HttpFeedSource, StaticFeedSource};
use crate::models::MissingReadings;

/// Environment variable that overrides `feedUrl`
pub const FEED_URL_ENV: &str = "ENVSNAP_FEED_URL";

/// Feed configuration that can be loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeedConfig {
    /// Remote feed endpoint (spreadsheet web app URL)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,

    /// Local JSON file used instead of a remote feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mock_file: Option<PathBuf>,

    /// Append a timestamp query parameter to every request
    pub cache_bust: bool,

    pub poll_interval_ms: u64,
    pub poll_total_ms: u64,
    pub request_timeout_ms: u64,

    pub missing_readings: MissingReadings,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_url: None,
            mock_file: None,
            cache_bust: true,
            poll_interval_ms: POLL_INTERVAL_MS,
            poll_total_ms: POLL_TOTAL_MS,
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            missing_readings: MissingReadings::default(),
        }
    }
}

impl FeedConfig {
    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: FeedConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides on top of file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(FEED_URL_ENV) {
            if !url.trim().is_empty() {
                self.feed_url = Some(url);
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            anyhow::bail!("pollIntervalMs must be greater than zero");
        }
        if self.poll_total_ms < self.poll_interval_ms {
            anyhow::bail!(
                "pollTotalMs ({}) must be at least pollIntervalMs ({})",
                self.poll_total_ms,
                self.poll_interval_ms
            );
        }
        if self.request_timeout_ms == 0 {
            anyhow::bail!("requestTimeoutMs must be greater than zero");
        }
        Ok(())
    }

    pub fn burst_schedule(&self) -> BurstSchedule {
        BurstSchedule::from_millis(self.poll_interval_ms, self.poll_total_ms)
    }

    /// Pick the feed source: remote URL first, then a local file, then the
    /// built-in demo data.
    pub fn build_source(&self) -> Result<Arc<dyn FeedSource>> {
        if let Some(url) = self.feed_url.as_deref() {
            let source = HttpFeedSource::new(
                url,
                Duration::from_millis(self.request_timeout_ms),
                self.cache_bust,
            )
            .context("Failed to build HTTP client")?;
            return Ok(Arc::new(source));
        }
        if let Some(path) = self.mock_file.as_ref() {
            return Ok(Arc::new(FileFeedSource::new(path)));
        }
        Ok(Arc::new(StaticFeedSource::demo()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_config_minimal() {
        let config: FeedConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, FeedConfig::default());
        assert!(config.cache_bust);
        assert_eq!(config.burst_schedule(), BurstSchedule::default());
    }

    #[test]
    fn test_parse_config_full() {
        let json = r#"{
            "feedUrl": "https://script.example.com/exec",
            "cacheBust": false,
            "pollIntervalMs": 1000,
            "pollTotalMs": 5000,
            "missingReadings": "absent"
        }"#;
        let config: FeedConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.feed_url.as_deref(), Some("https://script.example.com/exec"));
        assert!(!config.cache_bust);
        assert_eq!(config.missing_readings, MissingReadings::Absent);
        assert_eq!(config.burst_schedule(), BurstSchedule::from_millis(1000, 5000));
        assert_eq!(config.request_timeout_ms, REQUEST_TIMEOUT_MS);
    }

    #[test]
    fn test_load_rejects_zero_interval() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("envsnap.json");
        std::fs::write(&path, r#"{"pollIntervalMs": 0}"#).unwrap();

        let err = FeedConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("pollIntervalMs"));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("envsnap.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FeedConfig::load(&path).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }

    #[test]
    fn test_build_source_precedence() {
        let mut config = FeedConfig {
            mock_file: Some(PathBuf::from("/tmp/feed.json")),
            ..FeedConfig::default()
        };
        assert_eq!(config.build_source().unwrap().describe(), "/tmp/feed.json");

        config.feed_url = Some("http://localhost:8080/exec".to_string());
        assert_eq!(
            config.build_source().unwrap().describe(),
            "http://localhost:8080/exec"
        );

        assert_eq!(
            FeedConfig::default().build_source().unwrap().describe(),
            "demo data"
        );
    }
}
