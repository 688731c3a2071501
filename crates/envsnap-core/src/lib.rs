pub mod burst;
pub mod config;
pub mod constants;
pub mod events;
pub mod feed;
pub mod models;
pub mod runtime;
pub mod store;
pub mod tracing_setup;

pub use burst::{BurstHandle, BurstOutcome, BurstSchedule};
pub use config::FeedConfig;
pub use events::FeedChange;
pub use feed::{FeedError, FeedSource};
pub use models::{MissingReadings, NormalizedEvent, RawEventRecord};
pub use runtime::FeedRuntime;
pub use store::{EventFeedStore, SelectionPolicy};
