pub mod event_feed_store;
pub mod ingest;
pub mod selection;

pub use event_feed_store::{EventFeedStore, IngestOutcome};
pub use ingest::{detect_new_arrival, ingest_records, ingest_value, NewArrival};
pub use selection::{resolve_selection, PreviousSelection, SelectionPolicy};
