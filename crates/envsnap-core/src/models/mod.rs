pub mod event;
pub mod lenient;

pub use event::{word_count, MissingReadings, NormalizedEvent, RawEventRecord};
