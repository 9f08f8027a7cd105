pub mod top_k;

#[cfg(feature = "concurrency")]
pub use top_k::ConcurrentTopKTracker;
pub use top_k::{DEFAULT_K, TopKTracker, TopKTrackerBuilder};
