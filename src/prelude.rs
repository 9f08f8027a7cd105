pub use crate::ds::{Admission, TopKHeap};
pub use crate::error::{ClickError, ClickErrorKind, ConfigError, InvariantError};
pub use crate::store::{CounterMap, CounterSaturated};
pub use crate::tracker::{DEFAULT_K, TopKTracker, TopKTrackerBuilder};
pub use crate::traits::{CoreTracker, ItemId, TopKQuery};

#[cfg(feature = "concurrency")]
pub use crate::tracker::ConcurrentTopKTracker;
#[cfg(feature = "concurrency")]
pub use crate::traits::ConcurrentTracker;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TrackerMetricsSnapshot;
