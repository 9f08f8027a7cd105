//! Top-K click tracking over an authoritative counter store.
//!
//! ## Architecture
//!
//! [`TopKTracker`] couples two structures that must move in lock-step:
//!
//! ```text
//!                         record_click(id)                 top_k()
//!                               │                             │
//!                               ▼                             ▼
//!   ┌───────────────────────────────────────────────────────────────────┐
//!   │                        one lock domain                            │
//!   │                                                                   │
//!   │   CounterMap<K>  (authoritative)      TopKHeap<K>  (≤ K members)  │
//!   │   ┌─────────────────────────┐         ┌────────────────────────┐  │
//!   │   │ id → cumulative count   │ ──────► │ the K highest counts,  │  │
//!   │   │ grow-only, checked +1   │ repair  │ duplicate-free,        │  │
//!   │   └─────────────────────────┘         │ id tie-break           │  │
//!   │                                       └────────────────────────┘  │
//!   └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every click increments the store first, then repairs the index
//! incrementally (side-map update, spare-capacity admit, or displacement of
//! the weakest member). There is no full rebuild on the write path, and no
//! rescan of the store on the read path.
//!
//! ## Maintenance rules (per click, new count `c` for id `x`)
//!
//! 1. `x` in the index → update its recorded count in place.
//! 2. Index below K → admit `(c, x)`.
//! 3. Index full and `(c, x)` **outranks** the weakest member (higher
//!    count, or equal count and smaller id) → evict the weakest, admit
//!    `(c, x)`.
//! 4. Otherwise → no index change.
//!
//! One ordering rule serves both membership and results: count descending,
//! id ascending. The weakest member is the last entry in that order, and
//! admission compares against it, so the index always holds the exact items
//! a full sort of the store would rank first.
//!
//! ## Core Operations
//!
//! | Operation      | Complexity                 | Locking (concurrent)    |
//! |----------------|----------------------------|-------------------------|
//! | `record_click` | O(log K) amortized         | write                   |
//! | `top_k`        | O(K log K)                 | read                    |
//! | `count`        | O(1)                       | read                    |
//!
//! ## Failure ordering
//!
//! `record_click` validates the id, then performs the checked increment,
//! and only then touches the index; the repair step itself cannot fail. A
//! failed call therefore leaves both structures exactly as they were, and
//! no interleaving can observe the store incremented but the index not yet
//! repaired.
//!
//! ## Example Usage
//!
//! ```
//! use trendkit::tracker::TopKTracker;
//!
//! let mut clicks: TopKTracker<&str> = TopKTracker::new(2);
//! for id in ["a", "b", "a", "c", "c", "c"] {
//!     clicks.record_click(id).unwrap();
//! }
//! assert_eq!(clicks.top_k(), vec![("c", 3), ("a", 2)]);
//! ```
//!
//! ## Thread Safety
//!
//! `TopKTracker` is single-threaded (`&mut self` writes). Share
//! [`ConcurrentTopKTracker`] across threads instead: one `RwLock` guards the
//! (store, index) pair, writers exclusive, the read-only query path on the
//! shared side. The lock is deliberately not split per structure; readers
//! must never observe a torn pair.

#[cfg(feature = "concurrency")]
use std::fmt;
#[cfg(feature = "concurrency")]
use std::sync::Arc;

#[cfg(feature = "concurrency")]
use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

#[cfg(feature = "metrics")]
use crate::ds::top_k_heap::Admission;
use crate::ds::top_k_heap::TopKHeap;
use crate::error::{ClickError, ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::TrackerMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::TrackerMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, TrackerMetricsReadRecorder, TrackerMetricsRecorder,
};
use crate::store::counters::CounterMap;
#[cfg(feature = "concurrency")]
use crate::traits::ConcurrentTracker;
use crate::traits::{CoreTracker, ItemId, TopKQuery};

/// Default number of ranked items a tracker retains.
pub const DEFAULT_K: usize = 10;

const INVALID_ID_MSG: &str = "item id is empty or otherwise invalid";
const OVERFLOW_MSG: &str = "click counter for item is at u64::MAX and cannot grow";

// ---------------------------------------------------------------------------
// Core tracker
// ---------------------------------------------------------------------------

/// Single-threaded top-K click tracker.
///
/// Counts every click per item in a grow-only store and keeps the K
/// most-clicked items queryable without rescanning the store. K is fixed at
/// construction (≥ 1, default [`DEFAULT_K`]).
///
/// # Example
///
/// ```
/// use trendkit::tracker::TopKTracker;
///
/// let mut tracker: TopKTracker<u64> = TopKTracker::new(10);
/// tracker.record_click(101).unwrap();
/// tracker.record_click(103).unwrap();
/// tracker.record_click(103).unwrap();
/// assert_eq!(tracker.top_k(), vec![(103, 2), (101, 1)]);
/// assert_eq!(tracker.count(&101), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct TopKTracker<K> {
    counters: CounterMap<K, FxBuildHasher>,
    index: TopKHeap<K>,
    #[cfg(feature = "metrics")]
    metrics: TrackerMetrics,
}

impl<K: ItemId> TopKTracker<K> {
    /// Creates a tracker retaining the top `k` items.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero. See [`try_new`](Self::try_new).
    pub fn new(k: usize) -> Self {
        match Self::try_new(k) {
            Ok(tracker) => tracker,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a tracker retaining the top `k` items, returning an error on
    /// invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `k` is zero.
    pub fn try_new(k: usize) -> Result<Self, ConfigError> {
        Self::try_with_expected_items(k, 0)
    }

    /// Creates a tracker pre-sized for `expected_items` distinct ids.
    ///
    /// The hint only pre-allocates the counter store; it does not bound it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `k` is zero.
    pub fn try_with_expected_items(k: usize, expected_items: usize) -> Result<Self, ConfigError> {
        if k == 0 {
            return Err(ConfigError::new("k must be greater than zero"));
        }
        Ok(Self {
            counters: CounterMap::with_capacity_and_hasher(expected_items, FxBuildHasher),
            index: TopKHeap::new(k),
            #[cfg(feature = "metrics")]
            metrics: TrackerMetrics::new(),
        })
    }

    /// Returns a builder for configuring tracker parameters.
    pub fn builder() -> TopKTrackerBuilder {
        TopKTrackerBuilder::new()
    }

    /// Records one click for `id`, returning the new authoritative count.
    ///
    /// The first click on an id creates its entry at 1; every later click
    /// adds exactly 1. The top-K index is repaired in the same call.
    ///
    /// # Errors
    ///
    /// - [`ClickError::invalid_id`] if the id fails boundary validation
    ///   (e.g. an empty string).
    /// - [`ClickError::counter_overflow`] if the id's counter is at
    ///   `u64::MAX`. Counts never wrap.
    ///
    /// Either way the tracker is untouched by the failed call.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::tracker::TopKTracker;
    ///
    /// let mut tracker: TopKTracker<String> = TopKTracker::new(10);
    /// assert_eq!(tracker.record_click("widget".to_string()), Ok(1));
    /// assert_eq!(tracker.record_click("widget".to_string()), Ok(2));
    /// assert!(tracker.record_click(String::new()).is_err());
    /// ```
    pub fn record_click(&mut self, id: K) -> Result<u64, ClickError> {
        if !id.is_valid() {
            #[cfg(feature = "metrics")]
            self.metrics.record_invalid_id();
            return Err(ClickError::invalid_id(INVALID_ID_MSG));
        }

        let count = match self.counters.increment(&id) {
            Ok(count) => count,
            Err(_saturated) => {
                #[cfg(feature = "metrics")]
                self.metrics.record_counter_overflow();
                return Err(ClickError::counter_overflow(OVERFLOW_MSG));
            },
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.record_click_accepted();
            if count == 1 {
                self.metrics.record_item_created();
            }
        }

        // Infallible from here on: a click is never half-applied.
        #[cfg(feature = "metrics")]
        match self.index.offer(&id, count) {
            Admission::Updated => self.metrics.record_index_update(),
            Admission::Admitted => self.metrics.record_index_admission(),
            Admission::Displaced(_) => self.metrics.record_index_displacement(),
            Admission::Rejected => self.metrics.record_index_rejection(),
        }
        #[cfg(not(feature = "metrics"))]
        self.index.offer(&id, count);

        Ok(count)
    }

    /// Returns up to K `(id, count)` pairs, count descending, id ascending
    /// on ties.
    ///
    /// The result holds `min(K, distinct_items)` pairs and is empty if no
    /// click was ever recorded. Never fails and never mutates.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::tracker::TopKTracker;
    ///
    /// let mut tracker: TopKTracker<u64> = TopKTracker::new(10);
    /// assert!(tracker.top_k().is_empty());
    /// tracker.record_click(5).unwrap();
    /// assert_eq!(tracker.top_k(), vec![(5, 1)]);
    /// ```
    pub fn top_k(&self) -> Vec<(K, u64)> {
        let ranked = self.index.ranked();
        #[cfg(feature = "metrics")]
        self.metrics.record_top_k_query(ranked.len());
        ranked
    }

    /// Returns the configured K.
    #[inline]
    pub fn k(&self) -> usize {
        self.index.limit()
    }

    /// Returns the count recorded for `id`, if it was ever clicked.
    #[inline]
    pub fn count(&self, id: &K) -> Option<u64> {
        self.counters.count(id)
    }

    /// Returns the number of distinct items ever clicked.
    #[inline]
    pub fn distinct_items(&self) -> usize {
        self.counters.len()
    }

    /// Returns the aggregate click total across all items.
    #[inline]
    pub fn total_clicks(&self) -> u64 {
        self.counters.total_clicks()
    }

    /// Returns `true` if no click was ever recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Approximate heap memory footprint of both structures, in bytes.
    pub fn approx_bytes(&self) -> usize {
        self.counters.approx_bytes() + self.index.approx_bytes()
    }

    /// Audits the tracker against its invariants.
    ///
    /// Checks that the index is exactly the full-sort top-K of the counter
    /// store (size, membership, counts, and order) and within its K bound.
    /// Intended for tests setup/teardown and fuzz harnesses; cost is
    /// O(n log n) over the whole store.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        #[cfg(debug_assertions)]
        self.index.debug_validate_invariants();

        if self.index.len() > self.k() {
            return Err(InvariantError::new(format!(
                "index holds {} members, above k = {}",
                self.index.len(),
                self.k()
            )));
        }
        let expected_len = self.k().min(self.counters.len());
        if self.index.len() != expected_len {
            return Err(InvariantError::new(format!(
                "index holds {} members, expected {}",
                self.index.len(),
                expected_len
            )));
        }
        for (id, count) in self.index.ranked() {
            match self.counters.count(&id) {
                Some(stored) if stored == count => {},
                Some(stored) => {
                    return Err(InvariantError::new(format!(
                        "index count {} diverges from stored count {}",
                        count, stored
                    )));
                },
                None => {
                    return Err(InvariantError::new(
                        "index member missing from counter store",
                    ));
                },
            }
        }
        if self.index.ranked() != self.oracle_top_k() {
            return Err(InvariantError::new(
                "index membership diverges from full-sort oracle",
            ));
        }
        Ok(())
    }

    /// Full sort of the counter store by (count desc, id asc), truncated to
    /// K. Ground truth for the audit; never used on the hot path.
    fn oracle_top_k(&self) -> Vec<(K, u64)> {
        let mut all: Vec<(K, u64)> = self
            .counters
            .iter()
            .map(|(id, count)| (id.clone(), count))
            .collect();
        all.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        all.truncate(self.k());
        all
    }

    /// Returns a point-in-time metrics snapshot.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> TrackerMetricsSnapshot {
        TrackerMetricsSnapshot {
            clicks_recorded: self.metrics.clicks_recorded,
            items_created: self.metrics.items_created,
            invalid_id_rejections: self.metrics.invalid_id_rejections,
            overflow_failures: self.metrics.overflow_failures,
            index_admissions: self.metrics.index_admissions,
            index_updates: self.metrics.index_updates,
            index_displacements: self.metrics.index_displacements,
            index_rejections: self.metrics.index_rejections,
            top_k_queries: self.metrics.top_k_queries.get(),
            top_k_items_returned: self.metrics.top_k_items_returned.get(),
            distinct_items: self.distinct_items() as u64,
            index_len: self.index.len() as u64,
            k: self.k() as u64,
            total_clicks: self.total_clicks(),
        }
    }
}

impl<K: ItemId> Default for TopKTracker<K> {
    /// Creates a tracker with K = [`DEFAULT_K`].
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

impl<K: ItemId> CoreTracker<K> for TopKTracker<K> {
    #[inline]
    fn record_click(&mut self, id: K) -> Result<u64, ClickError> {
        TopKTracker::record_click(self, id)
    }

    #[inline]
    fn count(&self, id: &K) -> Option<u64> {
        TopKTracker::count(self, id)
    }

    #[inline]
    fn distinct_items(&self) -> usize {
        TopKTracker::distinct_items(self)
    }

    #[inline]
    fn total_clicks(&self) -> u64 {
        TopKTracker::total_clicks(self)
    }
}

impl<K: ItemId> TopKQuery<K> for TopKTracker<K> {
    #[inline]
    fn top_k(&self) -> Vec<(K, u64)> {
        TopKTracker::top_k(self)
    }

    #[inline]
    fn k(&self) -> usize {
        TopKTracker::k(self)
    }
}

#[cfg(feature = "metrics")]
impl<K: ItemId> MetricsSnapshotProvider<TrackerMetricsSnapshot> for TopKTracker<K> {
    fn snapshot(&self) -> TrackerMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for configuring tracker parameters.
///
/// # Example
///
/// ```
/// use trendkit::tracker::{TopKTracker, TopKTrackerBuilder};
///
/// let tracker: TopKTracker<u64> = TopKTrackerBuilder::new()
///     .k(3)
///     .expected_items(1_000)
///     .build();
/// assert_eq!(tracker.k(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct TopKTrackerBuilder {
    k: usize,
    expected_items: usize,
}

impl TopKTrackerBuilder {
    /// Creates a builder with K = [`DEFAULT_K`] and no pre-sizing.
    pub fn new() -> Self {
        Self {
            k: DEFAULT_K,
            expected_items: 0,
        }
    }

    /// Sets how many ranked items the tracker retains.
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Pre-sizes the counter store for an expected distinct-item universe.
    pub fn expected_items(mut self, expected_items: usize) -> Self {
        self.expected_items = expected_items;
        self
    }

    /// Builds a single-threaded tracker.
    ///
    /// # Panics
    ///
    /// Panics if the configured K is invalid. For a non-panicking
    /// alternative, use [`try_build`](Self::try_build).
    pub fn build<K: ItemId>(self) -> TopKTracker<K> {
        match self.try_build() {
            Ok(tracker) => tracker,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a single-threaded tracker, returning an error on invalid
    /// parameters instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured K is zero.
    pub fn try_build<K: ItemId>(self) -> Result<TopKTracker<K>, ConfigError> {
        TopKTracker::try_with_expected_items(self.k, self.expected_items)
    }

    /// Builds a thread-safe tracker.
    ///
    /// # Panics
    ///
    /// Panics if the configured K is invalid. For a non-panicking
    /// alternative, use [`try_build_concurrent`](Self::try_build_concurrent).
    #[cfg(feature = "concurrency")]
    pub fn build_concurrent<K: ItemId>(self) -> ConcurrentTopKTracker<K> {
        match self.try_build_concurrent() {
            Ok(tracker) => tracker,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds a thread-safe tracker, returning an error on invalid
    /// parameters instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configured K is zero.
    #[cfg(feature = "concurrency")]
    pub fn try_build_concurrent<K: ItemId>(self) -> Result<ConcurrentTopKTracker<K>, ConfigError> {
        Ok(ConcurrentTopKTracker {
            inner: Arc::new(RwLock::new(self.try_build()?)),
        })
    }
}

impl Default for TopKTrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Concurrent wrapper
// ---------------------------------------------------------------------------

/// Thread-safe top-K click tracker.
///
/// Wraps a [`TopKTracker`] behind one `parking_lot::RwLock`: `record_click`
/// takes the write lock, the query path takes the read lock, and the
/// (store, index) pair is only ever observed consistent. Clones share the
/// underlying tracker.
///
/// Lock acquisition is scoped to each call, so a panicking caller cannot
/// leave the lock held, and hold times stay within the per-operation cost
/// bounds (no user code runs under the lock).
///
/// # Example
///
/// ```
/// use std::thread;
///
/// use trendkit::tracker::ConcurrentTopKTracker;
///
/// let tracker: ConcurrentTopKTracker<u64> = ConcurrentTopKTracker::new(10);
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let tracker = tracker.clone();
///         thread::spawn(move || {
///             for _ in 0..100 {
///                 tracker.record_click(7).unwrap();
///             }
///         })
///     })
///     .collect();
/// for handle in handles {
///     handle.join().unwrap();
/// }
///
/// assert_eq!(tracker.count(&7), Some(400));
/// assert_eq!(tracker.top_k(), vec![(7, 400)]);
/// ```
#[cfg(feature = "concurrency")]
#[derive(Clone)]
pub struct ConcurrentTopKTracker<K: ItemId> {
    inner: Arc<RwLock<TopKTracker<K>>>,
}

#[cfg(feature = "concurrency")]
impl<K: ItemId> ConcurrentTopKTracker<K> {
    /// Creates a thread-safe tracker retaining the top `k` items.
    ///
    /// # Panics
    ///
    /// Panics if `k` is zero. See [`try_new`](Self::try_new).
    pub fn new(k: usize) -> Self {
        match Self::try_new(k) {
            Ok(tracker) => tracker,
            Err(e) => panic!("{}", e),
        }
    }

    /// Creates a thread-safe tracker, returning an error on invalid
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `k` is zero.
    pub fn try_new(k: usize) -> Result<Self, ConfigError> {
        Ok(Self {
            inner: Arc::new(RwLock::new(TopKTracker::try_new(k)?)),
        })
    }

    /// Returns a builder for configuring tracker parameters.
    pub fn builder() -> TopKTrackerBuilder {
        TopKTrackerBuilder::new()
    }

    /// Records one click for `id`, returning the new authoritative count.
    ///
    /// Takes the write lock for the duration of the increment and index
    /// repair. Invalid ids are rejected before the lock is acquired, so bad
    /// input never contends with real traffic.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`TopKTracker::record_click`].
    pub fn record_click(&self, id: K) -> Result<u64, ClickError> {
        if !id.is_valid() {
            return Err(ClickError::invalid_id(INVALID_ID_MSG));
        }
        self.inner.write().record_click(id)
    }

    /// Returns up to K `(id, count)` pairs, count descending, id ascending
    /// on ties. Takes the read lock; concurrent queries proceed in parallel.
    pub fn top_k(&self) -> Vec<(K, u64)> {
        self.inner.read().top_k()
    }

    /// Returns the configured K.
    pub fn k(&self) -> usize {
        self.inner.read().k()
    }

    /// Returns the count recorded for `id`, if it was ever clicked.
    pub fn count(&self, id: &K) -> Option<u64> {
        self.inner.read().count(id)
    }

    /// Returns the number of distinct items ever clicked.
    pub fn distinct_items(&self) -> usize {
        self.inner.read().distinct_items()
    }

    /// Returns the aggregate click total across all items.
    pub fn total_clicks(&self) -> u64 {
        self.inner.read().total_clicks()
    }

    /// Returns `true` if no click was ever recorded.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Approximate heap memory footprint of the shared tracker, in bytes.
    pub fn approx_bytes(&self) -> usize {
        self.inner.read().approx_bytes()
    }

    /// Audits the shared tracker under the read lock.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] describing the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.inner.read().check_invariants()
    }

    /// Returns a point-in-time metrics snapshot under the read lock.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> TrackerMetricsSnapshot {
        self.inner.read().metrics_snapshot()
    }
}

#[cfg(feature = "concurrency")]
impl<K: ItemId> fmt::Debug for ConcurrentTopKTracker<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("ConcurrentTopKTracker")
            .field("k", &inner.k())
            .field("distinct_items", &inner.distinct_items())
            .field("total_clicks", &inner.total_clicks())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "concurrency")]
impl<K: ItemId> Default for ConcurrentTopKTracker<K> {
    /// Creates a thread-safe tracker with K = [`DEFAULT_K`].
    fn default() -> Self {
        Self::new(DEFAULT_K)
    }
}

#[cfg(feature = "concurrency")]
impl<K: ItemId + Send + Sync> ConcurrentTracker for ConcurrentTopKTracker<K> {}

#[cfg(feature = "metrics")]
#[cfg(feature = "concurrency")]
impl<K: ItemId> MetricsSnapshotProvider<TrackerMetricsSnapshot> for ConcurrentTopKTracker<K> {
    fn snapshot(&self) -> TrackerMetricsSnapshot {
        self.metrics_snapshot()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
