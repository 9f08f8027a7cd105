//! Authoritative click-count storage.
//!
//! ## Architecture
//!
//! [`CounterMap`] wraps a `HashMap<K, u64, S>` and is the single source of
//! truth for per-item click counts. Entries are created at 1 on first
//! increment and are never removed; the map only grows with the distinct-item
//! universe. Ranking structures index into these counts but never own them.
//!
//! ## Core Operations
//!
//! | Operation       | Complexity | Notes                                   |
//! |-----------------|------------|-----------------------------------------|
//! | `increment`     | O(1)       | checked; fails on `u64::MAX`, never wraps |
//! | `count`         | O(1)       |                                         |
//! | `iter`          | O(n)       | audit/oracle walks                      |
//!
//! ## Overflow
//!
//! A counter at `u64::MAX` cannot take another click. `increment` detects
//! this with `checked_add` and returns [`CounterSaturated`] *before* touching
//! the entry, so a failed call leaves the store byte-for-byte unchanged.
//!
//! ## Type Constraints
//!
//! - `K: Eq + Hash` for lookups; `K: Clone` for entry creation.
//! - `S: BuildHasher`, defaulting to `RandomState`. The tracker instantiates
//!   with `rustc_hash::FxBuildHasher` for small-key throughput.
//!
//! ## Thread Safety
//!
//! Not thread-safe; the tracker wraps it behind its lock.

use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hash};

/// Error returned when an item's click counter is at `u64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSaturated;

impl fmt::Display for CounterSaturated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("click counter is at its maximum value")
    }
}

impl std::error::Error for CounterSaturated {}

/// Grow-only map from item id to cumulative click count.
///
/// # Example
///
/// ```
/// use trendkit::store::CounterMap;
///
/// let mut counts: CounterMap<&str> = CounterMap::new();
/// assert_eq!(counts.increment(&"widget"), Ok(1));
/// assert_eq!(counts.increment(&"widget"), Ok(2));
/// assert_eq!(counts.count(&"widget"), Some(2));
/// assert_eq!(counts.count(&"gadget"), None);
/// ```
#[derive(Clone)]
pub struct CounterMap<K, S = RandomState> {
    counts: HashMap<K, u64, S>,
    /// Aggregate clicks across all items. Saturating: an aggregate gauge,
    /// not the per-item source of truth.
    total_clicks: u64,
}

// Manual impl to avoid the derive's `S: Debug` bound; the hasher state is
// never printed, so only `K: Debug` is required.
impl<K: fmt::Debug, S> fmt::Debug for CounterMap<K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CounterMap")
            .field("counts", &self.counts)
            .field("total_clicks", &self.total_clicks)
            .finish()
    }
}

impl<K> CounterMap<K>
where
    K: Eq + Hash,
{
    /// Creates an empty counter store.
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty counter store pre-sized for `expected_items`
    /// distinct ids.
    pub fn with_capacity(expected_items: usize) -> Self {
        Self::with_capacity_and_hasher(expected_items, RandomState::new())
    }
}

impl<K> Default for CounterMap<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> CounterMap<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty counter store with a custom hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            counts: HashMap::with_hasher(hasher),
            total_clicks: 0,
        }
    }

    /// Creates a pre-sized counter store with a custom hasher.
    pub fn with_capacity_and_hasher(expected_items: usize, hasher: S) -> Self {
        Self {
            counts: HashMap::with_capacity_and_hasher(expected_items, hasher),
            total_clicks: 0,
        }
    }

    /// Adds one click to `id`, creating the entry at 1 on first sight.
    ///
    /// Returns the new count. Fails with [`CounterSaturated`] if the entry
    /// is at `u64::MAX`; the store is unchanged in that case.
    pub fn increment(&mut self, id: &K) -> Result<u64, CounterSaturated>
    where
        K: Clone,
    {
        let next = match self.counts.get_mut(id) {
            Some(slot) => {
                let next = slot.checked_add(1).ok_or(CounterSaturated)?;
                *slot = next;
                next
            },
            None => {
                self.counts.insert(id.clone(), 1);
                1
            },
        };
        self.total_clicks = self.total_clicks.saturating_add(1);
        Ok(next)
    }

    /// Returns the count recorded for `id`, if it was ever clicked.
    #[inline]
    pub fn count(&self, id: &K) -> Option<u64> {
        self.counts.get(id).copied()
    }

    /// Returns `true` if `id` has at least one recorded click.
    #[inline]
    pub fn contains(&self, id: &K) -> bool {
        self.counts.contains_key(id)
    }

    /// Returns the number of distinct items ever clicked.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no click was ever recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns the aggregate click total across all items.
    #[inline]
    pub fn total_clicks(&self) -> u64 {
        self.total_clicks
    }

    /// Iterates over `(id, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
        self.counts.iter().map(|(id, &count)| (id, count))
    }

    /// Approximate heap memory footprint in bytes.
    ///
    /// Counts backing-array capacity, not live length, and ignores
    /// allocator overhead and any heap data owned by `K`.
    pub fn approx_bytes(&self) -> usize {
        use std::mem::size_of;
        size_of::<Self>() + self.counts.capacity() * (size_of::<K>() + size_of::<u64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_map_first_click_creates_at_one() {
        let mut counts: CounterMap<u64> = CounterMap::new();
        assert_eq!(counts.increment(&7), Ok(1));
        assert_eq!(counts.count(&7), Some(1));
        assert_eq!(counts.len(), 1);
    }

    #[test]
    fn counter_map_increment_adds_exactly_one() {
        let mut counts: CounterMap<u64> = CounterMap::new();
        for expected in 1..=100u64 {
            assert_eq!(counts.increment(&42), Ok(expected));
        }
        assert_eq!(counts.count(&42), Some(100));
        assert_eq!(counts.total_clicks(), 100);
    }

    #[test]
    fn counter_map_tracks_distinct_items() {
        let mut counts: CounterMap<String> = CounterMap::new();
        counts.increment(&"a".to_string()).unwrap();
        counts.increment(&"b".to_string()).unwrap();
        counts.increment(&"a".to_string()).unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.total_clicks(), 3);
    }

    #[test]
    fn counter_map_never_removes_entries() {
        let mut counts: CounterMap<u64> = CounterMap::new();
        for id in 0..50u64 {
            counts.increment(&id).unwrap();
        }
        assert_eq!(counts.len(), 50);
        assert!(counts.contains(&0));
        assert!(counts.contains(&49));
    }

    #[test]
    fn counter_map_saturated_counter_fails_without_mutation() {
        let mut counts: CounterMap<u64> = CounterMap::new();
        counts.increment(&1).unwrap();
        // Drive the entry to the ceiling directly; 2^64 clicks is not a test.
        *counts.counts.get_mut(&1).unwrap() = u64::MAX;

        let before_total = counts.total_clicks();
        assert_eq!(counts.increment(&1), Err(CounterSaturated));
        assert_eq!(counts.count(&1), Some(u64::MAX));
        assert_eq!(counts.total_clicks(), before_total);

        // Other items still count normally.
        assert_eq!(counts.increment(&2), Ok(1));
    }

    #[test]
    fn counter_map_iter_visits_every_entry() {
        let mut counts: CounterMap<u64> = CounterMap::new();
        counts.increment(&1).unwrap();
        counts.increment(&2).unwrap();
        counts.increment(&2).unwrap();
        let mut pairs: Vec<(u64, u64)> = counts.iter().map(|(&id, c)| (id, c)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn counter_map_prealloc_does_not_affect_len() {
        let counts: CounterMap<u64> = CounterMap::with_capacity(1024);
        assert_eq!(counts.len(), 0);
        assert!(counts.is_empty());
    }

    #[test]
    fn counter_saturated_is_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<CounterSaturated>();
        assert_eq!(
            CounterSaturated.to_string(),
            "click counter is at its maximum value"
        );
    }
}
