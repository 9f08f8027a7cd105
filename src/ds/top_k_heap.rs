//! Bounded, duplicate-free min-heap over keyed counts.
//!
//! [`TopKHeap`] maintains the K highest-counted keys of a monotonically
//! growing count stream. It pairs an authoritative side map with a binary
//! min-heap so that membership tests and in-place count updates never scan
//! the heap, and the weakest member can be found without sorting:
//!
//! ```text
//!        counts: FxHashMap<K, u64>          heap: BinaryHeap<Reverse<RankEntry>>
//!   ┌───────────────────────────┐       ┌───────────────────────────────┐
//!   │ "alpha" → 41   (live)     │       │        ("alpha", 41)          │
//!   │ "beta"  → 17   (live)     │  1:1  │       /              \        │
//!   │ "gamma" → 29   (live)     │ ◄───► │ ("beta", 9?)    ("gamma", 29) │
//!   └───────────────────────────┘       └───────────────▲───────────────┘
//!                                          stale entry ──┘ (lower bound)
//! ```
//!
//! Every member key owns **exactly one** heap entry. An in-place count update
//! touches only the side map, leaving the heap entry behind with a smaller
//! count. Because counts never decrease, a lagging entry is always a lower
//! bound, and [`TopKHeap`] repairs lagging entries with a bounded
//! pop/re-push loop the next time the weakest member matters. Once the top
//! entry is live it is provably the true weakest member: for any member `x`,
//! `live(x) >= entry(x) >= entry(top) = live(top)`.
//!
//! ## Ordering
//!
//! Entries order by count ascending, then by key **descending**, so among
//! equal counts the largest key surfaces first. That makes the eviction
//! candidate the exact mirror of the query order (count descending, key
//! ascending) produced by [`TopKHeap::ranked`].
//!
//! ## Core Operations
//!
//! | Operation        | Complexity               | Notes                        |
//! |------------------|--------------------------|------------------------------|
//! | `offer`          | O(log n) amortized       | O(n log n) worst after many in-place updates |
//! | `ranked`         | O(n log n)               | n ≤ limit                    |
//! | `count_of`       | O(1)                     | side-map lookup              |
//! | `weakest`        | O(log n) amortized       | repairs lagging entries      |
//!
//! ## Contract
//!
//! Offered counts must be non-decreasing per key (debug-asserted). Feeding a
//! key a smaller count than previously offered breaks the lower-bound
//! argument and with it the weakest-member guarantee.
//!
//! ## Example Usage
//!
//! ```
//! use trendkit::ds::{Admission, TopKHeap};
//!
//! let mut heap: TopKHeap<&str> = TopKHeap::new(2);
//! assert_eq!(heap.offer(&"alpha", 1), Admission::Admitted);
//! assert_eq!(heap.offer(&"beta", 1), Admission::Admitted);
//! assert_eq!(heap.offer(&"alpha", 2), Admission::Updated);
//!
//! // A tie displaces only when the newcomer's key is smaller.
//! assert_eq!(heap.offer(&"gamma", 1), Admission::Rejected);
//! assert_eq!(heap.offer(&"gamma", 2), Admission::Displaced("beta"));
//!
//! assert_eq!(heap.ranked(), vec![("alpha", 2), ("gamma", 2)]);
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe; callers synchronize externally. The tracker types wrap
//! this structure together with its counter store behind one lock.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

/// One heap entry: a key and the count it carried when (re-)pushed.
///
/// Orders by count ascending, then key descending, so the weakest member
/// (lowest count; largest key among ties) is the minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RankEntry<K> {
    count: u64,
    id: K,
}

impl<K: Ord> PartialOrd for RankEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for RankEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Outcome of offering an `(id, count)` observation to a [`TopKHeap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission<K> {
    /// The id was already a member; its recorded count was raised in place.
    Updated,
    /// The id was admitted into spare capacity.
    Admitted,
    /// The id was admitted by evicting the weakest member (returned).
    Displaced(K),
    /// The observation did not outrank the weakest member; nothing changed.
    Rejected,
}

/// Bounded min-heap tracking the highest-counted keys, one entry per key.
///
/// See the [module documentation](self) for the design. Constructed with a
/// fixed entry limit; `limit == 0` is permitted and admits nothing.
///
/// # Example
///
/// ```
/// use trendkit::ds::TopKHeap;
///
/// let mut heap: TopKHeap<u64> = TopKHeap::new(3);
/// for (id, count) in [(7, 4), (2, 9), (5, 1)] {
///     heap.offer(&id, count);
/// }
/// assert_eq!(heap.ranked(), vec![(2, 9), (7, 4), (5, 1)]);
/// ```
#[derive(Debug, Clone)]
pub struct TopKHeap<K> {
    limit: usize,
    /// Authoritative membership and live counts; at most `limit` entries.
    counts: FxHashMap<K, u64>,
    /// Exactly one entry per member; counts may lag behind `counts`.
    heap: BinaryHeap<Reverse<RankEntry<K>>>,
}

impl<K> TopKHeap<K>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Creates a heap that retains at most `limit` keys.
    ///
    /// Both backing containers are pre-sized to `limit` so steady-state
    /// operation does not reallocate.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::ds::TopKHeap;
    ///
    /// let heap: TopKHeap<u64> = TopKHeap::new(10);
    /// assert_eq!(heap.limit(), 10);
    /// assert!(heap.is_empty());
    /// ```
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            counts: FxHashMap::with_capacity_and_hasher(limit, Default::default()),
            heap: BinaryHeap::with_capacity(limit),
        }
    }

    /// Returns the maximum number of keys retained.
    #[inline]
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of member keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no keys are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Returns `true` once the member set has reached the limit.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.counts.len() >= self.limit
    }

    /// Returns `true` if `id` is currently a member.
    #[inline]
    pub fn contains(&self, id: &K) -> bool {
        self.counts.contains_key(id)
    }

    /// Returns the live count recorded for a member key.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::ds::TopKHeap;
    ///
    /// let mut heap: TopKHeap<&str> = TopKHeap::new(2);
    /// heap.offer(&"a", 3);
    /// assert_eq!(heap.count_of(&"a"), Some(3));
    /// assert_eq!(heap.count_of(&"b"), None);
    /// ```
    #[inline]
    pub fn count_of(&self, id: &K) -> Option<u64> {
        self.counts.get(id).copied()
    }

    /// Offers an `(id, count)` observation and reports what happened.
    ///
    /// Decision order:
    ///
    /// 1. `id` is a member → raise its recorded count in place
    ///    ([`Admission::Updated`]). The heap entry is left lagging and is
    ///    repaired later.
    /// 2. Spare capacity → admit ([`Admission::Admitted`]).
    /// 3. Full and the observation outranks the weakest member (higher
    ///    count, or equal count and smaller key) → evict it and admit
    ///    ([`Admission::Displaced`]).
    /// 4. Otherwise → [`Admission::Rejected`].
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::ds::{Admission, TopKHeap};
    ///
    /// let mut heap: TopKHeap<u32> = TopKHeap::new(1);
    /// assert_eq!(heap.offer(&1, 5), Admission::Admitted);
    /// assert_eq!(heap.offer(&2, 5), Admission::Rejected);
    /// assert_eq!(heap.offer(&2, 6), Admission::Displaced(1));
    /// assert_eq!(heap.offer(&0, 6), Admission::Displaced(2));
    /// ```
    pub fn offer(&mut self, id: &K, count: u64) -> Admission<K> {
        if let Some(recorded) = self.counts.get_mut(id) {
            debug_assert!(
                count >= *recorded,
                "offered counts must be non-decreasing per key"
            );
            *recorded = count;
            return Admission::Updated;
        }

        if self.counts.len() < self.limit {
            self.counts.insert(id.clone(), count);
            self.heap.push(Reverse(RankEntry {
                count,
                id: id.clone(),
            }));
            return Admission::Admitted;
        }

        self.refresh_weakest();
        let Some(Reverse(weakest)) = self.heap.peek() else {
            // limit == 0
            return Admission::Rejected;
        };
        let outranks = count > weakest.count || (count == weakest.count && *id < weakest.id);
        if !outranks {
            return Admission::Rejected;
        }
        let Some(Reverse(evicted)) = self.heap.pop() else {
            return Admission::Rejected;
        };
        self.counts.remove(&evicted.id);
        self.counts.insert(id.clone(), count);
        self.heap.push(Reverse(RankEntry {
            count,
            id: id.clone(),
        }));
        Admission::Displaced(evicted.id)
    }

    /// Returns the current eviction candidate: the member with the lowest
    /// live count, largest key among ties.
    ///
    /// Takes `&mut self` because lagging heap entries are repaired first.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::ds::TopKHeap;
    ///
    /// let mut heap: TopKHeap<&str> = TopKHeap::new(3);
    /// heap.offer(&"a", 2);
    /// heap.offer(&"b", 2);
    /// heap.offer(&"c", 7);
    /// assert_eq!(heap.weakest(), Some(("b", 2)));
    /// ```
    pub fn weakest(&mut self) -> Option<(K, u64)> {
        self.refresh_weakest();
        self.heap
            .peek()
            .map(|Reverse(entry)| (entry.id.clone(), entry.count))
    }

    /// Returns all members sorted by count descending, key ascending.
    ///
    /// Reads only the live side map; lagging heap entries never leak into
    /// query results.
    ///
    /// # Example
    ///
    /// ```
    /// use trendkit::ds::TopKHeap;
    ///
    /// let mut heap: TopKHeap<&str> = TopKHeap::new(3);
    /// heap.offer(&"pear", 4);
    /// heap.offer(&"apple", 4);
    /// heap.offer(&"fig", 9);
    /// assert_eq!(heap.ranked(), vec![("fig", 9), ("apple", 4), ("pear", 4)]);
    /// ```
    pub fn ranked(&self) -> Vec<(K, u64)> {
        let mut items: Vec<(K, u64)> = self
            .counts
            .iter()
            .map(|(id, &count)| (id.clone(), count))
            .collect();
        items.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        items
    }

    /// Removes all members. The limit is unchanged.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.heap.clear();
    }

    /// Approximate heap memory footprint in bytes.
    ///
    /// Counts backing-array capacity, not live length, and ignores
    /// allocator overhead and any heap data owned by `K`.
    pub fn approx_bytes(&self) -> usize {
        use std::mem::size_of;
        let counts = self.counts.capacity() * (size_of::<K>() + size_of::<u64>());
        let heap = self.heap.capacity() * size_of::<Reverse<RankEntry<K>>>();
        size_of::<Self>() + counts + heap
    }

    /// Pops and re-pushes lagging entries until the heap top carries its
    /// member's live count. At most `len()` rounds per call: every round
    /// fixes one entry, and fixed entries stay fixed while the lock-step
    /// side map is unchanged.
    fn refresh_weakest(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek()
            && let Some(&live) = self.counts.get(&top.id)
            && live != top.count
        {
            let Some(Reverse(mut entry)) = self.heap.pop() else {
                break;
            };
            entry.count = live;
            self.heap.push(Reverse(entry));
        }
    }

    /// Validates structural invariants, panicking on violation.
    ///
    /// Checks that the side map and heap agree in size, that every heap
    /// entry belongs to a member and lower-bounds its live count, and that
    /// no key owns two entries.
    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(
            self.counts.len() <= self.limit,
            "member count {} exceeds limit {}",
            self.counts.len(),
            self.limit
        );
        assert_eq!(
            self.counts.len(),
            self.heap.len(),
            "side map ({}) and heap ({}) diverged",
            self.counts.len(),
            self.heap.len()
        );
        let mut seen = FxHashMap::default();
        for Reverse(entry) in self.heap.iter() {
            let live = self
                .counts
                .get(&entry.id)
                .copied()
                .expect("heap entry for non-member key");
            assert!(
                entry.count <= live,
                "heap entry count {} exceeds live count {}",
                entry.count,
                live
            );
            assert!(
                seen.insert(entry.id.clone(), ()).is_none(),
                "duplicate heap entry for one key"
            );
        }
    }
}
