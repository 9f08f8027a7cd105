//! # Tracker Trait Hierarchy
//!
//! This module defines the trait seams for trend tracking: an identity bound
//! for item ids, a counting surface, a ranked-query surface, and a marker for
//! shareable handles.
//!
//! ## Architecture
//!
//! ```text
//!                  ┌──────────────────────────────────┐
//!                  │          ItemId (bound)          │
//!                  │                                  │
//!                  │  Eq + Hash + Ord + Clone         │
//!                  │  is_valid(&) → bool              │
//!                  └────────────────┬─────────────────┘
//!                                   │ keys
//!                  ┌────────────────▼─────────────────┐
//!                  │          CoreTracker<K>          │
//!                  │                                  │
//!                  │  record_click(&mut, K) → u64     │
//!                  │  count(&, &K) → Option<u64>      │
//!                  │  distinct_items(&) → usize       │
//!                  │  total_clicks(&) → u64           │
//!                  │  is_empty(&) → bool              │
//!                  └────────────────┬─────────────────┘
//!                                   │ extends
//!                  ┌────────────────▼─────────────────┐
//!                  │           TopKQuery<K>           │
//!                  │                                  │
//!                  │  top_k(&) → Vec<(K, u64)>        │
//!                  │  k(&) → usize                    │
//!                  │  top_item(&) → Option<(K, u64)>  │
//!                  └──────────────────────────────────┘
//! ```
//!
//! ## Trait Summary
//!
//! | Trait               | Extends        | Purpose                            |
//! |---------------------|----------------|------------------------------------|
//! | `ItemId`            | identity bounds| Item identity + boundary validation|
//! | `CoreTracker`       | -              | Click ingest and count reads       |
//! | `TopKQuery`         | `CoreTracker`  | Ranked top-K view                  |
//! | `ConcurrentTracker` | `Send + Sync`  | Marker for thread-safe handles     |
//!
//! The core/query split keeps count-only consumers (ingest pipelines,
//! auditors) independent of ranking.
//!
//! ## Ordering contract
//!
//! [`ItemId`] requires `Ord` because ranking ties are broken by id: equal
//! counts order by id ascending in query results, which makes the largest-id
//! member the weakest at equal counts on the eviction side. The two
//! directions are one rule, and implementations must honor both.

use std::hash::Hash;

use crate::error::ClickError;

// ---------------------------------------------------------------------------
// ItemId
// ---------------------------------------------------------------------------

/// Identity bound for tracked items, plus API-boundary validation.
///
/// Implemented for the integer id types click streams usually carry and for
/// string ids, where the empty string is the one invalid value. Integer ids
/// are always valid.
///
/// # Example
///
/// ```
/// use trendkit::traits::ItemId;
///
/// assert!(101u64.is_valid());
/// assert!("product-7".is_valid());
/// assert!(!"".is_valid());
/// ```
pub trait ItemId: Eq + Hash + Ord + Clone {
    /// Whether this id is acceptable at the API boundary.
    ///
    /// Trackers reject invalid ids before touching (or even locking) shared
    /// state.
    #[inline]
    fn is_valid(&self) -> bool {
        true
    }
}

impl ItemId for String {
    #[inline]
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl ItemId for &str {
    #[inline]
    fn is_valid(&self) -> bool {
        !self.is_empty()
    }
}

impl ItemId for u16 {}
impl ItemId for u32 {}
impl ItemId for u64 {}
impl ItemId for u128 {}
impl ItemId for usize {}
impl ItemId for i32 {}
impl ItemId for i64 {}

// ---------------------------------------------------------------------------
// CoreTracker
// ---------------------------------------------------------------------------

/// Counting surface: ingest clicks, read back authoritative counts.
pub trait CoreTracker<K: ItemId> {
    /// Records one click for `id`, returning the new authoritative count.
    ///
    /// The first click on an id creates its entry at 1. Fails only on an
    /// invalid id or a saturated counter; state is untouched on failure.
    fn record_click(&mut self, id: K) -> Result<u64, ClickError>;

    /// Returns the count recorded for `id`, if it was ever clicked.
    fn count(&self, id: &K) -> Option<u64>;

    /// Returns the number of distinct items ever clicked.
    fn distinct_items(&self) -> usize;

    /// Returns the aggregate click total across all items.
    fn total_clicks(&self) -> u64;

    /// Returns `true` if no click was ever recorded.
    fn is_empty(&self) -> bool {
        self.distinct_items() == 0
    }
}

// ---------------------------------------------------------------------------
// TopKQuery
// ---------------------------------------------------------------------------

/// Ranked view over a [`CoreTracker`].
pub trait TopKQuery<K: ItemId>: CoreTracker<K> {
    /// Returns up to K `(id, count)` pairs, count descending, id ascending
    /// on ties. Empty if no click was ever recorded.
    fn top_k(&self) -> Vec<(K, u64)>;

    /// Returns the configured K.
    fn k(&self) -> usize;

    /// Returns the single most-clicked item, if any.
    fn top_item(&self) -> Option<(K, u64)> {
        self.top_k().into_iter().next()
    }
}

// ---------------------------------------------------------------------------
// ConcurrentTracker
// ---------------------------------------------------------------------------

/// Marker for tracker handles that are safe to share across threads.
///
/// Implementors take `&self` on every operation and synchronize internally;
/// clones share the same underlying state.
pub trait ConcurrentTracker: Send + Sync {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
