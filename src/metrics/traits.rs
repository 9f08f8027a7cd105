//! # Metrics Trait Hierarchy
//!
//! This module mirrors the tracker trait design by separating *recording*,
//! *snapshotting*, and *export* responsibilities into small, composable traits.
//! It enables production monitoring and bench/testing without coupling those
//! concerns to the ranking logic.
//!
//! ## Architecture
//!
//! ```text
//!   Recording (write path, &mut self):      Recording (read path, &self):
//!   ┌─────────────────────────────┐         ┌──────────────────────────────┐
//!   │   TrackerMetricsRecorder    │         │  TrackerMetricsReadRecorder  │
//!   │  click_accepted/item_created│         │  top_k_query                 │
//!   │  invalid_id/counter_overflow│         │  (interior mutability)       │
//!   │  index admission outcomes   │         └──────────────────────────────┘
//!   └─────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (bench/test)                 │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! ## Design Goals
//! - **Single responsibility**: recorders only write counters; providers only
//!   read/snapshot; exporters only publish to monitoring systems.
//! - **Write/read split**: `record_click` holds `&mut self`, so its counters
//!   are plain fields; `top_k` holds `&self`, so its counters live in cells.
//! - **Environment split**:
//!   - Production: use lightweight recorders + exporters.
//!   - Bench/Test: use snapshot providers.

/// Counters for the click write path.
pub trait TrackerMetricsRecorder {
    fn record_click_accepted(&mut self);
    fn record_item_created(&mut self);
    fn record_invalid_id(&mut self);
    fn record_counter_overflow(&mut self);
    fn record_index_admission(&mut self);
    fn record_index_update(&mut self);
    fn record_index_displacement(&mut self);
    fn record_index_rejection(&mut self);
}

/// Read-only metrics for &self methods (uses interior mutability).
///
/// Use this for tracker operations that only take `&self` (e.g., `top_k`)
/// where a mutable recorder is not available.
pub trait TrackerMetricsReadRecorder {
    fn record_top_k_query(&self, items_returned: usize);
}

/// Snapshot provider for bench/testing.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
