//! Opt-in observability for trackers.
//!
//! Everything here compiles only with the `metrics` feature. Recording is
//! split between write-path counters (plain fields behind `&mut self`) and
//! read-path counters (cells behind `&self`); consumption is split between
//! snapshots for tests/benches and exporters for monitoring backends.

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use cell::MetricsCell;
pub use exporter::PrometheusTextExporter;
pub use metrics_impl::TrackerMetrics;
pub use snapshot::TrackerMetricsSnapshot;
pub use traits::{
    MetricsExporter, MetricsSnapshotProvider, TrackerMetricsReadRecorder, TrackerMetricsRecorder,
};
