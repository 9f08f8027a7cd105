use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::TrackerMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for tracker metrics snapshots.
///
/// Renders snapshots in the Prometheus text exposition format, suitable for
/// a scrape endpoint or for forwarding to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send + Sync> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send + Sync> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_writer(self) -> W {
        self.writer
            .into_inner()
            .expect("metrics exporter writer poisoned")
    }

    fn write_counter(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} counter", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_gauge(&self, name: &str, value: u64) {
        let mut writer = self
            .writer
            .lock()
            .expect("metrics exporter writer poisoned");
        let _ = writeln!(writer, "# TYPE {} gauge", name);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send + Sync> MetricsExporter<TrackerMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TrackerMetricsSnapshot) {
        self.write_counter(
            &self.metric_name("clicks_recorded_total"),
            snapshot.clicks_recorded,
        );
        self.write_counter(
            &self.metric_name("items_created_total"),
            snapshot.items_created,
        );
        self.write_counter(
            &self.metric_name("invalid_id_rejections_total"),
            snapshot.invalid_id_rejections,
        );
        self.write_counter(
            &self.metric_name("overflow_failures_total"),
            snapshot.overflow_failures,
        );
        self.write_counter(
            &self.metric_name("index_admissions_total"),
            snapshot.index_admissions,
        );
        self.write_counter(
            &self.metric_name("index_updates_total"),
            snapshot.index_updates,
        );
        self.write_counter(
            &self.metric_name("index_displacements_total"),
            snapshot.index_displacements,
        );
        self.write_counter(
            &self.metric_name("index_rejections_total"),
            snapshot.index_rejections,
        );
        self.write_counter(
            &self.metric_name("top_k_queries_total"),
            snapshot.top_k_queries,
        );
        self.write_counter(
            &self.metric_name("top_k_items_returned_total"),
            snapshot.top_k_items_returned,
        );
        self.write_gauge(
            &self.metric_name("distinct_items"),
            snapshot.distinct_items,
        );
        self.write_gauge(&self.metric_name("index_len"), snapshot.index_len);
        self.write_gauge(&self.metric_name("k"), snapshot.k);
        self.write_gauge(&self.metric_name("total_clicks"), snapshot.total_clicks);
    }
}
