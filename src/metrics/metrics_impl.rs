use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{TrackerMetricsReadRecorder, TrackerMetricsRecorder};

/// Counter block owned by a tracker.
///
/// Write-path counters are plain fields because `record_click` already holds
/// `&mut self`. Read-path counters use [`MetricsCell`] because `top_k` only
/// holds `&self`.
#[derive(Debug, Default, Clone)]
pub struct TrackerMetrics {
    pub clicks_recorded: u64,
    pub items_created: u64,
    pub invalid_id_rejections: u64,
    pub overflow_failures: u64,
    pub index_admissions: u64,
    pub index_updates: u64,
    pub index_displacements: u64,
    pub index_rejections: u64,
    pub top_k_queries: MetricsCell,
    pub top_k_items_returned: MetricsCell,
}

impl TrackerMetrics {
    pub fn new() -> TrackerMetrics {
        Self {
            clicks_recorded: 0,
            items_created: 0,
            invalid_id_rejections: 0,
            overflow_failures: 0,
            index_admissions: 0,
            index_updates: 0,
            index_displacements: 0,
            index_rejections: 0,
            top_k_queries: MetricsCell::new(),
            top_k_items_returned: MetricsCell::new(),
        }
    }
}

impl TrackerMetricsRecorder for TrackerMetrics {
    fn record_click_accepted(&mut self) {
        self.clicks_recorded += 1;
    }

    fn record_item_created(&mut self) {
        self.items_created += 1;
    }

    fn record_invalid_id(&mut self) {
        self.invalid_id_rejections += 1;
    }

    fn record_counter_overflow(&mut self) {
        self.overflow_failures += 1;
    }

    fn record_index_admission(&mut self) {
        self.index_admissions += 1;
    }

    fn record_index_update(&mut self) {
        self.index_updates += 1;
    }

    fn record_index_displacement(&mut self) {
        self.index_displacements += 1;
    }

    fn record_index_rejection(&mut self) {
        self.index_rejections += 1;
    }
}

impl TrackerMetricsReadRecorder for TrackerMetrics {
    fn record_top_k_query(&self, items_returned: usize) {
        self.top_k_queries.incr();
        self.top_k_items_returned.add(items_returned as u64);
    }
}
