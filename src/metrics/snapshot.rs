#[derive(Debug, Default, Clone, Copy)]
pub struct TrackerMetricsSnapshot {
    pub clicks_recorded: u64,
    pub items_created: u64,

    pub invalid_id_rejections: u64,
    pub overflow_failures: u64,

    pub index_admissions: u64,
    pub index_updates: u64,
    pub index_displacements: u64,
    pub index_rejections: u64,

    pub top_k_queries: u64,
    pub top_k_items_returned: u64,

    // gauges captured at snapshot time
    pub distinct_items: u64,
    pub index_len: u64,
    pub k: u64,
    pub total_clicks: u64,
}
