use std::cell::Cell;

/// Counter for metrics recorded on `&self` query paths.
///
/// Write-path metrics live in plain `u64` fields because `record_click`
/// already holds `&mut self`. Queries like `top_k` and `count` only hold
/// `&self`, so their counters need interior mutability.
///
/// # Safety
/// This type is only safe if all accesses are externally synchronized.
/// In this crate, the concurrent tracker's RwLock provides that.
#[repr(transparent)]
#[derive(Debug, Default, Clone)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn add(&self, n: u64) {
        self.0.set(self.0.get() + n);
    }
}

// SAFETY:
// All access to MetricsCell is synchronized by the tracker lock.
// Metrics are observational and do not affect ranking correctness.
unsafe impl Sync for MetricsCell {}
unsafe impl Send for MetricsCell {}
