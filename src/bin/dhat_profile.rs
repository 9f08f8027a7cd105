//! DHAT heap profiler for trendkit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use trendkit::tracker::{DEFAULT_K, TopKTracker};
use trendkit::traits::CoreTracker;

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        const SCALE: f64 = 1.0 / (u64::MAX as f64);
        (self.next_u64() as f64) * SCALE
    }
}

/// Run a hotset workload: 90% of clicks land on 10% of item ids.
fn hotset_clicks<T: CoreTracker<u64>>(tracker: &mut T, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    let hot_size = (universe as f64 * 0.1) as u64;

    for _ in 0..operations {
        let id = if rng.next_f64() < 0.9 {
            // Hot id (10% of universe, 90% of clicks)
            rng.next_u64() % hot_size
        } else {
            // Cold id
            hot_size + (rng.next_u64() % (universe - hot_size))
        };

        let _ = tracker.record_click(id);
    }
}

/// Run a uniform workload: clicks spread evenly over the id universe.
fn uniform_clicks<T: CoreTracker<u64>>(tracker: &mut T, operations: usize, universe: u64, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for _ in 0..operations {
        let _ = tracker.record_click(rng.next_u64() % universe);
    }
}

/// Run cardinality churn: every click introduces a brand-new item id.
fn cardinality_churn<T: CoreTracker<u64>>(tracker: &mut T, operations: usize) {
    for i in 0..operations {
        let _ = tracker.record_click(u64::MAX - i as u64);
    }
}

fn profile_default_k() {
    println!("=== Profiling K = {} ===", DEFAULT_K);
    let operations = 100_000;
    let universe = 16_384;

    let mut tracker: TopKTracker<u64> = TopKTracker::new(DEFAULT_K);

    // Warm up
    for i in 0..universe {
        let _ = tracker.record_click(i);
    }

    // Hotset workload
    hotset_clicks(&mut tracker, operations, universe, 42);

    // Uniform workload
    uniform_clicks(&mut tracker, operations / 2, universe, 42);

    // Cardinality churn
    cardinality_churn(&mut tracker, operations / 4);

    // Ranked reads allocate the result vector
    for _ in 0..1_000 {
        let _ = tracker.top_k();
    }

    println!("  Final distinct items: {}", tracker.distinct_items());
}

fn profile_wide_k() {
    println!("=== Profiling K = 512 ===");
    let operations = 100_000;
    let universe = 16_384;

    let mut tracker: TopKTracker<u64> = TopKTracker::new(512);

    for i in 0..universe {
        let _ = tracker.record_click(i);
    }

    hotset_clicks(&mut tracker, operations, universe, 42);
    uniform_clicks(&mut tracker, operations / 2, universe, 42);
    cardinality_churn(&mut tracker, operations / 4);

    for _ in 0..1_000 {
        let _ = tracker.top_k();
    }

    println!("  Final distinct items: {}", tracker.distinct_items());
}

fn profile_string_ids() {
    println!("=== Profiling String ids ===");
    let operations = 100_000;
    let universe = 16_384;

    let mut tracker: TopKTracker<String> = TopKTracker::new(DEFAULT_K);
    let mut rng = XorShift64::new(42);

    // String keys stress per-click clone and hash costs
    for _ in 0..operations {
        let id = format!("product-{}", rng.next_u64() % universe);
        let _ = tracker.record_click(id);
    }

    for _ in 0..1_000 {
        let _ = tracker.top_k();
    }

    println!("  Final distinct items: {}", tracker.distinct_items());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("TrendKit DHAT Heap Profiling");
    println!("============================\n");

    profile_default_k();
    profile_wide_k();
    profile_string_ids();

    println!("\n============================");
    println!("Profiling complete!");
    println!(
        "View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>"
    );
}
