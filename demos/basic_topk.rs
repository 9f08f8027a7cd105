//! Example demonstrating basic top-K click tracking.
//!
//! The tracker keeps an exact count for every item plus an incrementally
//! maintained ranking of the K most-clicked items:
//! - counts only ever grow; items never leave the store
//! - an outsider must outrank the weakest ranked item to enter
//! - ties resolve toward the smaller id, for ranking and membership alike
//!
//! Run with: cargo run --example basic_topk

use trendkit::tracker::TopKTracker;

fn main() {
    println!("=== Top-10 Product Clicks ===\n");

    // Track the ten most-clicked products
    let mut tracker: TopKTracker<u64> = TopKTracker::new(10);

    // A short browsing session
    for product in [101, 102, 103, 103] {
        let count = tracker.record_click(product).unwrap();
        println!("clicked {} (count now {})", product, count);
    }

    println!("\nTop products:");
    for (product, clicks) in tracker.top_k() {
        println!("  {} -> {} clicks", product, clicks);
    }
    println!(
        "distinct: {}, total clicks: {}",
        tracker.distinct_items(),
        tracker.total_clicks()
    );

    // With K = 2 the ranking keeps only the two strongest items
    println!("\n=== Displacement at K = 2 ===\n");

    let mut narrow: TopKTracker<&str> = TopKTracker::new(2);
    for id in ["alpha", "beta", "alpha", "gamma", "gamma", "gamma"] {
        narrow.record_click(id).unwrap();
    }

    println!("Top 2 after alpha x2, beta x1, gamma x3:");
    for (id, clicks) in narrow.top_k() {
        println!("  {} -> {} clicks", id, clicks);
    }

    // beta's count survives even though beta is no longer ranked
    println!("beta still counted: {:?}", narrow.count(&"beta"));

    // The tie goes to the smaller id: beta reaching 2 changes nothing
    narrow.record_click("beta").unwrap();
    println!("\nAfter one more beta click (tie with alpha):");
    for (id, clicks) in narrow.top_k() {
        println!("  {} -> {} clicks", id, clicks);
    }
}

// Expected output:
// === Top-10 Product Clicks ===
//
// clicked 101 (count now 1)
// clicked 102 (count now 1)
// clicked 103 (count now 1)
// clicked 103 (count now 2)
//
// Top products:
//   103 -> 2 clicks
//   101 -> 1 clicks
//   102 -> 1 clicks
// distinct: 3, total clicks: 4
//
// === Displacement at K = 2 ===
//
// Top 2 after alpha x2, beta x1, gamma x3:
//   gamma -> 3 clicks
//   alpha -> 2 clicks
// beta still counted: Some(1)
//
// After one more beta click (tie with alpha):
//   gamma -> 3 clicks
//   alpha -> 2 clicks
