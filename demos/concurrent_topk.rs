//! Example demonstrating the thread-safe tracker wrapper.
//!
//! `ConcurrentTopKTracker` wraps the single-threaded tracker behind one
//! RwLock. Clones are cheap handles onto the same shared state, so threads
//! just clone and click. Totals are exact no matter how threads interleave.
//!
//! Run with: cargo run --example concurrent_topk

use std::thread;

use trendkit::tracker::ConcurrentTopKTracker;

fn main() {
    println!("=== Concurrent Click Tracking ===\n");

    // Track the top 3 products across four worker threads
    let tracker: ConcurrentTopKTracker<u64> = ConcurrentTopKTracker::new(3);

    // Each worker clicks a fixed set of products a fixed number of times,
    // so the final counts are exact regardless of scheduling.
    let plans: [&[(u64, u64)]; 4] = [
        &[(201, 5), (202, 1)],
        &[(201, 3), (203, 4)],
        &[(202, 2), (204, 6)],
        &[(203, 2), (205, 1)],
    ];

    let handles: Vec<_> = plans
        .into_iter()
        .map(|plan| {
            let tracker = tracker.clone();
            thread::spawn(move || {
                for &(product, clicks) in plan {
                    for _ in 0..clicks {
                        tracker.record_click(product).unwrap();
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // 201 -> 8, 203 -> 6, 204 -> 6, 202 -> 3, 205 -> 1
    println!("Top 3 products:");
    for (product, clicks) in tracker.top_k() {
        println!("  {} -> {} clicks", product, clicks);
    }

    println!(
        "\ndistinct: {}, total clicks: {}",
        tracker.distinct_items(),
        tracker.total_clicks()
    );
    println!("unranked 202 still counted: {:?}", tracker.count(&202));
}

// Expected output:
// === Concurrent Click Tracking ===
//
// Top 3 products:
//   201 -> 8 clicks
//   203 -> 6 clicks
//   204 -> 6 clicks
//
// distinct: 5, total clicks: 24
// unranked 202 still counted: Some(3)
