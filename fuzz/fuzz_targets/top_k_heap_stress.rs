#![no_main]

use libfuzzer_sys::fuzz_target;
use trendkit::ds::TopKHeap;
use std::collections::HashMap;

// Fuzz stress test with heavy offer churn and reference validation
//
// Replays every per-key total change into the heap and checks the ranking
// against a brute-force full sort of all totals after each operation, so
// membership, eviction, and tie-breaks cannot drift from the ground truth.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let limit = usize::from(data[0] % 8);
    let mut heap: TopKHeap<u32> = TopKHeap::new(limit);
    let mut totals: HashMap<u32, u64> = HashMap::new();

    for chunk in data[1..].chunks(3) {
        if chunk.len() < 3 {
            break;
        }

        let op = chunk[0] % 3;
        let key = u32::from(chunk[1]);

        match op {
            0 => {
                // small bump
                let total = *totals
                    .entry(key)
                    .and_modify(|c| *c += u64::from(chunk[2]))
                    .or_insert(u64::from(chunk[2]));
                heap.offer(&key, total);
            }
            1 => {
                // large jump, shakes up the ranking in one step
                let bump = u64::from(chunk[2]) * 7 + 1;
                let total = *totals
                    .entry(key)
                    .and_modify(|c| *c += bump)
                    .or_insert(bump);
                heap.offer(&key, total);
            }
            2 => {
                // weakest repairs lagging entries and must match the
                // reference tail
                let expected = reference_top(&totals, limit).pop();
                assert_eq!(heap.weakest(), expected);
            }
            _ => unreachable!(),
        }

        // The heap must track the true top-`limit` of all totals exactly.
        assert_eq!(heap.ranked(), reference_top(&totals, limit));
        assert_eq!(heap.len(), totals.len().min(limit));
    }
});

// Full sort of every total by count descending, key ascending, cut to limit.
fn reference_top(totals: &HashMap<u32, u64>, limit: usize) -> Vec<(u32, u64)> {
    let mut all: Vec<(u32, u64)> = totals.iter().map(|(&k, &c)| (k, c)).collect();
    all.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    all.truncate(limit);
    all
}
