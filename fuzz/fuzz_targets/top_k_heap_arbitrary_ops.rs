#![no_main]

use libfuzzer_sys::fuzz_target;
use trendkit::ds::{Admission, TopKHeap};
use std::collections::HashMap;

// Fuzz arbitrary operation sequences on TopKHeap
//
// Tests random sequences of offer, count_of, weakest, ranked, clear
// operations. Offered counts are running per-key totals so they never
// decrease, matching the offer contract.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let limit = usize::from(data[0] % 9);
    let mut heap: TopKHeap<u32> = TopKHeap::new(limit);
    let mut totals: HashMap<u32, u64> = HashMap::new();

    let mut idx = 1;
    while idx < data.len() {
        if idx + 2 >= data.len() {
            break;
        }

        let op = data[idx] % 6;
        let key = u32::from(data[idx + 1]);
        let bump = u64::from(data[idx + 2]);

        match op {
            0 => {
                // offer with the key's new running total
                let total = *totals.entry(key).and_modify(|c| *c += bump).or_insert(bump);
                let was_member = heap.contains(&key);
                let was_full = heap.is_full();

                match heap.offer(&key, total) {
                    Admission::Updated => {
                        assert!(was_member);
                        assert_eq!(heap.count_of(&key), Some(total));
                    }
                    Admission::Admitted => {
                        assert!(!was_member);
                        assert!(!was_full);
                        assert_eq!(heap.count_of(&key), Some(total));
                    }
                    Admission::Displaced(evicted) => {
                        assert!(!was_member);
                        assert!(was_full);
                        assert_ne!(evicted, key);
                        assert!(!heap.contains(&evicted));
                        assert_eq!(heap.count_of(&key), Some(total));
                    }
                    Admission::Rejected => {
                        assert!(!was_member);
                        assert!(was_full);
                        assert!(!heap.contains(&key));
                    }
                }
            }
            1 => {
                // count_of (read-only): members mirror their offered totals
                if let Some(count) = heap.count_of(&key) {
                    assert!(heap.contains(&key));
                    assert_eq!(count, totals[&key]);
                } else {
                    assert!(!heap.contains(&key));
                }
            }
            2 => {
                // weakest is the last entry in ranked order
                match heap.weakest() {
                    Some((weak_key, weak_count)) => {
                        assert!(heap.contains(&weak_key));
                        assert_eq!(heap.count_of(&weak_key), Some(weak_count));
                        assert_eq!(heap.ranked().last(), Some(&(weak_key, weak_count)));
                    }
                    None => assert!(heap.is_empty()),
                }
            }
            3 => {
                // ranked: count descending, key ascending on ties
                let ranked = heap.ranked();
                assert_eq!(ranked.len(), heap.len());
                for pair in ranked.windows(2) {
                    assert!(
                        pair[0].1 > pair[1].1 || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0)
                    );
                }
            }
            4 => {
                // Check size accounting consistency
                assert!(heap.len() <= heap.limit());
                assert_eq!(heap.is_empty(), heap.len() == 0);
                assert_eq!(heap.is_full(), heap.len() >= heap.limit());
                #[cfg(debug_assertions)]
                heap.debug_validate_invariants();
            }
            5 => {
                // clear drops members but keeps the limit
                heap.clear();
                assert!(heap.is_empty());
                assert_eq!(heap.len(), 0);
                assert_eq!(heap.limit(), limit);
                assert!(heap.ranked().is_empty());
            }
            _ => unreachable!(),
        }

        // Basic invariants
        assert!(heap.len() <= limit);

        idx += 3;
    }
});
