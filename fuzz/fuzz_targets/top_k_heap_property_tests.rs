#![no_main]

use libfuzzer_sys::fuzz_target;
use trendkit::ds::{Admission, TopKHeap};

// Fuzz property-based tests for TopKHeap
//
// Tests specific invariants and properties:
// - Bounded membership (len == min(distinct keys offered, limit))
// - No duplicate keys in query results
// - Monotone in-place updates stay visible
// - Tie-break admission (equal count enters only with a smaller key)
// - Ranked ordering (count descending, key ascending)
// - Clear operation correctness
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let test_type = data[0] % 6;

    match test_type {
        0 => test_bounded_membership(&data[1..]),
        1 => test_no_duplicate_keys(&data[1..]),
        2 => test_monotone_updates_visible(&data[1..]),
        3 => test_tie_break_admission(&data[1..]),
        4 => test_ranked_ordering(&data[1..]),
        5 => test_clear_operation(&data[1..]),
        _ => unreachable!(),
    }
});

// Property: len tracks min(distinct keys offered, limit) exactly
fn test_bounded_membership(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let limit = usize::from(data[0] % 8);
    let mut heap: TopKHeap<u32> = TopKHeap::new(limit);
    let mut totals = std::collections::HashMap::new();

    for chunk in data[1..].chunks(2) {
        if chunk.len() < 2 {
            break;
        }
        let key = u32::from(chunk[0]) % 16;
        let total = *totals
            .entry(key)
            .and_modify(|c| *c += u64::from(chunk[1]))
            .or_insert(u64::from(chunk[1]));
        heap.offer(&key, total);

        assert!(heap.len() <= limit);
        assert_eq!(heap.len(), totals.len().min(limit));
        assert_eq!(heap.is_full(), heap.len() >= limit);
    }
}

// Property: no key appears twice in ranked output or in the heap
fn test_no_duplicate_keys(data: &[u8]) {
    let mut heap: TopKHeap<u32> = TopKHeap::new(4);
    let mut totals = std::collections::HashMap::new();

    // Tiny key range forces heavy in-place updating and displacement churn.
    for chunk in data.chunks(2) {
        if chunk.len() < 2 {
            break;
        }
        let key = u32::from(chunk[0]) % 6;
        let total = *totals
            .entry(key)
            .and_modify(|c| *c += u64::from(chunk[1]) + 1)
            .or_insert(u64::from(chunk[1]) + 1);
        heap.offer(&key, total);

        let ranked = heap.ranked();
        let mut seen = std::collections::HashSet::new();
        for (id, _count) in &ranked {
            assert!(seen.insert(*id));
        }
        assert_eq!(ranked.len(), heap.len());

        #[cfg(debug_assertions)]
        heap.debug_validate_invariants();
    }
}

// Property: updating a member in place is immediately visible everywhere
fn test_monotone_updates_visible(data: &[u8]) {
    if data.len() < 2 {
        return;
    }

    let mut heap: TopKHeap<u32> = TopKHeap::new(2);
    let key = u32::from(data[0]);
    let mut total = 0u64;

    // Sole member: the first offer admits, every later offer updates in place.
    for (i, &byte) in data[1..].iter().enumerate() {
        total += u64::from(byte);
        let admission = heap.offer(&key, total);

        if i == 0 {
            assert_eq!(admission, Admission::Admitted);
        } else {
            assert_eq!(admission, Admission::Updated);
        }
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.count_of(&key), Some(total));
        assert_eq!(heap.weakest(), Some((key, total)));
        assert_eq!(heap.ranked(), vec![(key, total)]);
    }
}

// Property: an equal count displaces the weakest member only when the
// challenger's key is smaller
fn test_tie_break_admission(data: &[u8]) {
    if data.len() < 4 {
        return;
    }

    let mut keys = [u32::from(data[0]), u32::from(data[1]), u32::from(data[2])];
    keys.sort_unstable();
    let [low, mid, high] = keys;
    if low == mid || mid == high {
        return;
    }
    let count = u64::from(data[3]) + 1;

    // Challenger with the smallest key evicts the weaker of two tied members.
    let mut heap: TopKHeap<u32> = TopKHeap::new(2);
    heap.offer(&mid, count);
    heap.offer(&high, count);
    assert_eq!(heap.offer(&low, count), Admission::Displaced(high));
    assert_eq!(heap.ranked(), vec![(low, count), (mid, count)]);

    // Challenger with the largest key is rejected on the same tie.
    let mut heap: TopKHeap<u32> = TopKHeap::new(2);
    heap.offer(&low, count);
    heap.offer(&mid, count);
    assert_eq!(heap.offer(&high, count), Admission::Rejected);
    assert_eq!(heap.ranked(), vec![(low, count), (mid, count)]);

    // One extra click breaks the tie regardless of key order.
    assert_eq!(heap.offer(&high, count + 1), Admission::Displaced(mid));
    assert!(heap.contains(&high));
}

// Property: ranked output is sorted by count descending, key ascending
fn test_ranked_ordering(data: &[u8]) {
    if data.is_empty() {
        return;
    }

    let limit = usize::from(data[0] % 8) + 1;
    let mut heap: TopKHeap<u32> = TopKHeap::new(limit);
    let mut totals = std::collections::HashMap::new();

    for chunk in data[1..].chunks(2) {
        if chunk.len() < 2 {
            break;
        }
        let key = u32::from(chunk[0]);
        let total = *totals
            .entry(key)
            .and_modify(|c| *c += u64::from(chunk[1]))
            .or_insert(u64::from(chunk[1]));
        heap.offer(&key, total);
    }

    let ranked = heap.ranked();
    for pair in ranked.windows(2) {
        assert!(pair[0].1 > pair[1].1 || (pair[0].1 == pair[1].1 && pair[0].0 < pair[1].0));
    }

    // Every reported pair carries the key's live count.
    for (key, count) in ranked {
        assert_eq!(heap.count_of(&key), Some(count));
        assert_eq!(totals[&key], count);
    }
}

// Property: clear empties the member set and keeps the heap usable
fn test_clear_operation(data: &[u8]) {
    let mut heap: TopKHeap<u32> = TopKHeap::new(3);
    let mut totals = std::collections::HashMap::new();

    let mut idx = 0;
    while idx + 1 < data.len() {
        let key = u32::from(data[idx]);
        let total = *totals
            .entry(key)
            .and_modify(|c| *c += u64::from(data[idx + 1]))
            .or_insert(u64::from(data[idx + 1]));
        heap.offer(&key, total);

        if data[idx] % 7 == 0 {
            heap.clear();

            assert!(heap.is_empty());
            assert_eq!(heap.len(), 0);
            assert_eq!(heap.limit(), 3);
            assert!(heap.ranked().is_empty());
            assert_eq!(heap.weakest(), None);
            assert_eq!(heap.count_of(&key), None);
        }

        idx += 2;
    }
}
