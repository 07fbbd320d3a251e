//! Property-based tests for segment-table correctness
//!
//! Uses proptest to verify the table invariants hold across many random
//! alloc/free interleavings under every placement strategy.

use memsim_rs::{Arena, Strategy};
use proptest::prelude::*;
use std::collections::HashSet;

const CAPACITY: u64 = 1024;

/// Replay a random op tape: `(true, n)` allocates `n` units, `(false, n)`
/// frees the `n % live`-th live id
fn replay(strategy: Strategy, ops: &[(bool, u64)]) -> Arena {
    let mut arena = Arena::new(CAPACITY).unwrap();
    arena.set_strategy(strategy);
    let mut live: Vec<u32> = Vec::new();

    for &(is_alloc, n) in ops {
        if is_alloc || live.is_empty() {
            if let Ok(id) = arena.allocate(n) {
                live.push(id);
            }
        } else {
            let id = live.remove(n as usize % live.len());
            arena.free(id).unwrap();
        }
    }
    arena
}

fn op_tape() -> impl proptest::strategy::Strategy<Value = Vec<(bool, u64)>> {
    prop::collection::vec((any::<bool>(), 1u64..256), 1..200)
}

proptest! {
    #[test]
    fn prop_coverage_has_no_gaps_or_overlaps(
        ops in op_tape(),
        strategy_index in 0usize..4
    ) {
        let arena = replay(Strategy::ALL[strategy_index], &ops);

        let mut expected_start = 0u64;
        for seg in arena.snapshot() {
            prop_assert_eq!(seg.start, expected_start);
            prop_assert!(seg.size > 0);
            expected_start = seg.end();
        }
        prop_assert_eq!(expected_start, CAPACITY);
    }

    #[test]
    fn prop_used_ids_are_unique_and_nonzero(
        ops in op_tape(),
        strategy_index in 0usize..4
    ) {
        let arena = replay(Strategy::ALL[strategy_index], &ops);

        let mut seen = HashSet::new();
        for seg in arena.snapshot().iter().filter(|s| s.used) {
            prop_assert!(seg.id != 0, "used segment with id 0");
            prop_assert!(seen.insert(seg.id), "id {} appears twice", seg.id);
        }
    }

    #[test]
    fn prop_linear_policies_leave_no_adjacent_free_pair(
        ops in op_tape(),
        strategy_index in 0usize..3
    ) {
        let arena = replay(Strategy::ALL[strategy_index], &ops);

        for pair in arena.snapshot().windows(2) {
            prop_assert!(
                pair[0].used || pair[1].used,
                "adjacent free segments at {} and {}",
                pair[0].start,
                pair[1].start
            );
        }
    }

    #[test]
    fn prop_buddy_segments_stay_size_aligned(ops in op_tape()) {
        let arena = replay(Strategy::Buddy, &ops);

        for seg in arena.snapshot() {
            prop_assert!(seg.size.is_power_of_two());
            prop_assert_eq!(
                seg.start % seg.size,
                0,
                "segment at {} of size {} is misaligned",
                seg.start,
                seg.size
            );
        }
    }

    #[test]
    fn prop_alloc_free_round_trip(
        ops in op_tape(),
        size in 1u64..256,
        strategy_index in 0usize..4
    ) {
        let mut arena = replay(Strategy::ALL[strategy_index], &ops);
        let before = arena.snapshot().to_vec();

        if let Ok(id) = arena.allocate(size) {
            arena.free(id).unwrap();
        }
        prop_assert_eq!(arena.snapshot(), before.as_slice());
    }

    #[test]
    fn prop_report_is_consistent_with_snapshot(
        ops in op_tape(),
        strategy_index in 0usize..4
    ) {
        let arena = replay(Strategy::ALL[strategy_index], &ops);
        let report = arena.fragmentation_report();

        let free: Vec<u64> = arena
            .snapshot()
            .iter()
            .filter(|s| !s.used)
            .map(|s| s.size)
            .collect();
        prop_assert_eq!(report.total_free, free.iter().sum::<u64>());
        prop_assert_eq!(report.largest_free, free.iter().copied().max().unwrap_or(0));
        prop_assert_eq!(report.fragment_count, free.len());
        prop_assert!((0.0..=1.0).contains(&report.external_fragmentation));
        if report.fragment_count <= 1 {
            prop_assert_eq!(report.external_fragmentation, 0.0);
        }
    }
}
