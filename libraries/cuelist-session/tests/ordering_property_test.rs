//! Property-based tests for the ordering engine
//!
//! Verifies the reorder invariants across many random sequences and
//! relocation pairs rather than a handful of fixed cases.

use cuelist_session::plan_reorder;
use proptest::prelude::*;

fn sequence_and_indexes() -> impl Strategy<Value = (Vec<String>, usize, usize)> {
    (1usize..40).prop_flat_map(|n| {
        let ids: Vec<String> = (0..n).map(|i| format!("id-{i}")).collect();
        (Just(ids), 0..n, 0..n)
    })
}

proptest! {
    /// Property: the planned order is a permutation of the input
    #[test]
    fn order_is_a_permutation((ids, from, to) in sequence_and_indexes()) {
        let plan = plan_reorder(&ids, from, to).unwrap();
        prop_assert_eq!(plan.order.len(), ids.len());

        let mut sorted_input = ids.clone();
        sorted_input.sort();
        let mut sorted_output = plan.order.clone();
        sorted_output.sort();
        prop_assert_eq!(sorted_input, sorted_output);
    }

    /// Property: the moved entity lands exactly at the target index
    #[test]
    fn moved_entity_lands_at_target((ids, from, to) in sequence_and_indexes()) {
        let plan = plan_reorder(&ids, from, to).unwrap();
        prop_assert_eq!(&plan.order[to], &ids[from]);
    }

    /// Property: updates assign positions {0..n-1} matching the new order,
    /// and contain exactly the entities whose index changed
    #[test]
    fn updates_are_minimal_and_dense((ids, from, to) in sequence_and_indexes()) {
        let plan = plan_reorder(&ids, from, to).unwrap();

        for (entity, position) in &plan.updates {
            // the recorded position is the entity's index in the new order
            prop_assert_eq!(&plan.order[*position as usize], entity);
            // and it actually changed relative to the input
            prop_assert_ne!(&ids[*position as usize], entity);
        }

        // every entity that changed index is in the batch
        let changed = ids
            .iter()
            .zip(plan.order.iter())
            .filter(|(before, after)| before != after)
            .count();
        prop_assert_eq!(plan.updates.len(), changed);
    }

    /// Property: relocating to the same index changes nothing
    #[test]
    fn same_index_is_identity((ids, from, _) in sequence_and_indexes()) {
        let plan = plan_reorder(&ids, from, from).unwrap();
        prop_assert_eq!(plan.order, ids);
        prop_assert!(plan.updates.is_empty());
    }
}
