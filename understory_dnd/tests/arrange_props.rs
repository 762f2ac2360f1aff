// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Properties of the ordering strategy over arbitrary sequences.

use proptest::prelude::*;
use understory_dnd::DndError;
use understory_dnd::arrange::{array_move, move_in_place};
use understory_dnd::items::Items;

/// A non-empty sequence with two valid indices into it.
fn seq_and_indices() -> impl Strategy<Value = (Vec<u16>, usize, usize)> {
    prop::collection::vec(any::<u16>(), 1..64).prop_flat_map(|seq| {
        let len = seq.len();
        (Just(seq), 0..len, 0..len)
    })
}

proptest! {
    #[test]
    fn move_is_a_permutation((seq, from, to) in seq_and_indices()) {
        let moved = array_move(&seq, from, to).unwrap();
        prop_assert_eq!(moved.len(), seq.len());
        let mut a = seq.clone();
        let mut b = moved.clone();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn moved_element_lands_at_target((seq, from, to) in seq_and_indices()) {
        let moved = array_move(&seq, from, to).unwrap();
        prop_assert_eq!(moved[to], seq[from]);
    }

    #[test]
    fn move_to_same_index_is_identity((seq, from, _to) in seq_and_indices()) {
        prop_assert_eq!(array_move(&seq, from, from).unwrap(), seq);
    }

    #[test]
    fn move_back_restores_sequence((seq, from, to) in seq_and_indices()) {
        let moved = array_move(&seq, from, to).unwrap();
        prop_assert_eq!(array_move(&moved, to, from).unwrap(), seq);
    }

    #[test]
    fn in_place_matches_copying((seq, from, to) in seq_and_indices()) {
        let mut in_place = seq.clone();
        move_in_place(&mut in_place, from, to).unwrap();
        prop_assert_eq!(in_place, array_move(&seq, from, to).unwrap());
    }

    #[test]
    fn out_of_range_is_rejected(
        seq in prop::collection::vec(any::<u16>(), 0..16),
        extra in 0_usize..8,
    ) {
        let bad = seq.len() + extra;
        prop_assert_eq!(
            array_move(&seq, bad, 0),
            Err(DndError::IndexOutOfRange { index: bad, len: seq.len() })
        );
    }

    #[test]
    fn items_accept_exactly_unique_sequences(seq in prop::collection::vec(0_u8..32, 0..24)) {
        let mut dedup = seq.clone();
        dedup.sort_unstable();
        dedup.dedup();
        prop_assert_eq!(Items::new(seq.iter().copied()).is_ok(), dedup.len() == seq.len());
    }
}
