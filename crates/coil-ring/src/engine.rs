//! Arbitrary-position insertion and removal.
//!
//! Opening or closing a gap in the middle of the sequence shifts either the
//! elements before it (towards `head`) or the elements after it (towards
//! `tail`), whichever side is smaller. The shift is a single slice rotation,
//! or two rotations and a swap when the span crosses the physical end.
//!
//! When both sides are equal, the side whose span stays inside one physical
//! run is chosen: head-ward for a slot in the trailing run of a wrapped
//! buffer, tail-ward otherwise.

use std::cmp::Ordering;

use crate::storage::Storage;

/// Which boundary moves to make or absorb room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Side {
    /// Elements before the target shift and `head` moves.
    Head,
    /// Elements after the target shift and `tail` moves.
    Tail,
}

fn cheaper(head_cost: usize, tail_cost: usize, tie: Side) -> Side {
    match head_cost.cmp(&tail_cost) {
        Ordering::Less => Side::Head,
        Ordering::Greater => Side::Tail,
        Ordering::Equal => tie,
    }
}

impl<T> Storage<T> {
    /// Tie-break: keep the moved span inside the run that holds `slot`.
    fn tie_side(&self, slot: usize) -> Side {
        if !self.is_contiguous() && !self.in_leading_run(slot) {
            Side::Head
        } else {
            Side::Tail
        }
    }

    /// Side to shift when inserting before the element at `slot`.
    pub(crate) fn insert_side(&self, slot: usize) -> Side {
        let before = self.index_of(slot);
        let after = self.len() - before;
        cheaper(before, after, self.tie_side(slot))
    }

    /// Side to shift when removing the element at `slot`.
    pub(crate) fn remove_side(&self, slot: usize) -> Side {
        let before = self.index_of(slot);
        let after = self.len() - before - 1;
        cheaper(before, after, self.tie_side(slot))
    }

    /// Open a free slot so that a value written there takes the logical
    /// index currently held by `slot` (or `len()` for the end slot).
    ///
    /// The buffer must not be full. Returns `(gap_slot, elements_moved)`.
    pub(crate) fn open_gap(&mut self, slot: usize) -> (usize, usize) {
        debug_assert!(!self.is_full());
        let index = self.index_of(slot);
        let len = self.len();
        match self.insert_side(slot) {
            Side::Tail => {
                // Span: elements [index, len) plus the free slot at tail.
                self.rotate_right_one(slot, len - index + 1);
                let tail = self.advance(self.tail());
                self.set_bounds(self.head(), tail);
                (slot, len - index)
            }
            Side::Head => {
                // Span: the free slot before head plus elements [0, index).
                let head = self.retreat(self.head());
                self.rotate_left_one(head, index + 1);
                self.set_bounds(head, self.tail());
                (self.retreat(slot), index)
            }
        }
    }

    /// Remove the element at `slot` and close the gap it leaves.
    ///
    /// Returns `(value, next_slot, elements_moved)` where `next_slot` holds
    /// the element that followed the removed one, or is the new end slot.
    pub(crate) fn close_gap(&mut self, slot: usize) -> (T, usize, usize) {
        let index = self.index_of(slot);
        let len = self.len();
        let side = self.remove_side(slot);
        let value = self
            .take(slot)
            .expect("live slot inside [head, tail) is always occupied");
        match side {
            Side::Tail => {
                self.rotate_left_one(slot, len - index);
                let tail = self.retreat(self.tail());
                self.set_bounds(self.head(), tail);
                (value, slot, len - index - 1)
            }
            Side::Head => {
                let head = self.head();
                self.rotate_right_one(head, index + 1);
                self.set_bounds(self.advance(head), self.tail());
                (value, self.advance(slot), index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_with(capacity: usize, head: usize, values: &[u32]) -> Storage<u32> {
        let mut s = Storage::with_capacity(capacity).unwrap();
        s.set_bounds(head, head);
        for &v in values {
            s.push_back(v);
        }
        s
    }

    fn contents(s: &Storage<u32>) -> Vec<u32> {
        let (a, b) = s.runs(s.head(), s.len());
        a.iter().chain(b).map(|slot| slot.unwrap()).collect()
    }

    fn insert_at_index(s: &mut Storage<u32>, index: usize, value: u32) -> usize {
        let (gap, moved) = s.open_gap(s.slot_of(index));
        s.put(gap, value);
        assert_eq!(s.index_of(gap), index);
        moved
    }

    #[test]
    fn cheaper_side_selection() {
        assert_eq!(cheaper(1, 3, Side::Tail), Side::Head);
        assert_eq!(cheaper(3, 1, Side::Head), Side::Tail);
        assert_eq!(cheaper(2, 2, Side::Head), Side::Head);
    }

    #[test]
    fn insert_near_front_shifts_head() {
        let mut s = storage_with(8, 2, &[1, 2, 3, 4, 5]);
        assert_eq!(s.insert_side(s.slot_of(1)), Side::Head);
        let moved = insert_at_index(&mut s, 1, 9);
        assert_eq!(moved, 1);
        assert_eq!(s.head(), 1);
        assert_eq!(contents(&s), vec![1, 9, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_near_back_shifts_tail() {
        let mut s = storage_with(8, 2, &[1, 2, 3, 4, 5]);
        let moved = insert_at_index(&mut s, 4, 9);
        assert_eq!(moved, 1);
        assert_eq!(s.head(), 2);
        assert_eq!(contents(&s), vec![1, 2, 3, 4, 9, 5]);
    }

    #[test]
    fn insert_at_end_moves_nothing() {
        let mut s = storage_with(8, 2, &[1, 2, 3]);
        let moved = insert_at_index(&mut s, 3, 4);
        assert_eq!(moved, 0);
        assert_eq!(contents(&s), vec![1, 2, 3, 4]);
    }

    #[test]
    fn insert_at_front_moves_nothing() {
        let mut s = storage_with(8, 0, &[1, 2, 3]);
        let moved = insert_at_index(&mut s, 0, 0);
        assert_eq!(moved, 0);
        assert_eq!(s.head(), 8);
        assert_eq!(contents(&s), vec![0, 1, 2, 3]);
    }

    #[test]
    fn head_ward_shift_wraps_past_physical_start() {
        // head=0, so the head-ward shift crosses the physical start.
        let mut s = storage_with(8, 0, &[1, 2, 3, 4, 5, 6]);
        let moved = insert_at_index(&mut s, 2, 9);
        assert_eq!(moved, 2);
        assert_eq!(s.head(), 8);
        assert_eq!(contents(&s), vec![1, 2, 9, 3, 4, 5, 6]);
    }

    #[test]
    fn tail_ward_shift_crosses_physical_end() {
        // 9 slots, head=4: [4]=1 .. [8]=5 [0]=6 [1]=7, tail=2.
        let mut s = storage_with(8, 4, &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(s.insert_side(s.slot_of(4)), Side::Tail);
        let moved = insert_at_index(&mut s, 4, 9);
        assert_eq!(moved, 3);
        assert_eq!(s.tail(), 3);
        assert_eq!(contents(&s), vec![1, 2, 3, 4, 9, 5, 6, 7]);
    }

    #[test]
    fn tie_in_trailing_run_shifts_head() {
        // 9 slots, head=5: [5]=1 [6]=2 [7]=3 [8]=4 [0]=5 [1]=6.
        let s = storage_with(8, 5, &[1, 2, 3, 4, 5, 6]);
        assert_eq!(s.insert_side(s.slot_of(3)), Side::Head);
    }

    #[test]
    fn tie_in_leading_run_shifts_tail() {
        // 9 slots, head=7: [7]=1 [8]=2 [0]=3 [1]=4, tail=2.
        let s = storage_with(8, 7, &[1, 2, 3, 4]);
        assert_eq!(s.insert_side(s.slot_of(2)), Side::Tail);
    }

    #[test]
    fn tie_in_contiguous_shifts_tail() {
        let s = storage_with(8, 2, &[1, 2, 3, 4]);
        assert_eq!(s.insert_side(s.slot_of(2)), Side::Tail);
    }

    #[test]
    fn wrapped_insert_in_middle_moves_fewer_side() {
        // 7 slots, head=4: [4]=1 [5]=2 [6]=3 [0]=4 [1]=5, tail=2.
        let mut s = storage_with(6, 4, &[1, 2, 3, 4, 5]);
        let moved = insert_at_index(&mut s, 2, 99);
        assert_eq!(moved, 2);
        assert_eq!(s.head(), 3);
        assert_eq!(contents(&s), vec![1, 2, 99, 3, 4, 5]);
    }

    #[test]
    fn remove_near_front_shifts_head() {
        let mut s = storage_with(8, 2, &[1, 2, 3, 4, 5]);
        let (value, next, moved) = s.close_gap(s.slot_of(1));
        assert_eq!(value, 2);
        assert_eq!(moved, 1);
        assert_eq!(s.get(next), Some(&3));
        assert_eq!(contents(&s), vec![1, 3, 4, 5]);
    }

    #[test]
    fn remove_near_back_shifts_tail() {
        let mut s = storage_with(8, 2, &[1, 2, 3, 4, 5]);
        let (value, next, moved) = s.close_gap(s.slot_of(3));
        assert_eq!(value, 4);
        assert_eq!(moved, 1);
        assert_eq!(s.get(next), Some(&5));
        assert_eq!(contents(&s), vec![1, 2, 3, 5]);
    }

    #[test]
    fn remove_last_returns_end() {
        let mut s = storage_with(8, 2, &[1, 2, 3]);
        let (value, next, moved) = s.close_gap(s.slot_of(2));
        assert_eq!(value, 3);
        assert_eq!(moved, 0);
        assert_eq!(next, s.tail());
    }

    #[test]
    fn remove_across_physical_end() {
        // 9 slots, head=7: [7]=1 [8]=2 [0]=3 [1]=4 [2]=5 [3]=6 [4]=7.
        let mut s = storage_with(8, 7, &[1, 2, 3, 4, 5, 6, 7]);
        let (value, next, moved) = s.close_gap(s.slot_of(2));
        assert_eq!(value, 3);
        assert_eq!(moved, 2);
        assert_eq!(s.head(), 8);
        assert_eq!(s.get(next), Some(&4));
        assert_eq!(contents(&s), vec![1, 2, 4, 5, 6, 7]);

        let (value, next, moved) = s.close_gap(s.slot_of(3));
        assert_eq!(value, 5);
        assert_eq!(moved, 2);
        assert_eq!(s.get(next), Some(&6));
        assert_eq!(contents(&s), vec![1, 2, 4, 6, 7]);
    }

    #[test]
    fn remove_only_element() {
        let mut s = storage_with(4, 3, &[7]);
        let (value, next, moved) = s.close_gap(3);
        assert_eq!(value, 7);
        assert_eq!(moved, 0);
        assert!(s.is_empty());
        assert_eq!(next, s.tail());
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::VecDeque;

        proptest! {
            #[test]
            fn open_gap_matches_vecdeque_insert(
                capacity in 1usize..16,
                head_seed in any::<usize>(),
                len_seed in any::<usize>(),
                index_seed in any::<usize>(),
            ) {
                let head = head_seed % (capacity + 1);
                let len = len_seed % capacity;
                let index = index_seed % (len + 1);
                let values: Vec<u32> = (0..len as u32).collect();
                let mut s = storage_with(capacity, head, &values);
                let mut model: VecDeque<u32> = values.iter().copied().collect();

                let moved = insert_at_index(&mut s, index, 100);
                model.insert(index, 100);

                prop_assert_eq!(moved, index.min(len - index));
                prop_assert_eq!(contents(&s), model.into_iter().collect::<Vec<_>>());
            }

            #[test]
            fn close_gap_matches_vecdeque_remove(
                capacity in 1usize..16,
                head_seed in any::<usize>(),
                len_seed in any::<usize>(),
                index_seed in any::<usize>(),
            ) {
                let head = head_seed % (capacity + 1);
                let len = 1 + len_seed % capacity;
                let index = index_seed % len;
                let values: Vec<u32> = (0..len as u32).collect();
                let mut s = storage_with(capacity, head, &values);
                let mut model: VecDeque<u32> = values.iter().copied().collect();

                let (value, next, moved) = s.close_gap(s.slot_of(index));
                prop_assert_eq!(Some(value), model.remove(index));
                prop_assert_eq!(moved, index.min(len - index - 1));
                prop_assert_eq!(s.index_of(next), index);
                prop_assert_eq!(contents(&s), model.into_iter().collect::<Vec<_>>());
            }
        }
    }
}
