//! Test utilities for coil development.
//!
//! Provides a disposal [`Recorder`], builders for rings in a known
//! physical layout, and a [`VecDeque`]-backed model with a proptest
//! strategy over ring operations.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt::Debug;
use std::rc::Rc;

use coil_ring::{RingBuf, RingConfig};
use proptest::prelude::*;

/// Collects every value a ring hands to its disposer.
///
/// Clones share the same log, so one clone can be moved into the ring
/// while the test keeps the other.
#[derive(Clone, Debug)]
pub struct Recorder<T> {
    seen: Rc<RefCell<Vec<T>>>,
}

impl<T: 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            seen: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// A disposer that appends to this recorder's log.
    pub fn disposer(&self) -> impl FnMut(T) + 'static {
        let seen = Rc::clone(&self.seen);
        move |value| seen.borrow_mut().push(value)
    }

    /// Number of values disposed so far.
    pub fn count(&self) -> usize {
        self.seen.borrow().len()
    }
}

impl<T: Clone + 'static> Recorder<T> {
    /// Snapshot of the disposal log, in disposal order.
    pub fn seen(&self) -> Vec<T> {
        self.seen.borrow().clone()
    }
}

impl<T: 'static> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Config with the given initial capacity and no capacity floor.
pub fn exact(capacity: usize) -> RingConfig {
    RingConfig::new(capacity).with_min_capacity(1)
}

/// Build a ring of exactly `capacity` whose first element sits `offset`
/// slots into the block, holding `values` in order.
///
/// With `offset + values.len() > capacity + 1` the contents wrap past the
/// physical end.
pub fn ring_at<T: Clone + Default>(capacity: usize, offset: usize, values: &[T]) -> RingBuf<T> {
    assert!(values.len() <= capacity, "values exceed capacity");
    assert!(offset <= capacity, "offset beyond the slot block");
    let mut ring = RingBuf::new(exact(capacity)).unwrap();
    for _ in 0..offset {
        ring.insert_back(T::default()).unwrap();
    }
    for _ in 0..offset {
        ring.pop_front();
    }
    for v in values {
        ring.insert_back(v.clone()).unwrap();
    }
    assert_eq!(ring.capacity(), capacity, "builder must not grow the ring");
    ring
}

/// The layout `[4, 5, _, 1, 2, 3]`: a full, wrapped ring of capacity 5.
pub fn wrapped_full() -> RingBuf<u32> {
    let ring = ring_at(5, 3, &[1, 2, 3, 4, 5]);
    assert!(ring.is_full() && !ring.is_contiguous());
    ring
}

/// Logical contents of a ring.
pub fn contents<T: Clone>(ring: &RingBuf<T>) -> Vec<T> {
    ring.iter().cloned().collect()
}

// ── Model-based testing ─────────────────────────────────────────────

/// One operation against a ring and its model.
///
/// Index-carrying variants hold a seed reduced modulo the current length
/// when applied, so every generated sequence is valid.
#[derive(Clone, Debug)]
pub enum Op {
    PushBack(u32),
    PushFront(u32),
    PopFront,
    PopBack,
    InsertAt(usize, u32),
    RemoveAt(usize),
    ReleaseAt(usize),
    Set(usize, u32),
    Reserve(usize),
    Clear,
}

/// Strategy over [`Op`], weighted towards growth so sequences wrap and
/// resize often.
pub fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::PushBack),
        4 => any::<u32>().prop_map(Op::PushFront),
        2 => Just(Op::PopFront),
        2 => Just(Op::PopBack),
        4 => (any::<usize>(), any::<u32>()).prop_map(|(i, v)| Op::InsertAt(i, v)),
        2 => any::<usize>().prop_map(Op::RemoveAt),
        1 => any::<usize>().prop_map(Op::ReleaseAt),
        1 => (any::<usize>(), any::<u32>()).prop_map(|(i, v)| Op::Set(i, v)),
        1 => (0usize..64).prop_map(Op::Reserve),
        1 => Just(Op::Clear),
    ]
}

/// Apply `op` to both the ring and the model, asserting that any value
/// the ring returns matches the model.
pub fn apply(ring: &mut RingBuf<u32>, model: &mut VecDeque<u32>, op: &Op) {
    match *op {
        Op::PushBack(v) => {
            let pos = ring.insert_back(v).unwrap();
            model.push_back(v);
            assert_eq!(ring.index_of(pos), model.len() - 1);
        }
        Op::PushFront(v) => {
            let pos = ring.insert_front(v).unwrap();
            model.push_front(v);
            assert_eq!(ring.index_of(pos), 0);
        }
        Op::PopFront => assert_eq!(ring.pop_front(), model.pop_front()),
        Op::PopBack => assert_eq!(ring.pop_back(), model.pop_back()),
        Op::InsertAt(seed, v) => {
            let index = seed % (model.len() + 1);
            let pos = ring.insert_at(ring.pos_of(index), v).unwrap();
            model.insert(index, v);
            assert_eq!(ring.index_of(pos), index);
        }
        Op::RemoveAt(seed) => {
            if model.is_empty() {
                return;
            }
            let index = seed % model.len();
            let next = ring.remove_at(ring.pos_of(index));
            model.remove(index);
            assert_eq!(ring.index_of(next), index);
        }
        Op::ReleaseAt(seed) => {
            if model.is_empty() {
                return;
            }
            let index = seed % model.len();
            let value = ring.release_at(ring.pos_of(index));
            assert_eq!(Some(value), model.remove(index));
        }
        Op::Set(seed, v) => {
            if model.is_empty() {
                return;
            }
            let index = seed % model.len();
            let old = ring.set(ring.pos_of(index), v);
            assert_eq!(old, std::mem::replace(&mut model[index], v));
        }
        Op::Reserve(n) => {
            let before = ring.capacity();
            ring.reserve(n).unwrap();
            assert!(ring.capacity() >= before.max(n));
        }
        Op::Clear => {
            ring.clear();
            model.clear();
        }
    }
}

/// Assert the ring's observable state agrees with the model.
pub fn assert_matches<T: PartialEq + Debug + Clone>(ring: &RingBuf<T>, model: &VecDeque<T>) {
    assert_eq!(ring.len(), model.len());
    assert!(ring.len() <= ring.capacity());
    assert_eq!(ring.is_empty(), model.is_empty());
    assert_eq!(ring.front(), model.front());
    assert_eq!(ring.back(), model.back());
    let forward: Vec<T> = ring.iter().cloned().collect();
    let expected: Vec<T> = model.iter().cloned().collect();
    assert_eq!(forward, expected);
    let backward: Vec<T> = ring.iter().rev().cloned().collect();
    let expected_rev: Vec<T> = model.iter().rev().cloned().collect();
    assert_eq!(backward, expected_rev);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_at_places_head() {
        let ring = ring_at(6, 4, &[1u32, 2, 3, 4]);
        assert_eq!(ring.begin().slot(), 4);
        assert!(!ring.is_contiguous());
        assert_eq!(contents(&ring), vec![1, 2, 3, 4]);
    }

    #[test]
    fn wrapped_full_layout() {
        let ring = wrapped_full();
        assert_eq!(ring.begin().slot(), 3);
        assert_eq!(ring.end().slot(), 2);
        assert_eq!(contents(&ring), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn recorder_shares_log() {
        let rec = Recorder::new();
        let mut f = rec.disposer();
        f(1u32);
        f(2);
        assert_eq!(rec.seen(), vec![1, 2]);
        assert_eq!(rec.clone().count(), 2);
    }
}
