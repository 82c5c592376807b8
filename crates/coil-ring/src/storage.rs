//! The storage block: one slot vector with two wrapping boundaries.
//!
//! A [`Storage`] owns `capacity + 1` slots. The extra slot is a permanent
//! gap, so `head == tail` always means empty and a full buffer still has
//! one free slot at `tail`. No element count is stored; the length is the
//! forward distance from `head` to `tail`.
//!
//! ```text
//! contiguous:  [ _ _ a b c d _ _ ]      head=2 tail=6
//! wrapped:     [ c d _ _ _ _ a b ]      head=6 tail=2
//!                └leading┘   └trailing┘
//! ```

use crate::error::RingError;

/// Slot vector plus the `head`/`tail` boundary indices.
///
/// A slot is `Some` exactly when it holds a live element. All index
/// arithmetic wraps at `slots.len()`.
pub(crate) struct Storage<T> {
    slots: Vec<Option<T>>,
    /// First live slot.
    head: usize,
    /// One past the last live slot.
    tail: usize,
}

impl<T> Storage<T> {
    /// Allocate storage for `capacity` live elements (plus the sentinel).
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self, RingError> {
        let slot_count = capacity
            .checked_add(1)
            .ok_or(RingError::AllocationFailed { slots: usize::MAX })?;
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(slot_count)
            .map_err(|_| RingError::AllocationFailed { slots: slot_count })?;
        slots.resize_with(slot_count, || None);
        Ok(Self {
            slots,
            head: 0,
            tail: 0,
        })
    }

    // ── Boundaries and shape ────────────────────────────────────────

    /// Physical slot count, sentinel included.
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len() - 1
    }

    pub(crate) fn head(&self) -> usize {
        self.head
    }

    pub(crate) fn tail(&self) -> usize {
        self.tail
    }

    pub(crate) fn set_bounds(&mut self, head: usize, tail: usize) {
        debug_assert!(head < self.slots.len() && tail < self.slots.len());
        self.head = head;
        self.tail = tail;
    }

    pub(crate) fn len(&self) -> usize {
        if self.is_contiguous() {
            self.tail - self.head
        } else {
            self.tail + self.slots.len() - self.head
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    pub(crate) fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Whether the live slots form a single run `[head, tail)`.
    pub(crate) fn is_contiguous(&self) -> bool {
        self.tail >= self.head
    }

    // ── Wrapping slot arithmetic ────────────────────────────────────

    /// The slot after `slot`, wrapping at the physical end.
    pub(crate) fn advance(&self, slot: usize) -> usize {
        if slot + 1 == self.slots.len() {
            0
        } else {
            slot + 1
        }
    }

    /// The slot before `slot`, wrapping at the physical start.
    pub(crate) fn retreat(&self, slot: usize) -> usize {
        if slot == 0 {
            self.slots.len() - 1
        } else {
            slot - 1
        }
    }

    /// `slot + offset` modulo the slot count. `offset` must not exceed it.
    pub(crate) fn forward_by(&self, slot: usize, offset: usize) -> usize {
        debug_assert!(offset <= self.slots.len());
        if offset < self.slots.len() - slot {
            slot + offset
        } else {
            slot + offset - self.slots.len()
        }
    }

    /// `slot - offset` modulo the slot count. `offset` must not exceed it.
    pub(crate) fn backward_by(&self, slot: usize, offset: usize) -> usize {
        debug_assert!(offset <= self.slots.len());
        if offset > slot {
            slot + self.slots.len() - offset
        } else {
            slot - offset
        }
    }

    // ── Membership and index conversion ─────────────────────────────

    /// Whether `slot` is a live slot or the one-past-end slot.
    pub(crate) fn contains(&self, slot: usize) -> bool {
        if self.is_contiguous() {
            slot >= self.head && slot <= self.tail
        } else {
            (slot >= self.head && slot < self.slots.len()) || slot <= self.tail
        }
    }

    /// Whether a member slot of a wrapped buffer lies in the leading run
    /// `[0, tail]`, i.e. physically before `head`.
    pub(crate) fn in_leading_run(&self, slot: usize) -> bool {
        debug_assert!(self.contains(slot));
        !self.is_contiguous() && slot <= self.tail
    }

    /// Logical index of a member slot; the end slot maps to `len()`.
    pub(crate) fn index_of(&self, slot: usize) -> usize {
        debug_assert!(self.contains(slot));
        if self.is_contiguous() || slot >= self.head {
            slot - self.head
        } else {
            slot + self.slots.len() - self.head
        }
    }

    /// Physical slot of logical index `index` in `0..=len()`.
    pub(crate) fn slot_of(&self, index: usize) -> usize {
        debug_assert!(index <= self.len());
        self.forward_by(self.head, index)
    }

    // ── Slot access ─────────────────────────────────────────────────

    pub(crate) fn get(&self, slot: usize) -> Option<&T> {
        self.slots[slot].as_ref()
    }

    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots[slot].as_mut()
    }

    /// Write into a free slot.
    pub(crate) fn put(&mut self, slot: usize, value: T) {
        debug_assert!(self.slots[slot].is_none(), "slot {slot} already occupied");
        self.slots[slot] = Some(value);
    }

    pub(crate) fn take(&mut self, slot: usize) -> Option<T> {
        self.slots[slot].take()
    }

    /// The slots of `count` elements starting at `begin`, split at the
    /// physical end. The second slice is empty unless the span wraps.
    pub(crate) fn runs(&self, begin: usize, count: usize) -> (&[Option<T>], &[Option<T>]) {
        let size = self.slots.len();
        if count <= size - begin {
            (&self.slots[begin..begin + count], &[])
        } else {
            let (leading, trailing) = self.slots.split_at(begin);
            (trailing, &leading[..count - (size - begin)])
        }
    }

    /// Mutable variant of [`runs`](Self::runs) over all live slots.
    pub(crate) fn live_runs_mut(&mut self) -> (&mut [Option<T>], &mut [Option<T>]) {
        let (head, tail) = (self.head, self.tail);
        if self.is_contiguous() {
            (&mut self.slots[head..tail], &mut [])
        } else {
            let (leading, trailing) = self.slots.split_at_mut(head);
            (trailing, &mut leading[..tail])
        }
    }

    // ── End operations ──────────────────────────────────────────────

    /// Write after the last element. The buffer must not be full.
    pub(crate) fn push_back(&mut self, value: T) -> usize {
        debug_assert!(!self.is_full());
        let slot = self.tail;
        self.put(slot, value);
        self.tail = self.advance(slot);
        slot
    }

    /// Write before the first element. The buffer must not be full.
    pub(crate) fn push_front(&mut self, value: T) -> usize {
        debug_assert!(!self.is_full());
        let slot = self.retreat(self.head);
        self.put(slot, value);
        self.head = slot;
        slot
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = self.take(self.head);
        self.head = self.advance(self.head);
        value
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail = self.retreat(self.tail);
        self.take(self.tail)
    }

    // ── Bulk moves ──────────────────────────────────────────────────

    /// Rotate the `count` slots starting at `start` right by one, wrapping
    /// at the physical end. The last slot of the span ends up first.
    pub(crate) fn rotate_right_one(&mut self, start: usize, count: usize) {
        if count < 2 {
            return;
        }
        let size = self.slots.len();
        if count <= size - start {
            self.slots[start..start + count].rotate_right(1);
        } else {
            let wrapped = count - (size - start);
            self.slots[..wrapped].rotate_right(1);
            self.slots.swap(0, size - 1);
            self.slots[start..].rotate_right(1);
        }
    }

    /// Rotate the `count` slots starting at `start` left by one, wrapping
    /// at the physical end. The first slot of the span ends up last.
    pub(crate) fn rotate_left_one(&mut self, start: usize, count: usize) {
        if count < 2 {
            return;
        }
        let size = self.slots.len();
        if count <= size - start {
            self.slots[start..start + count].rotate_left(1);
        } else {
            let wrapped = count - (size - start);
            self.slots[start..].rotate_left(1);
            self.slots.swap(size - 1, 0);
            self.slots[..wrapped].rotate_left(1);
        }
    }

    /// Move `len` slots from `src` to `dst` (no wrap). Destination slots not
    /// overlapping the source must be free. Overlap is handled like `memmove`.
    pub(crate) fn move_run(&mut self, src: usize, dst: usize, len: usize) {
        debug_assert!(src + len <= self.slots.len() && dst + len <= self.slots.len());
        if dst > src {
            for i in (0..len).rev() {
                self.slots.swap(src + i, dst + i);
            }
        } else if dst < src {
            for i in 0..len {
                self.slots.swap(src + i, dst + i);
            }
        }
    }

    /// Append `extra` free slots at the physical end. Existing slots keep
    /// their indices; the boundaries are not touched.
    pub(crate) fn extend_free(&mut self, extra: usize) -> Result<(), RingError> {
        let target = self.slots.len() + extra;
        self.slots
            .try_reserve_exact(extra)
            .map_err(|_| RingError::AllocationFailed { slots: target })?;
        self.slots.resize_with(target, || None);
        Ok(())
    }

    /// Empty the buffer, passing every element to `f` in logical order.
    pub(crate) fn drain_with(&mut self, mut f: impl FnMut(T)) {
        while let Some(value) = self.pop_front() {
            f(value);
        }
        self.head = 0;
        self.tail = 0;
    }
}
