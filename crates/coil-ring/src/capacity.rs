//! Growth policy and relinearization.
//!
//! Growing appends free slots at the physical end. A contiguous buffer
//! needs nothing else. A wrapped buffer is split into a leading run
//! `[0, tail)` and a trailing run `[head, old_end)`; exactly one of them
//! is moved so the sequence is representable again, and it is the shorter
//! one whenever it fits.
//!
//! ```text
//! before:        [ c d _ a b ]
//! grow:          [ c d _ a b _ _ _ _ _ ]
//! move leading:  [ _ _ _ a b c d _ _ _ ]   (2 moved)
//! move trailing: [ c d _ _ _ _ _ _ a b ]   (2 moved)
//! ```

use crate::error::RingError;
use crate::storage::Storage;

/// Largest capacity a buffer of `T` may reach with the given growth factor.
///
/// Bounded so that `capacity * growth_factor` slots of `Option<T>` never
/// exceed the `isize::MAX` allocation limit.
pub(crate) fn max_capacity<T>(growth_factor: usize) -> usize {
    let slot_bytes = std::mem::size_of::<Option<T>>().max(1);
    let limit = isize::MAX as usize;
    match growth_factor.checked_mul(slot_bytes) {
        Some(step) => (limit / step).saturating_sub(1),
        None => 0,
    }
}

/// Capacity to grow to from `capacity` when `len` elements are live.
///
/// Returns `None` if the clamped target cannot hold another element.
pub(crate) fn next_capacity(
    capacity: usize,
    len: usize,
    growth_factor: usize,
    min_capacity: usize,
    max: usize,
) -> Option<usize> {
    let target = capacity
        .saturating_mul(growth_factor)
        .max(min_capacity)
        .min(max);
    (target > len).then_some(target)
}

/// Which run a growth moved, and how many elements it moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Relinearized {
    /// The buffer was contiguous; nothing moved.
    None,
    /// The leading run was appended after the old physical end.
    Leading(usize),
    /// The trailing run was shifted to the new physical end.
    Trailing(usize),
}

impl Relinearized {
    pub(crate) fn moved(self) -> usize {
        match self {
            Self::None => 0,
            Self::Leading(n) | Self::Trailing(n) => n,
        }
    }
}

impl<T> Storage<T> {
    /// Grow to hold `new_capacity` elements and restore a valid layout.
    ///
    /// `new_capacity` must not be below the current capacity. On error the
    /// storage is unchanged.
    pub(crate) fn resize_grow(&mut self, new_capacity: usize) -> Result<Relinearized, RingError> {
        let old_capacity = self.capacity();
        debug_assert!(new_capacity >= old_capacity);
        if new_capacity == old_capacity {
            return Ok(Relinearized::None);
        }

        let old_end = self.slot_count();
        let extra = new_capacity - old_capacity;
        let contiguous = self.is_contiguous();
        let (head, tail) = (self.head(), self.tail());

        self.extend_free(extra)?;

        if contiguous {
            return Ok(Relinearized::None);
        }

        let leading = tail;
        let trailing = old_end - head;
        if leading < trailing && leading < extra {
            self.move_run(0, old_end, leading);
            self.set_bounds(head, old_end + tail);
            Ok(Relinearized::Leading(leading))
        } else {
            self.move_run(head, head + extra, trailing);
            self.set_bounds(head + extra, tail);
            Ok(Relinearized::Trailing(trailing))
        }
    }
}
