//! The growable ring buffer.
//!
//! [`RingBuf`] ties the storage block, the capacity manager and the
//! insertion/removal engine together behind one API, and owns the
//! bookkeeping that keeps outstanding [`Pos`] handles honest: a process
//! unique [`BufferId`] and a layout epoch that is bumped whenever elements
//! change slots.

use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::{debug, warn};

use crate::capacity::{self, Relinearized};
use crate::config::RingConfig;
use crate::error::RingError;
use crate::handle::{BufferId, Pos, Range};
use crate::iter::{IntoIter, Iter, IterMut};
use crate::metrics::RingStats;
use crate::storage::Storage;

/// Callback receiving each element the buffer destroys.
pub type Disposer<T> = Box<dyn FnMut(T)>;

/// A growable circular buffer with O(1) end operations and
/// fewer-side shifting for arbitrary-position insertion and removal.
///
/// Backed by a single slot vector of `capacity + 1` entries; the extra
/// slot distinguishes empty from full. Growth never copies the whole
/// sequence: when the buffer is wrapped, only the shorter physical run
/// is moved.
///
/// # Positions
///
/// [`Pos`] and [`Range`] are `Copy` handles scoped to this buffer. Every
/// operation that moves elements between slots (growth, [`insert_at`],
/// [`remove_at`], [`release_at`], [`clear`]) invalidates all outstanding
/// handles; passing an invalidated handle panics. Re-anchor across such
/// calls with [`index_of`] and [`pos_of`].
///
/// [`insert_at`]: Self::insert_at
/// [`remove_at`]: Self::remove_at
/// [`release_at`]: Self::release_at
/// [`clear`]: Self::clear
/// [`index_of`]: Self::index_of
/// [`pos_of`]: Self::pos_of
pub struct RingBuf<T> {
    storage: Storage<T>,
    config: RingConfig,
    id: BufferId,
    /// Bumped whenever elements change slots.
    layout: u64,
    disposer: Option<Disposer<T>>,
    stats: RingStats,
}

impl<T> RingBuf<T> {
    /// Create an empty buffer from a validated config.
    ///
    /// Returns [`RingError::InvalidConfig`] if the config fails validation,
    /// [`RingError::CapacityExceeded`] if the initial capacity is beyond
    /// [`max_capacity`](Self::max_capacity), or
    /// [`RingError::AllocationFailed`] if the storage cannot be allocated.
    pub fn new(config: RingConfig) -> Result<Self, RingError> {
        config.validate()?;
        let max = capacity::max_capacity::<T>(config.growth_factor);
        let initial = config.effective_initial_capacity();
        if initial > max {
            return Err(RingError::CapacityExceeded {
                requested: initial,
                max,
            });
        }
        let storage = Storage::with_capacity(initial)?;
        Ok(Self {
            storage,
            config,
            id: BufferId::next(),
            layout: 0,
            disposer: None,
            stats: RingStats::default(),
        })
    }

    /// Create an empty buffer with room for at least `capacity` elements,
    /// using default values for the growth policy.
    pub fn with_capacity(capacity: usize) -> Result<Self, RingError> {
        Self::new(RingConfig::new(capacity))
    }

    /// Install a callback that receives every element the buffer destroys:
    /// on [`remove_at`](Self::remove_at), [`remove_front`](Self::remove_front),
    /// [`remove_back`](Self::remove_back), [`clear`](Self::clear) and drop.
    ///
    /// Elements handed back to the caller (`release_at`, `pop_*`, `set`,
    /// `into_iter`) never reach it.
    pub fn with_disposer(mut self, disposer: impl FnMut(T) + 'static) -> Self {
        self.disposer = Some(Box::new(disposer));
        self
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Whether the buffer holds no elements.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Whether the next insertion has to grow the buffer.
    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    /// Number of elements the buffer can hold without growing.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Largest capacity this buffer can ever reach.
    ///
    /// Chosen so that growing by the configured factor can never overflow
    /// the allocation size limit for `Option<T>` slots.
    pub fn max_capacity(&self) -> usize {
        capacity::max_capacity::<T>(self.config.growth_factor)
    }

    /// The config this buffer was created with.
    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    /// Cumulative data-movement counters.
    pub fn stats(&self) -> &RingStats {
        &self.stats
    }

    /// This buffer's identity, shared by every handle it issues.
    pub fn id(&self) -> BufferId {
        self.id
    }

    /// Whether the live elements currently occupy one physical run.
    pub fn is_contiguous(&self) -> bool {
        self.storage.is_contiguous()
    }

    // ── Capacity ────────────────────────────────────────────────────

    /// Ensure room for at least `capacity` elements.
    ///
    /// A no-op if the buffer is already large enough. Otherwise grows to
    /// `max(capacity, min_capacity)`, which invalidates outstanding
    /// positions. On error the buffer is unchanged.
    pub fn reserve(&mut self, capacity: usize) -> Result<(), RingError> {
        let max = self.max_capacity();
        if capacity > max {
            return Err(RingError::CapacityExceeded {
                requested: capacity,
                max,
            });
        }
        if capacity <= self.capacity() {
            return Ok(());
        }
        self.grow_to(capacity.max(self.config.min_capacity))
    }

    /// Grow a full buffer by the configured factor.
    fn grow(&mut self) -> Result<(), RingError> {
        let max = self.max_capacity();
        let len = self.len();
        match capacity::next_capacity(
            self.capacity(),
            len,
            self.config.growth_factor,
            self.config.min_capacity,
            max,
        ) {
            Some(target) => self.grow_to(target),
            None => {
                warn!(len, max, "ring buffer is at its maximum capacity");
                Err(RingError::CapacityExceeded {
                    requested: len + 1,
                    max,
                })
            }
        }
    }

    fn grow_to(&mut self, target: usize) -> Result<(), RingError> {
        let from = self.capacity();
        let relinearized = match self.storage.resize_grow(target) {
            Ok(r) => r,
            Err(e) => {
                warn!(from, to = target, error = %e, "ring buffer growth failed");
                return Err(e);
            }
        };
        let moved = relinearized.moved();
        self.stats.growths += 1;
        self.stats.relinearized += moved as u64;
        self.bump_layout();
        debug!(
            from,
            to = target,
            moved,
            leading = matches!(relinearized, Relinearized::Leading(_)),
            "ring buffer grown"
        );
        Ok(())
    }

    fn bump_layout(&mut self) {
        self.layout = self.layout.wrapping_add(1);
    }

    // ── Handles ─────────────────────────────────────────────────────

    fn pos(&self, slot: usize) -> Pos {
        Pos::new(self.id, self.layout, slot)
    }

    /// Whether `pos` was issued by this buffer under its current layout and
    /// names a live slot or the end position.
    pub fn valid(&self, pos: Pos) -> bool {
        pos.buf == self.id && pos.layout == self.layout && self.storage.contains(pos.slot)
    }

    fn check(&self, pos: Pos) {
        assert!(
            pos.buf == self.id,
            "position {pos} belongs to another buffer (this is buffer {})",
            self.id
        );
        assert!(
            pos.layout == self.layout,
            "stale position {pos}: buffer layout has moved to {}",
            self.layout
        );
        assert!(
            self.storage.contains(pos.slot),
            "position {pos} is outside the live slots"
        );
    }

    fn check_element(&self, pos: Pos) {
        self.check(pos);
        assert!(
            pos.slot != self.storage.tail(),
            "position {pos} is the end position, not an element"
        );
    }

    /// Position of the first element (equal to [`end`](Self::end) when empty).
    pub fn begin(&self) -> Pos {
        self.pos(self.storage.head())
    }

    /// Position one past the last element.
    pub fn end(&self) -> Pos {
        self.pos(self.storage.tail())
    }

    /// Logical index of `pos`; the end position maps to `len()`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not valid for this buffer.
    pub fn index_of(&self, pos: Pos) -> usize {
        self.check(pos);
        self.storage.index_of(pos.slot)
    }

    /// Position of logical index `index`; `len()` maps to the end position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    pub fn pos_of(&self, index: usize) -> Pos {
        assert!(
            index <= self.len(),
            "index {index} out of bounds for ring of length {}",
            self.len()
        );
        self.pos(self.storage.slot_of(index))
    }

    /// The position after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or already the end position.
    pub fn next(&self, pos: Pos) -> Pos {
        self.check_element(pos);
        self.pos(self.storage.advance(pos.slot))
    }

    /// The position before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or the first position.
    pub fn prev(&self, pos: Pos) -> Pos {
        self.check(pos);
        assert!(
            pos.slot != self.storage.head(),
            "position {pos} is the first position"
        );
        self.pos(self.storage.retreat(pos.slot))
    }

    /// Step `pos` forward by one, in place.
    pub fn forward(&self, pos: &mut Pos) {
        *pos = self.next(*pos);
    }

    /// Step `pos` backward by one, in place.
    pub fn backward(&self, pos: &mut Pos) {
        *pos = self.prev(*pos);
    }

    /// The position `offset` elements after `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the result would lie past the end position.
    pub fn next_by(&self, pos: Pos, offset: usize) -> Pos {
        let index = self.index_of(pos);
        assert!(
            offset <= self.len() - index,
            "offset {offset} from index {index} passes the end of a ring of length {}",
            self.len()
        );
        self.pos(self.storage.forward_by(pos.slot, offset))
    }

    /// The position `offset` elements before `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the result would lie before the first position.
    pub fn prev_by(&self, pos: Pos, offset: usize) -> Pos {
        let index = self.index_of(pos);
        assert!(
            offset <= index,
            "offset {offset} from index {index} passes the start of the ring"
        );
        self.pos(self.storage.backward_by(pos.slot, offset))
    }

    /// A range covering every element.
    pub fn all(&self) -> Range {
        self.make_range(self.storage.head(), self.storage.tail())
    }

    /// The range `[begin, end)`.
    ///
    /// # Panics
    ///
    /// Panics if either position is invalid or `end` precedes `begin`.
    pub fn range(&self, begin: Pos, end: Pos) -> Range {
        let first = self.index_of(begin);
        let last = self.index_of(end);
        assert!(
            first <= last,
            "range end {end} precedes begin {begin}"
        );
        self.make_range(begin.slot, end.slot)
    }

    /// The range from `pos` to the end.
    pub fn range_from(&self, pos: Pos) -> Range {
        self.check(pos);
        self.make_range(pos.slot, self.storage.tail())
    }

    /// The range from the first element up to (excluding) `pos`.
    pub fn range_to(&self, pos: Pos) -> Range {
        self.check(pos);
        self.make_range(self.storage.head(), pos.slot)
    }

    fn make_range(&self, begin: usize, end: usize) -> Range {
        Range::new(self.id, self.layout, begin, end, self.storage.slot_count())
    }

    // ── Element access ──────────────────────────────────────────────

    /// The element at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or the end position.
    pub fn get(&self, pos: Pos) -> &T {
        self.check_element(pos);
        self.storage
            .get(pos.slot)
            .expect("live slot inside [head, tail) is always occupied")
    }

    /// Mutable access to the element at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or the end position.
    pub fn get_mut(&mut self, pos: Pos) -> &mut T {
        self.check_element(pos);
        self.storage
            .get_mut(pos.slot)
            .expect("live slot inside [head, tail) is always occupied")
    }

    /// Overwrite the element at `pos`, returning the previous value.
    pub fn set(&mut self, pos: Pos, value: T) -> T {
        mem::replace(self.get_mut(pos), value)
    }

    /// The first element, if any.
    pub fn front(&self) -> Option<&T> {
        self.at(0)
    }

    /// The last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|i| self.at(i))
    }

    /// The element at logical index `index`, if in bounds.
    pub fn at(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            self.storage.get(self.storage.slot_of(index))
        } else {
            None
        }
    }

    /// Mutable access to the element at logical index `index`, if in bounds.
    pub fn at_mut(&mut self, index: usize) -> Option<&mut T> {
        if index < self.len() {
            let slot = self.storage.slot_of(index);
            self.storage.get_mut(slot)
        } else {
            None
        }
    }

    // ── Iteration ───────────────────────────────────────────────────

    /// Front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.storage.runs(self.storage.head(), self.len()))
    }

    /// Front-to-back iterator over the elements of `range`.
    ///
    /// # Panics
    ///
    /// Panics if the range was not issued by this buffer under its
    /// current layout.
    pub fn iter_range(&self, range: Range) -> Iter<'_, T> {
        self.check(range.begin());
        self.check(range.end());
        Iter::new(self.storage.runs(range.begin, range.len()))
    }

    /// Front-to-back iterator over mutable references.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.storage.live_runs_mut())
    }

    // ── Insertion ───────────────────────────────────────────────────

    /// Insert `value` before the element at `pos` (or at the end, for the
    /// end position), shifting whichever side has fewer elements.
    ///
    /// Grows first if the buffer is full; `pos` is re-anchored by logical
    /// index across the growth. Returns the position of the inserted
    /// element. Invalidates all other outstanding positions.
    ///
    /// # Errors
    ///
    /// Growth failure leaves the buffer unchanged and drops `value`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is not valid for this buffer.
    pub fn insert_at(&mut self, pos: Pos, value: T) -> Result<Pos, RingError> {
        self.check(pos);
        let mut slot = pos.slot;
        if self.is_full() {
            let index = self.storage.index_of(slot);
            self.grow()?;
            slot = self.storage.slot_of(index);
        }
        let (gap, moved) = self.storage.open_gap(slot);
        self.storage.put(gap, value);
        self.stats.shifted += moved as u64;
        self.bump_layout();
        Ok(self.pos(gap))
    }

    /// Insert `value` before the first element.
    ///
    /// Positions stay valid unless the buffer had to grow.
    pub fn insert_front(&mut self, value: T) -> Result<Pos, RingError> {
        if self.is_full() {
            self.grow()?;
        }
        let slot = self.storage.push_front(value);
        Ok(self.pos(slot))
    }

    /// Insert `value` after the last element.
    ///
    /// Positions stay valid unless the buffer had to grow.
    pub fn insert_back(&mut self, value: T) -> Result<Pos, RingError> {
        if self.is_full() {
            self.grow()?;
        }
        let slot = self.storage.push_back(value);
        Ok(self.pos(slot))
    }

    // ── Removal ─────────────────────────────────────────────────────

    /// Remove the element at `pos` and hand it to the disposer.
    ///
    /// Returns the position of the element that followed it (or the end
    /// position). Invalidates all other outstanding positions.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or the end position.
    pub fn remove_at(&mut self, pos: Pos) -> Pos {
        let (value, next) = self.take_at(pos);
        self.dispose(value);
        next
    }

    /// Remove the element at `pos` and return it without disposing it.
    ///
    /// Invalidates all outstanding positions.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is invalid or the end position.
    pub fn release_at(&mut self, pos: Pos) -> T {
        self.take_at(pos).0
    }

    fn take_at(&mut self, pos: Pos) -> (T, Pos) {
        self.check_element(pos);
        let (value, next, moved) = self.storage.close_gap(pos.slot);
        self.stats.shifted += moved as u64;
        self.bump_layout();
        (value, self.pos(next))
    }

    /// Remove the first element and hand it to the disposer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn remove_front(&mut self) {
        assert!(!self.is_empty(), "remove_front on an empty ring");
        if let Some(value) = self.storage.pop_front() {
            self.dispose(value);
        }
    }

    /// Remove the last element and hand it to the disposer.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is empty.
    pub fn remove_back(&mut self) {
        assert!(!self.is_empty(), "remove_back on an empty ring");
        if let Some(value) = self.storage.pop_back() {
            self.dispose(value);
        }
    }

    /// Remove and return the first element, bypassing the disposer.
    pub fn pop_front(&mut self) -> Option<T> {
        self.storage.pop_front()
    }

    /// Remove and return the last element, bypassing the disposer.
    pub fn pop_back(&mut self) -> Option<T> {
        self.storage.pop_back()
    }

    /// Dispose every element in logical order and reset to empty.
    ///
    /// Capacity is kept. Invalidates all outstanding positions.
    pub fn clear(&mut self) {
        self.dispose_all();
        self.bump_layout();
    }

    fn dispose(&mut self, value: T) {
        match self.disposer.as_mut() {
            Some(disposer) => disposer(value),
            None => drop(value),
        }
    }

    fn dispose_all(&mut self) {
        let disposer = &mut self.disposer;
        self.storage.drain_with(|value| match disposer.as_mut() {
            Some(disposer) => disposer(value),
            None => drop(value),
        });
    }
}

impl<T> Drop for RingBuf<T> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for RingBuf<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for RingBuf<T> {}

impl<T> Index<usize> for RingBuf<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        let len = self.len();
        self.at(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for ring of length {len}"))
    }
}

impl<T> IndexMut<usize> for RingBuf<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        self.at_mut(index)
            .unwrap_or_else(|| panic!("index {index} out of bounds for ring of length {len}"))
    }
}

impl<'a, T> IntoIterator for &'a RingBuf<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut RingBuf<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T> IntoIterator for RingBuf<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}
