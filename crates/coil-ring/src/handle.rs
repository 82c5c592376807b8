//! Position and range handles.
//!
//! A [`Pos`] names one slot of one buffer. It is layout-scoped: the
//! `layout` epoch allows O(1) detection of handles that outlived a
//! growth or shift without any lookup table. Handles are plain `Copy`
//! values and carry no ownership.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`BufferId`] allocation.
static BUFFER_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for a ring buffer.
///
/// Two distinct buffers always have different IDs, so a handle taken
/// from one buffer is never accepted by another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferId(u64);

impl BufferId {
    /// Allocate a fresh, unique buffer ID.
    pub(crate) fn next() -> Self {
        Self(BUFFER_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BufferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A cursor identifying one slot inside a specific buffer.
///
/// Obtained from [`RingBuf::begin`](crate::RingBuf::begin),
/// [`RingBuf::pos_of`](crate::RingBuf::pos_of), the insertion methods and
/// the stepping methods. A position stays usable until the buffer moves
/// elements between slots (growth, `insert_at`, `remove_at`, `release_at`,
/// `clear`); after that, convert through a logical index with
/// [`index_of`](crate::RingBuf::index_of) before the call and
/// [`pos_of`](crate::RingBuf::pos_of) after it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Pos {
    /// Buffer this position was taken from.
    pub(crate) buf: BufferId,
    /// Layout epoch of that buffer when the position was taken.
    pub(crate) layout: u64,
    /// Physical slot index.
    pub(crate) slot: usize,
}

impl Pos {
    pub(crate) fn new(buf: BufferId, layout: u64, slot: usize) -> Self {
        Self { buf, layout, slot }
    }

    /// The buffer this position belongs to.
    pub fn buffer(&self) -> BufferId {
        self.buf
    }

    /// The physical slot index.
    pub fn slot(&self) -> usize {
        self.slot
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Pos(buf={}, layout={}, slot={})",
            self.buf, self.layout, self.slot
        )
    }
}

/// A half-open span of slots `[begin, end)` inside a specific buffer.
///
/// The range records the physical slot count of its buffer, so its length
/// can be computed with the wrap rule without consulting the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct Range {
    pub(crate) buf: BufferId,
    pub(crate) layout: u64,
    pub(crate) begin: usize,
    pub(crate) end: usize,
    /// Physical slot count (capacity + 1) of the owning buffer.
    pub(crate) slots: usize,
}

impl Range {
    pub(crate) fn new(buf: BufferId, layout: u64, begin: usize, end: usize, slots: usize) -> Self {
        Self {
            buf,
            layout,
            begin,
            end,
            slots,
        }
    }

    /// Position of the first element.
    pub fn begin(&self) -> Pos {
        Pos::new(self.buf, self.layout, self.begin)
    }

    /// Position one past the last element.
    pub fn end(&self) -> Pos {
        Pos::new(self.buf, self.layout, self.end)
    }

    /// Number of elements in the range.
    pub fn len(&self) -> usize {
        if self.end >= self.begin {
            self.end - self.begin
        } else {
            self.end + self.slots - self.begin
        }
    }

    /// Whether the range contains no elements.
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range(buf={}, layout={}, {}..{})",
            self.buf, self.layout, self.begin, self.end
        )
    }
}
