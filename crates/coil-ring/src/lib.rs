//! A growable circular buffer with position handles.
//!
//! [`RingBuf`] stores a sequence in one contiguous slot block with two
//! wrapping boundaries. Both ends support O(1) insertion and removal;
//! insertion and removal at an arbitrary position shift whichever side of
//! the target holds fewer elements. When full, the buffer grows by a
//! configurable factor and relinearizes by moving only the shorter of its
//! two physical runs.
//!
//! # Architecture
//!
//! ```text
//! RingBuf<T> (public API, handle validation, disposer, stats)
//! ├── Storage<T>      Vec<Option<T>> of capacity + 1 slots, head/tail
//! ├── capacity        growth policy, max capacity, relinearization
//! ├── engine          fewer-side gap opening and closing
//! ├── handle          BufferId, Pos, Range (layout-epoch stamped)
//! └── iter            two-run borrowing iterators, owning IntoIter
//! ```
//!
//! # Position invalidation
//!
//! A [`Pos`] carries the buffer's identity and its layout epoch. Growth and
//! every arbitrary-position insert or remove move elements between slots,
//! so they bump the epoch; a stale handle then panics when used instead of
//! silently naming the wrong element. Insertion and removal at the ends
//! without growth leave existing handles valid.
//!
//! ```
//! use coil_ring::{RingBuf, RingConfig};
//!
//! let mut ring = RingBuf::new(RingConfig::new(4).with_min_capacity(1)).unwrap();
//! for v in 1..=4 {
//!     ring.insert_back(v).unwrap();
//! }
//! let third = ring.pos_of(2);
//! let index = ring.index_of(third);
//!
//! // Full: this insert grows the buffer and invalidates `third`.
//! ring.insert_front(0).unwrap();
//! assert!(!ring.valid(third));
//!
//! let third = ring.pos_of(index + 1);
//! assert_eq!(*ring.get(third), 3);
//! assert_eq!(ring.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3, 4]);
//! ```
//!
//! # Safety
//!
//! Slots are `Option<T>` in a `Vec`; no `unsafe` is used. Element moves are
//! slice rotations and swaps.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod capacity;
pub mod config;
mod engine;
pub mod error;
pub mod handle;
pub mod iter;
pub mod metrics;
pub mod ring;
mod storage;

// Public re-exports for the primary API surface.
pub use config::{ConfigError, RingConfig};
pub use error::RingError;
pub use handle::{BufferId, Pos, Range};
pub use iter::{IntoIter, Iter, IterMut};
pub use metrics::RingStats;
pub use ring::{Disposer, RingBuf};
