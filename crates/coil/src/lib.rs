//! Coil: growable circular buffers.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the coil sub-crates. For most users, adding `coil` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use coil::prelude::*;
//!
//! let mut ring = RingBuf::new(RingConfig::new(8)).unwrap();
//! ring.insert_back("b").unwrap();
//! ring.insert_back("d").unwrap();
//! ring.insert_front("a").unwrap();
//!
//! // Arbitrary-position insert shifts the shorter side.
//! let d = ring.pos_of(2);
//! ring.insert_at(d, "c").unwrap();
//! assert_eq!(ring.iter().copied().collect::<Vec<_>>(), ["a", "b", "c", "d"]);
//!
//! // Positions step across the physical wrap transparently.
//! let mut pos = ring.begin();
//! let mut seen = String::new();
//! while pos != ring.end() {
//!     seen.push_str(ring.get(pos));
//!     ring.forward(&mut pos);
//! }
//! assert_eq!(seen, "abcd");
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`ring`] | `coil-ring` | `RingBuf`, positions, ranges, config, errors, stats |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The growable ring buffer (`coil-ring`).
///
/// Most users only need [`ring::RingBuf`] and [`ring::RingConfig`]; both
/// are also available in the [`prelude`].
pub use coil_ring as ring;

/// Common imports for typical coil usage.
///
/// ```rust
/// use coil::prelude::*;
/// ```
///
/// This imports the buffer, its config, position handles and error types.
pub mod prelude {
    // Buffer and config
    pub use coil_ring::{RingBuf, RingConfig};

    // Handles
    pub use coil_ring::{Pos, Range};

    // Errors
    pub use coil_ring::{ConfigError, RingError};
}
