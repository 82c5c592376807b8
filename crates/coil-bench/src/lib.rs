//! Benchmark workloads for the coil ring buffer.
//!
//! - [`wrapped_ring`]: a ring of a given size whose contents straddle the
//!   physical end of the slot block
//! - [`index_stream`]: a deterministic stream of logical indices via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use coil_ring::{RingBuf, RingConfig, RingError};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Build a full ring of `len` elements with its head placed half way
/// through the slot block, so both physical runs are populated.
pub fn wrapped_ring(len: usize) -> Result<RingBuf<u64>, RingError> {
    let mut ring = RingBuf::new(RingConfig::new(len).with_min_capacity(1))?;
    let offset = len / 2;
    for v in 0..offset as u64 {
        ring.insert_back(v)?;
    }
    for _ in 0..offset {
        ring.pop_front();
    }
    for v in 0..len as u64 {
        ring.insert_back(v)?;
    }
    Ok(ring)
}

/// `count` pseudo-random values in `0..bound`, reproducible from `seed`.
///
/// Each value is reduced from a full `u64` draw, which is close enough to
/// uniform for bounds far below `u64::MAX`.
pub fn index_stream(seed: u64, count: usize, bound: usize) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count)
        .map(|_| (rng.next_u64() % bound.max(1) as u64) as usize)
        .collect()
}
