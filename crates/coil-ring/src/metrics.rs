//! Cumulative data-movement counters for a ring buffer.

/// Counters describing how much work a buffer has done moving elements.
///
/// Updated by every growth and every arbitrary-position insertion or
/// removal; read through [`RingBuf::stats`](crate::RingBuf::stats).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RingStats {
    /// Number of successful growth events.
    pub growths: u64,
    /// Elements moved to relinearize a wrapped buffer after growth.
    pub relinearized: u64,
    /// Elements shifted by `insert_at`, `remove_at` and `release_at`.
    pub shifted: u64,
}
