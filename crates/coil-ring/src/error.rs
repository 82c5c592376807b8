//! Ring-buffer error types.
//!
//! Only resource exhaustion and bad configuration are reported as errors.
//! Invalid positions and removal from an empty buffer are programmer
//! errors and panic instead.

use std::error::Error;
use std::fmt;

use crate::config::ConfigError;

/// Recoverable failures of construction and growth.
///
/// Whenever one of these is returned, the buffer is left exactly as it
/// was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RingError {
    /// The requested capacity exceeds what the element type can address,
    /// or the buffer is already at its maximum capacity.
    CapacityExceeded {
        /// Number of live elements requested.
        requested: usize,
        /// Largest capacity this buffer can reach.
        max: usize,
    },
    /// The allocator could not provide the backing storage.
    AllocationFailed {
        /// Total number of slots (including the sentinel) requested.
        slots: usize,
    },
    /// The config passed at construction failed validation.
    InvalidConfig(ConfigError),
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded { requested, max } => {
                write!(
                    f,
                    "ring capacity exceeded: requested {requested} elements, max {max}"
                )
            }
            Self::AllocationFailed { slots } => {
                write!(f, "allocating {slots} ring slots failed")
            }
            Self::InvalidConfig(e) => write!(f, "invalid ring config: {e}"),
        }
    }
}

impl Error for RingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for RingError {
    fn from(e: ConfigError) -> Self {
        Self::InvalidConfig(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_is_source() {
        let err = RingError::from(ConfigError::MinCapacityZero);
        let source = err.source().expect("config error has a source");
        assert_eq!(source.to_string(), "min_capacity must be at least 1");
    }

    #[test]
    fn capacity_error_display() {
        let err = RingError::CapacityExceeded {
            requested: 10,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "ring capacity exceeded: requested 10 elements, max 4"
        );
        assert!(err.source().is_none());
    }
}
