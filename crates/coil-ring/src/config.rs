//! Ring buffer configuration and validation.

use std::error::Error;
use std::fmt;

/// Configuration for a [`RingBuf`](crate::RingBuf).
///
/// Controls the starting size and the growth policy. Validated at
/// construction; all values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingConfig {
    /// Number of live elements the buffer can hold before its first growth.
    ///
    /// Raised to `min_capacity` if smaller. Default: 15.
    pub initial_capacity: usize,

    /// Floor applied to the initial capacity and to every growth target.
    ///
    /// Default: 15. Must be at least 1.
    pub min_capacity: usize,

    /// Multiplier applied to the capacity when a full buffer grows.
    ///
    /// Default: 2. Must lie in `[2, 16]`.
    pub growth_factor: usize,
}

impl RingConfig {
    /// Default initial capacity.
    pub const DEFAULT_INITIAL_CAPACITY: usize = 15;

    /// Default capacity floor.
    pub const DEFAULT_MIN_CAPACITY: usize = 15;

    /// Default growth multiplier.
    pub const DEFAULT_GROWTH_FACTOR: usize = 2;

    /// Largest accepted growth multiplier.
    pub const MAX_GROWTH_FACTOR: usize = 16;

    /// Create a config with the given initial capacity.
    ///
    /// Uses default values for all other parameters.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            initial_capacity,
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            growth_factor: Self::DEFAULT_GROWTH_FACTOR,
        }
    }

    /// Replace the capacity floor.
    pub fn with_min_capacity(mut self, min_capacity: usize) -> Self {
        self.min_capacity = min_capacity;
        self
    }

    /// Replace the growth multiplier.
    pub fn with_growth_factor(mut self, growth_factor: usize) -> Self {
        self.growth_factor = growth_factor;
        self
    }

    /// The capacity a new buffer starts with once the floor is applied.
    pub fn effective_initial_capacity(&self) -> usize {
        self.initial_capacity.max(self.min_capacity)
    }

    /// Check the structural invariants of this config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.growth_factor < 2 {
            return Err(ConfigError::GrowthFactorTooSmall {
                configured: self.growth_factor,
            });
        }
        if self.growth_factor > Self::MAX_GROWTH_FACTOR {
            return Err(ConfigError::GrowthFactorTooLarge {
                configured: self.growth_factor,
            });
        }
        if self.min_capacity == 0 {
            return Err(ConfigError::MinCapacityZero);
        }
        Ok(())
    }
}

impl Default for RingConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_CAPACITY)
    }
}

/// Errors detected during [`RingConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Growth factor below 2 would never make room for a new element.
    GrowthFactorTooSmall {
        /// The configured factor.
        configured: usize,
    },
    /// Growth factor above [`RingConfig::MAX_GROWTH_FACTOR`].
    GrowthFactorTooLarge {
        /// The configured factor.
        configured: usize,
    },
    /// A zero capacity floor would allow a buffer with no usable slots.
    MinCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GrowthFactorTooSmall { configured } => {
                write!(f, "growth_factor {configured} is below minimum of 2")
            }
            Self::GrowthFactorTooLarge { configured } => {
                write!(
                    f,
                    "growth_factor {configured} exceeds maximum of {}",
                    RingConfig::MAX_GROWTH_FACTOR
                )
            }
            Self::MinCapacityZero => write!(f, "min_capacity must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_constants() {
        let config = RingConfig::default();
        assert_eq!(config.initial_capacity, 15);
        assert_eq!(config.min_capacity, 15);
        assert_eq!(config.growth_factor, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn floor_applies_to_initial_capacity() {
        assert_eq!(RingConfig::new(4).effective_initial_capacity(), 15);
        let config = RingConfig::new(4).with_min_capacity(1);
        assert_eq!(config.effective_initial_capacity(), 4);
    }

    #[test]
    fn growth_factor_below_two_rejected() {
        let config = RingConfig::new(8).with_growth_factor(1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::GrowthFactorTooSmall { configured: 1 })
        );
    }

    #[test]
    fn growth_factor_above_max_rejected() {
        let config = RingConfig::new(8).with_growth_factor(17);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GrowthFactorTooLarge { configured: 17 })
        ));
    }

    #[test]
    fn zero_floor_rejected() {
        let config = RingConfig::new(8).with_min_capacity(0);
        assert_eq!(config.validate(), Err(ConfigError::MinCapacityZero));
    }

    #[test]
    fn error_messages_name_the_value() {
        let msg = ConfigError::GrowthFactorTooSmall { configured: 1 }.to_string();
        assert!(msg.contains("growth_factor 1"));
    }
}
