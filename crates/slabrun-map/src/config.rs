//! Map construction parameters.

use crate::error::MapError;

/// Initial sizing and growth policy for a [`ChainedMap`](crate::ChainedMap).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapConfig {
    /// Bucket count before any growth. Must be at least 1.
    pub initial_buckets: usize,
    /// Load factor at which an insert first doubles the bucket count.
    /// Must be finite and positive.
    pub max_load_factor: f32,
}

impl MapConfig {
    /// Default initial bucket count.
    pub const DEFAULT_INITIAL_BUCKETS: usize = 1024;
    /// Default maximum load factor.
    pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 1.0;

    /// Config with `initial_buckets` and the default load factor.
    pub fn new(initial_buckets: usize) -> Self {
        Self {
            initial_buckets,
            max_load_factor: Self::DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    /// Replace the maximum load factor.
    pub fn with_max_load_factor(mut self, max_load_factor: f32) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Check both fields.
    pub fn validate(&self) -> Result<(), MapError> {
        if self.initial_buckets == 0 {
            return Err(MapError::InvalidConfig {
                reason: "initial_buckets must be at least 1".to_string(),
            });
        }
        validate_load_factor(self.max_load_factor)
    }
}

pub(crate) fn validate_load_factor(mlf: f32) -> Result<(), MapError> {
    if !mlf.is_finite() || mlf <= 0.0 {
        return Err(MapError::InvalidConfig {
            reason: format!("max_load_factor must be finite and positive, got {mlf}"),
        });
    }
    Ok(())
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INITIAL_BUCKETS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_1024_buckets_at_unit_load() {
        let config = MapConfig::default();
        assert_eq!(config.initial_buckets, 1024);
        assert_eq!(config.max_load_factor, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_buckets_rejected() {
        let err = MapConfig::new(0).validate().unwrap_err();
        assert!(matches!(err, MapError::InvalidConfig { .. }));
    }

    #[test]
    fn bad_load_factors_rejected() {
        for mlf in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(MapConfig::new(8).with_max_load_factor(mlf).validate().is_err());
        }
        assert!(MapConfig::new(8).with_max_load_factor(0.25).validate().is_ok());
    }
}
