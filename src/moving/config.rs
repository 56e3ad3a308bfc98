//! Engine configuration

use crate::order::DEFAULT_SEED;
use crate::traits::ConfigError;

/// Settings for a [`MovingAverage`](super::MovingAverage)
///
/// # Example
///
/// ```
/// use movingstats::moving::MovingAverageConfig;
///
/// let config = MovingAverageConfig::new(16)
///     .with_smoothing_factor(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
///
/// assert!(MovingAverageConfig::new(0).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovingAverageConfig {
    /// Capacity of the trailing window used by the simple, weighted and median estimators
    pub window_size: usize,
    /// Weight of the newest sample in the exponential average, within `[0, 1]`
    pub smoothing_factor: f32,
    /// Seed for skip-list level draws
    pub seed: u64,
}

impl Default for MovingAverageConfig {
    fn default() -> Self {
        Self {
            window_size: Self::DEFAULT_WINDOW_SIZE,
            smoothing_factor: Self::DEFAULT_SMOOTHING_FACTOR,
            seed: DEFAULT_SEED,
        }
    }
}

impl MovingAverageConfig {
    /// Window capacity used by [`Default`]
    pub const DEFAULT_WINDOW_SIZE: usize = 10;
    /// Smoothing factor used by [`Default`]
    pub const DEFAULT_SMOOTHING_FACTOR: f32 = 0.5;

    /// Default settings with the given window capacity
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            ..Self::default()
        }
    }

    /// Set the exponential smoothing factor
    pub fn with_smoothing_factor(mut self, smoothing_factor: f32) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    /// Set the skip-list seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every field
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindow);
        }
        if !self.smoothing_factor.is_finite() || !(0.0..=1.0).contains(&self.smoothing_factor) {
            return Err(ConfigError::InvalidSmoothingFactor(self.smoothing_factor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(MovingAverageConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_rejects_zero_window() {
        assert_eq!(
            MovingAverageConfig::new(0).validate(),
            Err(ConfigError::ZeroWindow)
        );
    }

    #[test]
    fn test_rejects_smoothing_factor_out_of_range() {
        let config = MovingAverageConfig::new(4).with_smoothing_factor(1.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidSmoothingFactor(1.5))
        );
        let config = MovingAverageConfig::new(4).with_smoothing_factor(f32::INFINITY);
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let config: MovingAverageConfig =
            serde_json::from_str(r#"{ "window_size": 5 }"#).unwrap();
        assert_eq!(config.window_size, 5);
        assert_eq!(
            config.smoothing_factor,
            MovingAverageConfig::DEFAULT_SMOOTHING_FACTOR
        );
        assert_eq!(config.seed, DEFAULT_SEED);
    }
}
