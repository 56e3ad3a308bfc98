//! Exponential moving average

use crate::traits::{Average, ConfigError, Estimator, StatsError};
use core::marker::PhantomData;

/// Exponentially weighted moving average
///
/// `ema = alpha * x + (1 - alpha) * ema_prev`, with `ema_prev` starting at
/// zero. The first readings are therefore pulled toward zero until enough
/// samples have been blended in; with `alpha = 1` the average simply tracks
/// the latest sample.
///
/// # Example
///
/// ```
/// use movingstats::averages::ExponentialAverage;
/// use movingstats::traits::Estimator;
///
/// let mut ema = ExponentialAverage::<f32>::new(0.5).unwrap();
/// ema.update(8.0);
/// assert_eq!(ema.value(), Some(4.0));
/// ema.update(8.0);
/// assert_eq!(ema.value(), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct ExponentialAverage<U> {
    alpha: f64,
    ema: f64,
    count: u64,
    _marker: PhantomData<U>,
}

impl<U: Average> ExponentialAverage<U> {
    /// Create an average with smoothing factor `alpha` in `[0, 1]`
    pub fn new(alpha: f32) -> Result<Self, ConfigError> {
        if !alpha.is_finite() || !(0.0..=1.0).contains(&alpha) {
            return Err(ConfigError::InvalidSmoothingFactor(alpha));
        }
        Ok(Self {
            alpha: f64::from(alpha),
            ema: 0.0,
            count: 0,
            _marker: PhantomData,
        })
    }

    /// Smoothing factor
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Blend one sample in
    ///
    /// Values that cannot be widened to `f64` and NaN are ignored.
    pub fn add(&mut self, value: U) {
        let Ok(value) = value.widen() else {
            return;
        };
        if value.is_nan() {
            return;
        }
        self.ema = self.alpha * value + (1.0 - self.alpha) * self.ema;
        self.count += 1;
    }

    /// Unrounded average
    pub fn ema(&self) -> f64 {
        self.ema
    }

    /// Average narrowed to `U`
    pub fn read(&self) -> Result<U, StatsError> {
        if self.count == 0 {
            return Err(StatsError::Empty);
        }
        U::narrow(self.ema)
    }
}

impl<U: Average> Estimator for ExponentialAverage<U> {
    type Item = U;
    type Output = U;

    fn update(&mut self, item: U) {
        self.add(item);
    }

    fn value(&self) -> Option<U> {
        self.read().ok()
    }

    fn clear(&mut self) {
        self.ema = 0.0;
        self.count = 0;
    }

    fn count(&self) -> u64 {
        self.count
    }
}
