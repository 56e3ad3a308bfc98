//! Cumulative average over the whole stream
//!
//! Keeps only a running sum and a count; the history itself is never stored.

use crate::traits::{Average, Estimator, StatsError};
use core::marker::PhantomData;

/// Running mean of every sample seen so far
///
/// Samples are summed in an `f64` accumulator regardless of `U`, so long
/// streams of `i16` readings do not overflow. The sum is divided once on read
/// and narrowed back to `U`; integer sums up to 2^53 stay exact, so integer
/// `U` truncates exactly like integer division.
///
/// # Example
///
/// ```
/// use movingstats::averages::CumulativeAverage;
/// use movingstats::traits::Estimator;
///
/// let mut ca = CumulativeAverage::<i16>::new();
/// for v in [10, 11, 13] {
///     ca.update(v);
/// }
///
/// // 34 / 3, truncated like integer division
/// assert_eq!(ca.value(), Some(11));
/// assert!((ca.mean() - 11.333).abs() < 0.001);
/// ```
#[derive(Clone, Debug)]
pub struct CumulativeAverage<U> {
    /// Number of values seen
    count: u64,
    /// Sum of every value
    sum: f64,
    _marker: PhantomData<U>,
}

impl<U: Average> Default for CumulativeAverage<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Average> CumulativeAverage<U> {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            _marker: PhantomData,
        }
    }

    /// Add a value
    ///
    /// Values that cannot be widened to `f64` and NaN are ignored so that one
    /// bad reading does not poison the mean.
    pub fn add(&mut self, value: U) {
        let Ok(value) = value.widen() else {
            return;
        };
        if value.is_nan() {
            return;
        }

        self.count += 1;
        self.sum += value;
    }

    /// Unrounded running mean, 0.0 when empty
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.sum / self.count as f64
    }

    /// Number of values seen
    pub fn len(&self) -> u64 {
        self.count
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Mean narrowed to `U`
    pub fn read(&self) -> Result<U, StatsError> {
        if self.count == 0 {
            return Err(StatsError::Empty);
        }
        U::narrow(self.mean())
    }
}

impl<U: Average> Estimator for CumulativeAverage<U> {
    type Item = U;
    type Output = U;

    fn update(&mut self, item: U) {
        self.add(item);
    }

    fn value(&self) -> Option<U> {
        self.read().ok()
    }

    fn clear(&mut self) {
        *self = Self::new();
    }

    fn count(&self) -> u64 {
        self.count
    }
}
