//! Core traits and error types
//!
//! The engine talks to its collaborators through the traits in this module:
//! [`BoundedSequence`] for window storage, [`OrderStatistics`] for rank
//! queries and [`Estimator`] for the running (non-windowed) averages.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

use num_traits::{NumCast, ToPrimitive, Zero};

/// Error returned by estimator reads and rank queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// Requested rank is past the end of the structure
    ///
    /// Also returned for the median of an empty structure (`index == len == 0`).
    #[error("index {index} out of range for {len} elements")]
    OutOfRange {
        /// Requested 0-based rank
        index: usize,
        /// Number of elements present
        len: usize,
    },
    /// The estimator has not seen any sample yet
    #[error("no samples available")]
    Empty,
    /// Linear recency weights are meaningless for a window of one element
    #[error("weighted average needs a window of at least 2 elements, got {window_size}")]
    DegenerateWeights {
        /// Configured window capacity
        window_size: usize,
    },
    /// A computed result does not fit in the averaging type
    #[error("result cannot be represented in the averaging type")]
    Conversion,
}

/// Error raised when validating a configuration
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// The window must hold at least one sample
    #[error("window size must be at least 1")]
    ZeroWindow,
    /// Smoothing factor outside `[0, 1]` or not finite
    #[error("smoothing factor must be within [0, 1], got {0}")]
    InvalidSmoothingFactor(f32),
}

/// Numeric type results are computed in
///
/// Blanket-implemented for every primitive integer and float. Sums are never
/// accumulated in `Self`; they are widened to `f64` and converted back, so
/// `i16` or `u8` averages cannot overflow mid-computation.
pub trait Average:
    Copy
    + Default
    + Debug
    + PartialOrd
    + Zero
    + NumCast
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Widen to the accumulator type
    fn widen(self) -> Result<f64, StatsError> {
        self.to_f64().ok_or(StatsError::Conversion)
    }

    /// Narrow an accumulator value back into `Self`
    ///
    /// Integer targets truncate toward zero, matching integer division.
    fn narrow(value: f64) -> Result<Self, StatsError> {
        <Self as NumCast>::from(value).ok_or(StatsError::Conversion)
    }

    /// `false` for NaN, which has no place in an ordered window
    #[allow(clippy::eq_op)]
    fn is_comparable(&self) -> bool {
        self == self
    }
}

impl<U> Average for U where
    U: Copy
        + Default
        + Debug
        + PartialOrd
        + Zero
        + NumCast
        + Add<Output = U>
        + Sub<Output = U>
        + Mul<Output = U>
        + Div<Output = U>
{
}

/// Fixed-capacity, insertion-ordered storage for the trailing window
///
/// Indices run from the oldest (`0`) to the newest (`len() - 1`) element.
pub trait BoundedSequence<U> {
    /// Maximum number of elements held
    fn capacity(&self) -> usize;

    /// Number of elements currently held
    fn len(&self) -> usize;

    /// Remove and return the oldest element
    fn front_remove(&mut self) -> Option<U>;

    /// Append at the back, assuming there is room
    ///
    /// Returns the value back if the storage is full. Callers wanting
    /// eviction use [`append`](Self::append).
    fn push_back(&mut self, value: U) -> Result<(), U>;

    /// Element at `index`, oldest first
    fn get(&self, index: usize) -> Option<&U>;

    /// Mutable element at `index`, oldest first
    fn get_mut(&mut self, index: usize) -> Option<&mut U>;

    /// Iterate oldest to newest
    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a U> + 'a
    where
        U: 'a;

    /// Remove every element
    fn clear(&mut self);

    /// Append `value`, evicting the oldest element first when full
    ///
    /// Returns the evicted element, if any. A zero-capacity sequence drops the
    /// value and hands it back as "evicted".
    fn append(&mut self, value: U) -> Option<U> {
        if self.capacity() == 0 {
            return Some(value);
        }
        let evicted = if self.is_full() {
            self.front_remove()
        } else {
            None
        };
        match self.push_back(value) {
            Ok(()) => evicted,
            Err(value) => Some(value),
        }
    }

    /// Alias of [`len`](Self::len)
    fn size(&self) -> usize {
        self.len()
    }

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if at capacity
    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// Sorted set of distinct values with rank access
pub trait OrderStatistics {
    /// The ordered value type
    type Value: PartialOrd + Copy;

    /// Insert `value`; returns `false` if it was already present
    fn insert(&mut self, value: Self::Value) -> bool;

    /// Remove `value`; returns whether it was present
    fn remove(&mut self, value: Self::Value) -> bool;

    /// Value at 0-based rank `index`
    fn at(&self, index: usize) -> Result<Self::Value, StatsError>;

    /// Number of distinct values held
    fn len(&self) -> usize;

    /// Check if empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at rank `len / 2`
    ///
    /// For an even count this is the upper median; the two middle values are
    /// never averaged.
    fn get_median(&self) -> Result<Self::Value, StatsError> {
        self.at(self.len() / 2)
    }
}

/// A running estimator fed one sample at a time
pub trait Estimator: Clone + Debug {
    /// Sample type
    type Item;
    /// Result type
    type Output;

    /// Feed one sample
    fn update(&mut self, item: Self::Item);

    /// Current estimate, `None` before the first sample
    fn value(&self) -> Option<Self::Output>;

    /// Reset to the freshly constructed state
    fn clear(&mut self);

    /// Number of samples fed
    fn count(&self) -> u64;

    /// Check if no sample was fed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}
