//! Moving and running averages
//!
//! # Estimators
//!
//! - [`simple_mean`] and [`weighted_mean`]: computed over a bounded window
//! - [`CumulativeAverage`]: mean of the whole stream in O(1) memory
//! - [`ExponentialAverage`]: exponentially weighted blend of the stream
//!
//! # Example
//!
//! ```
//! use movingstats::averages::{CumulativeAverage, ExponentialAverage};
//! use movingstats::traits::Estimator;
//!
//! let mut ca = CumulativeAverage::<f32>::new();
//! let mut ema = ExponentialAverage::<f32>::new(0.2).unwrap();
//!
//! for reading in [20.5, 21.0, 20.0, 22.5] {
//!     ca.update(reading);
//!     ema.update(reading);
//! }
//!
//! println!("CA: {:?} EMA: {:?}", ca.value(), ema.value());
//! ```

mod cumulative;
mod exponential;
mod windowed;

pub use cumulative::CumulativeAverage;
pub use exponential::ExponentialAverage;
pub use windowed::{simple_mean, weighted_mean};
