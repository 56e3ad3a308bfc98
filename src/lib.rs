//! # Movingstats
//!
//! Moving averages and a moving median for sensor streams on small devices.
//!
//! Movingstats smooths a stream of scalar readings one sample at a time
//! without keeping the whole history: a bounded trailing window feeds the
//! windowed estimators, and the running estimators keep O(1) state.
//!
//! ## Features
//!
//! - **Simple / Weighted Moving Average**: over the last `N` samples
//! - **Cumulative Average**: over the whole stream, widened accumulator
//! - **Exponential Moving Average**: configurable smoothing factor
//! - **Moving Median**: skip list with O(log n) rank access
//! - **no_std**: needs only `alloc`; the window can live in a `heapless::Deque`
//!
//! ## Quick Start
//!
//! ```rust
//! use movingstats::prelude::*;
//!
//! let mut stats = MovingAverage::<i16, f32>::new(MovingAverageConfig::new(4)).unwrap();
//! stats.start();
//!
//! for reading in [100, 102, 98, 250, 101] {
//!     stats.add(reading);
//!     let sma = stats.simple_average().unwrap();
//!     let median = stats.moving_median().unwrap();
//!     println!("SMA: {sma} MM: {median}");
//! }
//! ```
//!
//! ## Building blocks
//!
//! The engine is composed from pieces that are usable on their own:
//!
//! ```rust
//! use movingstats::order::SkipList;
//! use movingstats::traits::OrderStatistics;
//!
//! let mut list = SkipList::new(4);
//! list.insert(3.5);
//! list.insert(1.0);
//! list.insert(2.25);
//! assert_eq!(list.get_median(), Ok(2.25));
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialize configuration and snapshots
//! - `heapless`: Use `heapless::Deque<U, N>` as window storage
//! - `full`: Enable all of the above

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core traits always available
pub mod traits;

pub mod averages;
pub mod moving;
pub mod order;
pub mod window;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::averages::{simple_mean, weighted_mean, CumulativeAverage, ExponentialAverage};
    pub use crate::moving::{EstimatorKind, MovingAverage, MovingAverageConfig, Snapshot};
    pub use crate::order::SkipList;
    pub use crate::window::RingWindow;
}

pub use moving::{MovingAverage, MovingAverageConfig};
pub use order::SkipList;
pub use traits::{ConfigError, StatsError};
