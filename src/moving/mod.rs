//! Windowed statistics engine
//!
//! [`MovingAverage`] ties a bounded trailing window, the running averages and
//! a per-read skip list together behind one `add`/read interface meant to be
//! driven from a device's sampling loop.
//!
//! # Example
//!
//! ```
//! use movingstats::moving::{EstimatorKind, MovingAverage, MovingAverageConfig};
//!
//! let mut stats = MovingAverage::<u16, f32>::new(MovingAverageConfig::new(5)).unwrap();
//! stats.start();
//!
//! for adc in [512u16, 530, 498, 1023, 505] {
//!     stats.add(adc);
//!     for kind in EstimatorKind::ALL {
//!         let _ = stats.read(kind);
//!     }
//! }
//!
//! // the 1023 spike barely moves the median
//! assert_eq!(stats.moving_median(), Ok(512.0));
//!
//! for (kind, value) in stats.snapshot().calculated() {
//!     println!("{}: {}", kind.label(), value);
//! }
//! ```

mod config;
mod engine;
mod snapshot;

pub use config::MovingAverageConfig;
pub use engine::MovingAverage;
pub use snapshot::{EstimatorKind, Snapshot};
