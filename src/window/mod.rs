//! Bounded trailing windows
//!
//! Storage for the last `N` samples, implementing
//! [`BoundedSequence`](crate::traits::BoundedSequence):
//!
//! - [`RingWindow`]: heap-allocated once, capacity chosen at runtime
//! - `heapless::Deque<U, N>` (feature `heapless`): capacity fixed at compile
//!   time, no allocation
//!
//! Both are interchangeable as the window of a
//! [`MovingAverage`](crate::moving::MovingAverage).

mod ring;

#[cfg(feature = "heapless")]
mod fixed;

pub use ring::RingWindow;
