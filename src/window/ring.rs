//! Heap-backed ring window

use crate::traits::BoundedSequence;

#[cfg(feature = "std")]
use std::collections::VecDeque;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::collections::VecDeque;

/// Fixed-capacity FIFO window over a `VecDeque`
///
/// The backing buffer is allocated once at construction and never grows:
/// appending to a full window evicts the oldest element.
///
/// # Example
///
/// ```
/// use movingstats::traits::BoundedSequence;
/// use movingstats::window::RingWindow;
///
/// let mut window = RingWindow::new(3);
/// for v in [1, 2, 3] {
///     assert_eq!(window.append(v), None);
/// }
/// assert_eq!(window.append(4), Some(1));
/// assert_eq!(window.iter().copied().collect::<Vec<_>>(), vec![2, 3, 4]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RingWindow<U> {
    buffer: VecDeque<U>,
    capacity: usize,
}

impl<U> RingWindow<U> {
    /// Create an empty window holding at most `capacity` elements
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Oldest element
    pub fn front(&self) -> Option<&U> {
        self.buffer.front()
    }

    /// Newest element
    pub fn back(&self) -> Option<&U> {
        self.buffer.back()
    }

    /// Contents as two slices, oldest first
    pub fn as_slices(&self) -> (&[U], &[U]) {
        self.buffer.as_slices()
    }
}

impl<U> BoundedSequence<U> for RingWindow<U> {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.buffer.len()
    }

    fn front_remove(&mut self) -> Option<U> {
        self.buffer.pop_front()
    }

    fn push_back(&mut self, value: U) -> Result<(), U> {
        if self.buffer.len() >= self.capacity {
            return Err(value);
        }
        self.buffer.push_back(value);
        Ok(())
    }

    fn get(&self, index: usize) -> Option<&U> {
        self.buffer.get(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut U> {
        self.buffer.get_mut(index)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a U> + 'a
    where
        U: 'a,
    {
        self.buffer.iter()
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }
}
