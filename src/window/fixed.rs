//! Statically sized window on `heapless::Deque`

use crate::traits::BoundedSequence;
use heapless::Deque;

impl<U, const N: usize> BoundedSequence<U> for Deque<U, N> {
    fn capacity(&self) -> usize {
        N
    }

    fn len(&self) -> usize {
        Deque::len(self)
    }

    fn front_remove(&mut self) -> Option<U> {
        self.pop_front()
    }

    fn push_back(&mut self, value: U) -> Result<(), U> {
        Deque::push_back(self, value)
    }

    fn get(&self, index: usize) -> Option<&U> {
        Deque::iter(self).nth(index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut U> {
        self.iter_mut().nth(index)
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = &'a U> + 'a
    where
        U: 'a,
    {
        Deque::iter(self)
    }

    fn clear(&mut self) {
        Deque::clear(self)
    }
}
