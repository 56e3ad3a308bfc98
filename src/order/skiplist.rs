//! Indexable skip list
//!
//! A probabilistic sorted structure over distinct values with expected
//! O(log n) insertion, removal and rank access.
//!
//! # Layout
//!
//! Nodes live in an arena (`Vec<Node>`) and link to each other by index, so
//! there is no pointer juggling and no manual release: dropping the list drops
//! every node. Slot 0 is the header sentinel; its value is never compared.
//! Removed slots are recycled through a free list.
//!
//! Every link records its *span*, the number of level-0 steps it skips. A
//! rank query descends the levels summing spans, which makes [`SkipList::at`]
//! and the median O(log n) expected instead of a level-0 walk. A link with no
//! successor carries the distance from its node to the last element.

use crate::traits::{OrderStatistics, StatsError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;
#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

/// Hard ceiling on node height
///
/// 2^32 elements is far beyond any window a device can hold.
pub const MAX_LEVEL_LIMIT: usize = 32;

/// Seed used by [`SkipList::new`]
pub const DEFAULT_SEED: u64 = 0x5eed_cafe_f00d_d00d;

const HEAD: usize = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Link {
    next: Option<usize>,
    span: usize,
}

const NIL: Link = Link {
    next: None,
    span: 0,
};

/// One skip list node: a value plus one forward link per level it spans
#[derive(Clone, Debug)]
struct Node<U> {
    value: U,
    links: Vec<Link>,
}

/// Skip list over distinct, totally ordered values
///
/// Inserting a value that is already present is a no-op, so a window holding
/// `[5, 5, 7]` is seen as `{5, 7}`. Rank queries and the median are therefore
/// taken over the distinct values.
///
/// # Example
///
/// ```
/// use movingstats::order::SkipList;
/// use movingstats::traits::OrderStatistics;
///
/// let mut list = SkipList::new(4);
/// for v in [30, 10, 50, 20, 40] {
///     list.insert(v);
/// }
///
/// assert_eq!(list.get_median(), Ok(30));
/// assert_eq!(list.at(0), Ok(10));
/// assert!(list.remove(30));
/// // even count: upper median
/// assert_eq!(list.get_median(), Ok(40));
/// ```
#[derive(Clone, Debug)]
pub struct SkipList<U> {
    /// Arena, slot 0 is the header
    nodes: Vec<Node<U>>,
    /// Recycled arena slots
    free: Vec<usize>,
    /// Height cap for new nodes
    max_level: usize,
    /// Number of levels currently in use (at least 1)
    level: usize,
    /// Number of values held
    len: usize,
    rng: SmallRng,
}

impl<U> SkipList<U>
where
    U: PartialOrd + Copy + Default,
{
    /// Create an empty list whose nodes are at most `max_level` levels tall
    ///
    /// `max_level` is clamped to `1..=MAX_LEVEL_LIMIT`. A good value for `n`
    /// elements is [`levels_for(n)`](Self::levels_for).
    pub fn new(max_level: usize) -> Self {
        Self::with_seed(max_level, DEFAULT_SEED)
    }

    /// Create an empty list with a reproducible level sequence
    pub fn with_seed(max_level: usize, seed: u64) -> Self {
        let max_level = max_level.clamp(1, MAX_LEVEL_LIMIT);
        let header = Node {
            value: U::default(),
            links: vec![NIL; max_level],
        };
        Self {
            nodes: vec![header],
            free: Vec::new(),
            max_level,
            level: 1,
            len: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Levels needed to keep `capacity` elements at O(log n): `ceil(log2 capacity)`, at least 1
    pub fn levels_for(capacity: usize) -> usize {
        let bits = usize::BITS - capacity.saturating_sub(1).leading_zeros();
        (bits as usize).clamp(1, MAX_LEVEL_LIMIT)
    }

    /// Height cap for new nodes
    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Number of levels currently in use
    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of distinct values held
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every value, keeping the arena allocation
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.free.clear();
        for link in &mut self.nodes[HEAD].links {
            *link = NIL;
        }
        self.level = 1;
        self.len = 0;
    }

    /// Iterate values in ascending order
    pub fn iter(&self) -> Iter<'_, U> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].links[0].next,
            remaining: self.len,
        }
    }

    /// Check if `value` is present
    pub fn contains(&self, value: U) -> bool {
        self.rank_of(value).is_some()
    }

    /// 0-based rank of `value`, if present
    pub fn rank_of(&self, value: U) -> Option<usize> {
        let mut x = HEAD;
        let mut traversed = 0;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].value < value {
                    traversed += self.nodes[x].links[i].span;
                    x = next;
                } else {
                    break;
                }
            }
        }
        let candidate = self.nodes[x].links[0].next?;
        (self.nodes[candidate].value == value).then_some(traversed)
    }

    /// Insert `value`, keeping every level sorted
    ///
    /// Returns `false` without modifying the list when `value` is already
    /// present.
    pub fn insert(&mut self, value: U) -> bool {
        let mut update = [HEAD; MAX_LEVEL_LIMIT];
        // rank[i]: level-0 position of update[i], header at 0
        let mut rank = [0usize; MAX_LEVEL_LIMIT];

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            rank[i] = if i + 1 == self.level { 0 } else { rank[i + 1] };
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].value < value {
                    rank[i] += self.nodes[x].links[i].span;
                    x = next;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        if let Some(next) = self.nodes[x].links[0].next {
            if self.nodes[next].value == value {
                return false;
            }
        }

        let height = self.random_level();
        if height > self.level {
            for i in self.level..height {
                rank[i] = 0;
                update[i] = HEAD;
                self.nodes[HEAD].links[i] = Link {
                    next: None,
                    span: self.len,
                };
            }
            log::trace!("skip list height {} -> {}", self.level, height);
            self.level = height;
        }

        let id = self.alloc(value, height);
        for i in 0..height {
            let before = rank[0] - rank[i];
            let prev = self.nodes[update[i]].links[i];
            self.nodes[id].links[i] = Link {
                next: prev.next,
                span: prev.span - before,
            };
            self.nodes[update[i]].links[i] = Link {
                next: Some(id),
                span: before + 1,
            };
        }
        for i in height..self.level {
            self.nodes[update[i]].links[i].span += 1;
        }

        self.len += 1;
        true
    }

    /// Remove `value`; returns whether it was present
    ///
    /// Empty top levels are dropped afterwards.
    pub fn remove(&mut self, value: U) -> bool {
        let mut update = [HEAD; MAX_LEVEL_LIMIT];

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].links[i].next {
                if self.nodes[next].value < value {
                    x = next;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        let target = match self.nodes[x].links[0].next {
            Some(next) if self.nodes[next].value == value => next,
            _ => return false,
        };

        for i in 0..self.level {
            let prev = self.nodes[update[i]].links[i];
            if prev.next == Some(target) {
                let removed = self.nodes[target].links[i];
                self.nodes[update[i]].links[i] = Link {
                    next: removed.next,
                    span: prev.span + removed.span - 1,
                };
            } else {
                self.nodes[update[i]].links[i].span -= 1;
            }
        }

        while self.level > 1 && self.nodes[HEAD].links[self.level - 1].next.is_none() {
            self.level -= 1;
        }

        self.free.push(target);
        self.len -= 1;
        true
    }

    /// Value at 0-based rank `index`
    pub fn at(&self, index: usize) -> Result<U, StatsError> {
        if index >= self.len {
            return Err(StatsError::OutOfRange {
                index,
                len: self.len,
            });
        }

        // header sits at position 0, rank 0 at position 1
        let target = index + 1;
        let mut x = HEAD;
        let mut traversed = 0;
        for i in (0..self.level).rev() {
            while let Some(next) = self.nodes[x].links[i].next {
                let span = self.nodes[x].links[i].span;
                if traversed + span <= target {
                    traversed += span;
                    x = next;
                } else {
                    break;
                }
            }
            if traversed == target {
                return Ok(self.nodes[x].value);
            }
        }

        Err(StatsError::OutOfRange {
            index,
            len: self.len,
        })
    }

    /// Value at rank `len / 2` (upper median for an even count)
    pub fn get_median(&self) -> Result<U, StatsError> {
        self.at(self.len / 2)
    }

    /// Draw a node height: 1 plus the number of consecutive heads, capped at `max_level`
    fn random_level(&mut self) -> usize {
        let mut height = 1;
        while height < self.max_level && self.rng.random::<bool>() {
            height += 1;
        }
        height
    }

    fn alloc(&mut self, value: U, height: usize) -> usize {
        match self.free.pop() {
            Some(id) => {
                let node = &mut self.nodes[id];
                node.value = value;
                node.links.clear();
                node.links.resize(height, NIL);
                id
            }
            None => {
                self.nodes.push(Node {
                    value,
                    links: vec![NIL; height],
                });
                self.nodes.len() - 1
            }
        }
    }
}

impl<U> OrderStatistics for SkipList<U>
where
    U: PartialOrd + Copy + Default,
{
    type Value = U;

    fn insert(&mut self, value: U) -> bool {
        SkipList::insert(self, value)
    }

    fn remove(&mut self, value: U) -> bool {
        SkipList::remove(self, value)
    }

    fn at(&self, index: usize) -> Result<U, StatsError> {
        SkipList::at(self, index)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<U> Extend<U> for SkipList<U>
where
    U: PartialOrd + Copy + Default,
{
    fn extend<I: IntoIterator<Item = U>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

/// Ascending iterator over a [`SkipList`]
#[derive(Clone, Debug)]
pub struct Iter<'a, U> {
    list: &'a SkipList<U>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<U: Copy> Iterator for Iter<'_, U> {
    type Item = U;

    fn next(&mut self) -> Option<U> {
        let id = self.cursor?;
        let node = &self.list.nodes[id];
        self.cursor = node.links[0].next;
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<U: Copy> ExactSizeIterator for Iter<'_, U> {}

impl<'a, U> IntoIterator for &'a SkipList<U>
where
    U: PartialOrd + Copy + Default,
{
    type Item = U;
    type IntoIter = Iter<'a, U>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
