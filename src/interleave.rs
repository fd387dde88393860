//! Implementation of [`RoundRobin`]

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::BlendError;

/// A source iterator together with the number of items it still has to yield
#[derive(Debug, Clone)]
struct Lane<I> {
    /// Index of the source in the original input
    source: usize,
    quota: usize,
    iter: I,
}

/// Iterator over blended sources.
///
/// Cycles through the sources in their original order, taking one item from each source
/// that still has quota, until every quota is used up. Items of one source keep their
/// relative order; when quotas differ, earlier sources come first within a pass.
///
/// # Examples
///
/// ```
/// use list_blend::RoundRobin;
///
/// let blended = RoundRobin::new([vec!['a', 'b', 'c'], vec!['x', 'y']], [3, 1])
///     .unwrap()
///     .into_vec();
/// assert_eq!(blended, vec!['a', 'x', 'b', 'c']);
/// ```
///
/// # Panics
///
/// Advancing panics if a source runs out of items before its quota is used up. Quotas
/// coming from the [`Allocator`](crate::Allocator) never exceed the source sizes.
#[derive(Debug, Clone)]
pub struct RoundRobin<I> {
    /// Lanes with quota left, in source order
    lanes: Vec<Lane<I>>,
    /// Index into `lanes` of the lane that yields next
    cursor: usize,
    /// Sum of quotas of all lanes
    left: usize,
    sources: usize,
}

impl<I: Iterator> RoundRobin<I> {
    /// Creates a round-robin over `sources`, taking `quotas[i]` items from `sources[i]`
    ///
    /// # Errors
    /// [`BlendError::QuotaCount`] if there are more or fewer quotas than sources.
    pub fn new<S, Q>(sources: S, quotas: Q) -> Result<Self, BlendError>
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
        Q: IntoIterator<Item = usize>,
    {
        let mut sources = sources.into_iter();
        let mut quotas = quotas.into_iter();
        let mut lanes = Vec::new();
        let mut count = 0;
        while let Some(iter) = sources.next() {
            let Some(quota) = quotas.next() else {
                return Err(BlendError::QuotaCount {
                    sources: count + 1 + sources.count(),
                    quotas: count,
                });
            };
            if quota > 0 {
                lanes.push(Lane {
                    source: count,
                    quota,
                    iter: iter.into_iter(),
                });
            }
            count += 1;
        }
        let extra = quotas.count();
        if extra > 0 {
            return Err(BlendError::QuotaCount {
                sources: count,
                quotas: count + extra,
            });
        }
        let left = lanes.iter().map(|lane| lane.quota).sum();
        Ok(Self {
            lanes,
            cursor: 0,
            left,
            sources: count,
        })
    }

    /// Outstanding quota of every source, indexed by source
    ///
    /// ```
    /// use list_blend::RoundRobin;
    ///
    /// let mut it = RoundRobin::new([0..5, 10..15, 20..25], [2, 0, 1]).unwrap();
    /// assert_eq!(it.remaining_quotas(), vec![2, 0, 1]);
    /// assert_eq!(it.next(), Some(0));
    /// assert_eq!(it.remaining_quotas(), vec![1, 0, 1]);
    /// ```
    pub fn remaining_quotas(&self) -> Vec<usize> {
        let mut quotas = alloc::vec![0; self.sources];
        for lane in &self.lanes {
            quotas[lane.source] = lane.quota;
        }
        quotas
    }

    /// Collects the rest of the blend into a [`Vec`]
    ///
    /// Faster than [`collect::<Vec<_>>`](Self::collect) since the final length is known
    /// upfront.
    pub fn into_vec(mut self) -> Vec<I::Item> {
        let mut result = Vec::with_capacity(self.left);
        result.extend(&mut self);
        result
    }
}

impl<I: Iterator> Iterator for RoundRobin<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.lanes.is_empty() {
            return None;
        }
        if self.cursor >= self.lanes.len() {
            // next pass
            self.cursor = 0;
        }
        let lane = &mut self.lanes[self.cursor];
        let Some(item) = lane.iter.next() else {
            panic!(
                "source {} ran out of items with a quota of {} left",
                lane.source, lane.quota
            );
        };
        lane.quota -= 1;
        self.left -= 1;
        if lane.quota == 0 {
            // Exhausted lanes are removed in place, so the lane after it slides under
            // the cursor
            self.lanes.remove(self.cursor);
        } else {
            self.cursor += 1;
        }
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.left, Some(self.left))
    }
}

impl<I: Iterator> ExactSizeIterator for RoundRobin<I> {}

// Once the last lane is removed there's nothing left to poll
impl<I: Iterator> FusedIterator for RoundRobin<I> {}
