//! Implementation of [`Allocator`]
//!
//! Every source gets a [`QuotaRow`]. A source whose percentage asks for more items than it
//! holds is in deficit. The allocator repeatedly picks the most deficient row and moves its
//! uncovered slots to rows with surplus, proportionally to their targets, until the rows
//! account for the whole result size. Rows are then put back in source order and
//! `size - remaining` becomes the quota.

use alloc::vec::Vec;

use crate::{
    BlendError,
    trace::{NoTrace, Stage, Trace},
};

mod row;
mod share;
pub use row::QuotaRow;
use row::{committed, saturate};
use share::share;

/// Computes how many items each source contributes to a blend of `result_size` items.
///
/// # Examples
///
/// ```
/// use list_blend::Allocator;
///
/// // The first source can't fill its half, the second one makes up for it
/// let quotas = Allocator::new(10).allocate(&[2, 20], &[50, 50]).unwrap();
/// assert_eq!(quotas, vec![2, 8]);
/// ```
#[derive(Debug, Clone)]
pub struct Allocator<T = NoTrace> {
    result_size: usize,
    trace: T,
}

impl Allocator<NoTrace> {
    /// Creates an allocator for a blend of `result_size` items, without tracing
    #[inline]
    pub const fn new(result_size: usize) -> Self {
        Self {
            result_size,
            trace: NoTrace,
        }
    }
}

impl<T> Allocator<T> {
    /// Requested length of the blend
    #[inline]
    pub const fn result_size(&self) -> usize {
        self.result_size
    }

    /// Reports intermediate allocation state to `trace`
    #[inline]
    pub fn with_trace<U: Trace>(self, trace: U) -> Allocator<U> {
        Allocator {
            result_size: self.result_size,
            trace,
        }
    }

    /// Returns the trace sink
    #[inline]
    pub fn into_trace(self) -> T {
        self.trace
    }
}

impl<T: Trace> Allocator<T> {
    /// Computes one quota per source.
    ///
    /// `sizes[i]` is the number of items in source `i`, `percentages[i]` its desired share
    /// of the result. Percentages are not required to add up to 100.
    ///
    /// The quotas are in source order, each lies in `0..=sizes[i]`, and they add up to
    /// `min(result_size, sizes.sum())`.
    ///
    /// # Errors
    /// [`BlendError::PercentageCount`] if `sizes` and `percentages` differ in length.
    pub fn allocate(
        &mut self, sizes: &[usize], percentages: &[u32],
    ) -> Result<Vec<usize>, BlendError> {
        if sizes.len() != percentages.len() {
            return Err(BlendError::PercentageCount {
                sources: sizes.len(),
                percentages: percentages.len(),
            });
        }
        let result_size = self.result_size;
        // counts past i64::MAX saturate
        let limit = saturate(result_size);
        let mut rows = sizes
            .iter()
            .zip(percentages)
            .enumerate()
            .map(|(id, (&size, &percentage))| QuotaRow::new(id, size, percentage, limit))
            .collect::<Vec<_>>();
        self.trace.record(Stage::Initial, &rows);

        let supply = sizes.iter().map(|&size| size as u128).sum::<u128>();
        let quotas = if supply <= result_size as u128 {
            log::debug!("{supply} items fit into a result of {result_size}, taking all of them");
            // every item is used
            for row in &mut rows {
                row.remaining = 0;
            }
            sizes.to_vec()
        } else {
            let rounds = self.redistribute(&mut rows, limit);
            log::debug!("redistributed {} sources in {rounds} rounds", rows.len());
            self.release(&mut rows);
            rows.sort_by_key(QuotaRow::id);
            self.trim(&mut rows, limit);
            rows.iter()
                .map(|row| {
                    debug_assert!(
                        (0..=row.size).contains(&row.quota()),
                        "quota out of bounds: {row:?}"
                    );
                    row.quota() as usize
                })
                .collect::<Vec<_>>()
        };
        self.trace.record(Stage::Settled, &rows);
        log::trace!("quotas for a result of {result_size}: {quotas:?}");
        Ok(quotas)
    }

    /// Runs redistribution rounds until the committed slots cover the result size.
    /// Returns the number of rounds.
    fn redistribute(&mut self, rows: &mut [QuotaRow], result_size: i64) -> usize {
        let result_size = i128::from(result_size);
        let mut round = 0;
        loop {
            // stable: ties keep the order from the previous round
            rows.sort_by_key(QuotaRow::remaining);
            self.trace.record(Stage::Sorted { round }, rows);
            let committed = committed(rows);
            let gap = i64::try_from(result_size - committed).unwrap_or(i64::MAX);
            if committed >= result_size || !self.adjust(rows, gap, round) {
                return round;
            }
            round += 1;
        }
    }

    /// One redistribution round over rows sorted by `remaining`.
    ///
    /// `rows[0]` is the base. If it is in deficit its uncovered slots are taken from the
    /// other rows, otherwise the `gap` to the result size is. Returns false if nothing
    /// changed.
    fn adjust(&mut self, rows: &mut [QuotaRow], gap: i64, round: usize) -> bool {
        let Some(base) = rows.first() else {
            return false;
        };
        let leftover = if base.in_deficit() {
            -base.remaining
        } else {
            gap
        };
        let mut remainder: i128 = rows[1..]
            .iter()
            .filter(|row| row.remaining > 0)
            .map(|row| i128::from(row.target))
            .sum();
        let mut equal_split = false;
        let mut added = 0;

        for pos in 1..rows.len() {
            if added >= leftover {
                break;
            }
            let donor = rows[pos];
            if donor.remaining <= 0 {
                continue;
            }
            let weight = if equal_split {
                1
            } else if donor.target == 0 && remainder == 0 {
                // nobody left with a target: split evenly over the rows not yet visited
                equal_split = true;
                remainder = (rows.len() - pos) as i128;
                1
            } else {
                donor.target
            };
            let mut allotment = share(weight, remainder, leftover);
            if allotment > donor.remaining {
                allotment = donor.remaining;
                remainder -= i128::from(donor.target);
            }
            let allotment = allotment.min(leftover - added);
            if allotment > 0 {
                added += allotment;
                self.give(rows, pos, allotment, round);
            }
        }
        if added > 0 {
            return true;
        }

        // Every share rounded down to nothing. Hand the whole leftover to the first row
        // that can take it, the base included when it isn't the one short on items.
        let first = usize::from(rows[0].in_deficit());
        match (first..rows.len()).find(|&pos| rows[pos].remaining > 0) {
            Some(pos) => {
                let allotment = leftover.min(rows[pos].remaining);
                self.give(rows, pos, allotment, round);
                true
            }
            None if rows[0].in_deficit() => {
                // No one has items to spare, the base keeps what it has
                rows[0].remaining = 0;
                self.trace.record(Stage::Released { id: rows[0].id }, rows);
                true
            }
            None => false,
        }
    }

    /// Moves `amount` slots from `rows[donor]` to the base (if it's in deficit)
    fn give(&mut self, rows: &mut [QuotaRow], donor: usize, amount: i64, round: usize) {
        rows[donor].remaining -= amount;
        if rows[0].in_deficit() {
            rows[0].remaining += amount;
        }
        self.trace.record(
            Stage::Allotted {
                round,
                id: rows[donor].id,
                amount,
            },
            rows,
        );
    }

    /// Rows still in deficit once the result size is covered contribute all their items
    fn release(&mut self, rows: &mut [QuotaRow]) {
        for pos in 0..rows.len() {
            if rows[pos].in_deficit() {
                rows[pos].remaining = 0;
                self.trace.record(Stage::Released { id: rows[pos].id }, rows);
            }
        }
    }

    /// Takes back the slots above the result size. Excess comes from targets rounded up
    /// or percentages summing past 100.
    ///
    /// Rows are levelled by how far their quota is above their target: every row gets
    /// cut down to a common level (or to a quota of 0), and what is left over after that
    /// comes one slot each from the rows sitting at the level, later sources first.
    fn trim(&mut self, rows: &mut [QuotaRow], result_size: i64) {
        let total: i128 = rows.iter().map(|row| i128::from(row.quota())).sum();
        let excess = total - i128::from(result_size);
        if excess <= 0 {
            return;
        }
        log::debug!("trimming {excess} slots over the result size");

        let cut_all = |level: i128| rows.iter().map(|row| cut(row, level)).sum::<i128>();
        // cut_all(low) takes every slot, cut_all(high) takes none
        let mut low = rows.iter().map(|row| -i128::from(row.target)).min().unwrap_or(0);
        let mut high = rows.iter().map(above_target).max().unwrap_or(0);
        // lowest level that doesn't take more than the excess
        if cut_all(low) > excess {
            while high - low > 1 {
                let mid = low + (high - low) / 2;
                if cut_all(mid) > excess {
                    low = mid;
                } else {
                    high = mid;
                }
            }
        } else {
            high = low;
        }
        let level = high;
        let mut extra = excess - cut_all(level);

        let mut cuts = rows.iter().map(|row| cut(row, level)).collect::<Vec<_>>();
        for (row, amount) in rows.iter().zip(&mut cuts).rev() {
            if extra == 0 {
                break;
            }
            if above_target(row) - *amount == level && row.quota() > *amount as i64 {
                *amount += 1;
                extra -= 1;
            }
        }
        for (pos, amount) in cuts.into_iter().enumerate() {
            if amount > 0 {
                // amount never exceeds the row's quota
                let amount = amount as i64;
                rows[pos].remaining += amount;
                self.trace.record(
                    Stage::Trimmed {
                        id: rows[pos].id,
                        amount,
                    },
                    rows,
                );
            }
        }
    }
}

/// `quota - target`
fn above_target(row: &QuotaRow) -> i128 {
    i128::from(row.quota()) - i128::from(row.target)
}

/// Slots taken from `row` to bring it down to `level`, at most its whole quota
fn cut(row: &QuotaRow, level: i128) -> i128 {
    (above_target(row) - level).clamp(0, i128::from(row.quota()))
}
