/// Working record of the allocator, one per source.
///
/// `capacity` is fixed at construction: positive means the source has more items than its
/// target asks for (surplus), negative means it can't meet the target (deficit).
/// `remaining` starts equal to `capacity` and moves towards zero while the allocator
/// shifts slots from surplus rows to deficit rows.
///
/// Counts are kept as `i64`, sizes and targets above `i64::MAX` saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaRow {
    pub(crate) id: usize,
    pub(crate) size: i64,
    pub(crate) target: i64,
    pub(crate) capacity: i64,
    pub(crate) remaining: i64,
}

impl QuotaRow {
    pub(crate) fn new(id: usize, size: usize, percentage: u32, result_size: i64) -> Self {
        let size = saturate(size);
        let target = target(result_size, percentage);
        let capacity = size - target;
        Self {
            id,
            size,
            target,
            capacity,
            remaining: capacity,
        }
    }

    /// Index of the source this row describes
    #[inline]
    pub const fn id(&self) -> usize {
        self.id
    }

    /// Number of items the source holds, saturated at `i64::MAX`
    #[inline]
    pub const fn size(&self) -> usize {
        self.size as usize
    }

    /// Number of items the source's percentage asks for, may exceed [`size`](Self::size)
    #[inline]
    pub const fn target(&self) -> i64 {
        self.target
    }

    /// `size - target`, fixed for the lifetime of the row
    #[inline]
    pub const fn capacity(&self) -> i64 {
        self.capacity
    }

    /// Surplus not yet handed out (positive) or deficit not yet covered (negative)
    #[inline]
    pub const fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Slots this row currently claims: `size - remaining`.
    ///
    /// While a row is in deficit this includes the slots it still owes, so it can be
    /// larger than [`size`](Self::size). Once allocation settles it is the final quota.
    #[inline]
    pub const fn quota(&self) -> i64 {
        self.size - self.remaining
    }

    /// Slots counted towards the result size while the allocator is running:
    /// `size - |remaining|`
    #[inline]
    pub const fn committed(&self) -> i64 {
        self.size - self.remaining.abs()
    }

    /// Items this row can still give away
    #[inline]
    pub const fn surplus(&self) -> i64 {
        if self.remaining > 0 {
            self.remaining
        } else {
            0
        }
    }

    #[inline]
    pub(crate) const fn in_deficit(&self) -> bool {
        self.remaining < 0
    }
}

pub(crate) fn saturate(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

/// `round_half_up(result_size * percentage / 100)`, exact
fn target(result_size: i64, percentage: u32) -> i64 {
    let scaled = u128::from(result_size.unsigned_abs()) * u128::from(percentage);
    i64::try_from((scaled + 50) / 100).unwrap_or(i64::MAX)
}

/// Sum of [`QuotaRow::committed`] over all rows
pub(crate) fn committed(rows: &[QuotaRow]) -> i128 {
    rows.iter().map(|row| i128::from(row.committed())).sum()
}
