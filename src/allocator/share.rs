//! Proportional share of the leftover for a single donor row.
//!
//! The share is `weight / total * leftover`, computed over integers so the result doesn't
//! depend on float precision.

/// Rounds the donor's share of `leftover`.
///
/// With more than one slot to hand out the share is rounded to the nearest integer, halves
/// going up. With exactly one slot left it is `ceil(share + 0.5)`: any donor with a
/// non-negative share gets at least one unit, so the last slot can't vanish to rounding.
///
/// Callers clamp the result to the donor's surplus and to what is still outstanding.
pub(crate) fn share(weight: i64, total: i128, leftover: i64) -> i64 {
    if total <= 0 {
        return leftover;
    }
    // weight and leftover are below 2^63, so `2 * weight * leftover` fits
    let (weight, total, leftover) = (
        u128::from(weight.max(0).unsigned_abs()),
        total.unsigned_abs(),
        u128::from(leftover.max(0).unsigned_abs()),
    );
    let doubled_total = total.saturating_mul(2);
    let rounded = if leftover > 1 {
        // floor(weight * leftover / total + 1/2)
        (2 * weight * leftover).saturating_add(total) / doubled_total
    } else {
        // ceil(weight / total + 1/2)
        (2 * weight)
            .saturating_add(total)
            .saturating_add(doubled_total - 1)
            / doubled_total
    };
    i64::try_from(rounded).unwrap_or(i64::MAX)
}
