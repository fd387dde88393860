use alloc::vec::Vec;

use crate::{Allocator, Blend, BlendError};

/// Blends `sources` into a [`Vec`] of `result_size` items:
/// * Each source contributes about `percentages[i]`% of the items
/// * Sources that run short are made up for by the others, proportionally to their share
/// * Sources are interleaved round-robin, each one keeping its internal order
///
/// # Panics
/// If the number of percentages differs from the number of sources.
pub fn blend<S, P>(sources: S, percentages: P, result_size: usize) -> Vec<<S::Item as IntoIterator>::Item>
where
    S: IntoIterator,
    S::Item: IntoIterator,
    <S::Item as IntoIterator>::IntoIter: ExactSizeIterator,
    P: IntoIterator<Item = u32>,
{
    match try_blend(sources, percentages, result_size) {
        Ok(blended) => blended,
        Err(err) => panic!("{err}"),
    }
}

/// Same as [`blend`], but reports mismatched input lengths as an error.
///
/// # Errors
/// [`BlendError::PercentageCount`] if the number of percentages differs from the number
/// of sources.
pub fn try_blend<S, P>(
    sources: S, percentages: P, result_size: usize,
) -> Result<Vec<<S::Item as IntoIterator>::Item>, BlendError>
where
    S: IntoIterator,
    S::Item: IntoIterator,
    <S::Item as IntoIterator>::IntoIter: ExactSizeIterator,
    P: IntoIterator<Item = u32>,
{
    Ok(Blend::new(sources)
        .percentages(percentages)
        .result_size(result_size)
        .build()?
        .into_vec())
}

/// Computes how many items each source contributes to a blend of `result_size` items,
/// given the source sizes and their percentages.
///
/// # Panics
/// If `sizes` and `percentages` differ in length.
pub fn allocate(sizes: &[usize], percentages: &[u32], result_size: usize) -> Vec<usize> {
    match try_allocate(sizes, percentages, result_size) {
        Ok(quotas) => quotas,
        Err(err) => panic!("{err}"),
    }
}

/// Same as [`allocate`], but reports mismatched input lengths as an error.
///
/// # Errors
/// [`BlendError::PercentageCount`] if `sizes` and `percentages` differ in length.
pub fn try_allocate(
    sizes: &[usize], percentages: &[u32], result_size: usize,
) -> Result<Vec<usize>, BlendError> {
    Allocator::new(result_size).allocate(sizes, percentages)
}
