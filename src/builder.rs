use alloc::vec::Vec;

use crate::{
    Allocator, BlendError, QuotaRow, RoundRobin,
    trace::{ByFunc, NoTrace, Stage, Trace},
};

/// A builder for blending sources.
///
/// Collects the sources, the percentage of the result each of them should make up and
/// the length of the result. Building runs the [`Allocator`] over the source lengths and
/// wraps the sources into a [`RoundRobin`] using the computed quotas.
///
/// Sources must know their length upfront ([`ExactSizeIterator`]); `Vec`s, slices and
/// arrays all do.
///
/// Until set, there are no percentages and the result size is 0.
///
/// # Examples
///
/// ```
/// use list_blend::Blend;
///
/// let articles = vec!["a1", "a2", "a3", "a4", "a5"];
/// let videos = vec!["v1", "v2"];
/// let blended = Blend::new([articles, videos])
///     .percentages([50, 50])
///     .result_size(6)
///     .build()
///     .unwrap()
///     .into_vec();
/// // Only two videos exist, articles fill the rest
/// assert_eq!(blended, vec!["a1", "v1", "a2", "v2", "a3", "a4"]);
/// ```
#[derive(Debug, Clone)]
pub struct Blend<I, T = NoTrace> {
    sources: Vec<I>,
    percentages: Vec<u32>,
    result_size: usize,
    trace: T,
}

impl<I> Blend<I, NoTrace>
where
    I: ExactSizeIterator,
{
    /// Creates a new [`Blend`] over `sources`
    pub fn new<S>(sources: S) -> Self
    where
        S: IntoIterator,
        S::Item: IntoIterator<IntoIter = I>,
    {
        Self {
            sources: sources.into_iter().map(IntoIterator::into_iter).collect(),
            percentages: Vec::new(),
            result_size: 0,
            trace: NoTrace,
        }
    }
}

impl<I, T> Blend<I, T>
where
    I: ExactSizeIterator,
    T: Trace,
{
    /// Sets the desired share of the result for each source, in percent.
    ///
    /// One value per source, in source order. The values are not required to add up
    /// to 100.
    pub fn percentages<P>(mut self, percentages: P) -> Self
    where
        P: IntoIterator<Item = u32>,
    {
        self.percentages = percentages.into_iter().collect();
        self
    }

    /// Sets the length of the result.
    ///
    /// The result is shorter if the sources hold fewer items in total.
    #[inline]
    pub fn result_size(mut self, result_size: usize) -> Self {
        self.result_size = result_size;
        self
    }

    /// Reports allocation state to `trace`, see [`trace`](crate::trace)
    #[inline]
    pub fn trace<U: Trace>(self, trace: U) -> Blend<I, U> {
        let Self {
            sources,
            percentages,
            result_size,
            ..
        } = self;
        Blend {
            sources,
            percentages,
            result_size,
            trace,
        }
    }

    /// Reports allocation state to `func`
    ///
    /// # Examples
    ///
    /// ```
    /// use list_blend::{Blend, trace::Table};
    ///
    /// let mut log = String::new();
    /// let quotas = Blend::new([0..2, 0..20])
    ///     .percentages([50, 50])
    ///     .result_size(10)
    ///     .trace_with(|stage, rows| log += &format!("{stage}:\n{}", Table(rows)))
    ///     .quotas()
    ///     .unwrap();
    /// assert_eq!(quotas, vec![2, 8]);
    /// assert!(log.starts_with("initial:\nID:\t0\t1\t\n"));
    /// ```
    #[inline]
    pub fn trace_with<F>(self, func: F) -> Blend<I, ByFunc<F>>
    where
        F: FnMut(Stage, &[QuotaRow]),
    {
        self.trace(ByFunc(func))
    }

    /// Computes how many items each source contributes, without consuming anything
    ///
    /// # Errors
    /// [`BlendError::PercentageCount`] if the number of percentages doesn't match the
    /// number of sources.
    pub fn quotas(&mut self) -> Result<Vec<usize>, BlendError> {
        let sizes = self
            .sources
            .iter()
            .map(ExactSizeIterator::len)
            .collect::<Vec<_>>();
        Allocator::new(self.result_size)
            .with_trace(&mut self.trace)
            .allocate(&sizes, &self.percentages)
    }

    /// Builds the [`RoundRobin`] yielding the blended result
    ///
    /// # Errors
    /// [`BlendError::PercentageCount`] if the number of percentages doesn't match the
    /// number of sources.
    pub fn build(mut self) -> Result<RoundRobin<I>, BlendError> {
        let quotas = self.quotas()?;
        RoundRobin::new(self.sources, quotas)
    }
}
