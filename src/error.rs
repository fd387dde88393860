//! Errors reported by the fallible entry points of this crate.

/// Input shapes that don't line up.
///
/// Every source needs exactly one percentage (for allocation) and exactly one quota (for
/// interleaving). Anything else is a programming error on the caller's side, which is why
/// the panicking conveniences ([`blend`](crate::blend), [`allocate`](crate::allocate)) treat
/// it as a bug and the `try_` variants hand it back instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlendError {
    /// Number of percentages differs from the number of sources
    #[error("got {sources} sources but {percentages} percentages")]
    PercentageCount {
        /// Number of sources
        sources: usize,
        /// Number of percentages
        percentages: usize,
    },
    /// Number of quotas differs from the number of sources
    #[error("got {sources} sources but {quotas} quotas")]
    QuotaCount {
        /// Number of sources
        sources: usize,
        /// Number of quotas
        quotas: usize,
    },
}
