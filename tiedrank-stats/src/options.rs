//! Runtime options for the streaming computations.

/// Options for [`auc_stream_with`](crate::auc::auc_stream_with).
///
/// The default trusts the caller's sort order and keeps the computation
/// free of any per-value checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StreamOptions {
    /// Fail with [`TiedRankError::Unsorted`](tiedrank_core::TiedRankError::Unsorted)
    /// at the first score that sorts below its predecessor.
    pub verify_sorted: bool,
}

impl StreamOptions {
    /// Default options: no sortedness verification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the running sortedness check.
    pub fn with_verify_sorted(mut self, verify: bool) -> Self {
        self.verify_sorted = verify;
        self
    }
}
