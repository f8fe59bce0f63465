//! Structured error types for the tiedrank crates.

use thiserror::Error;

/// Unified error type for ranking and AUC operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TiedRankError {
    /// Invalid input (mismatched lengths, bad arguments)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// AUC requested on data holding only one class
    #[error("AUC is undefined: {positives} positive and {negatives} negative samples")]
    DegenerateLabels {
        /// Number of positive samples seen.
        positives: usize,
        /// Number of negative samples seen.
        negatives: usize,
    },

    /// A score arrived below its predecessor in a stream that must be non-decreasing
    #[error("input not sorted: score {current} at index {index} follows {previous}")]
    Unsorted {
        /// 0-based position of the offending score.
        index: usize,
        /// The score immediately before it.
        previous: f64,
        /// The offending score.
        current: f64,
    },
}

/// Convenience alias used throughout the tiedrank crates.
pub type Result<T> = std::result::Result<T, TiedRankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_message_names_counts() {
        let err = TiedRankError::DegenerateLabels {
            positives: 0,
            negatives: 4,
        };
        assert_eq!(
            err.to_string(),
            "AUC is undefined: 0 positive and 4 negative samples"
        );
    }

    #[test]
    fn unsorted_message_names_position() {
        let err = TiedRankError::Unsorted {
            index: 3,
            previous: 2.5,
            current: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "input not sorted: score 1 at index 3 follows 2.5"
        );
    }
}
