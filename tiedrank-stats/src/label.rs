//! Binary class labels.
//!
//! A sample is positive iff its label equals the positive marker `1`
//! (`true` for `bool`). Every other value is negative, so `{0, 1}` and
//! `{-1, 1}` encodings give identical results.

use tiedrank_core::Scored;

/// A binary ground-truth label.
pub trait Label {
    /// Whether this label marks the positive class.
    fn is_positive_class(&self) -> bool;
}

impl Label for bool {
    fn is_positive_class(&self) -> bool {
        *self
    }
}

macro_rules! impl_label_for_int {
    ($($t:ty),*) => {
        $(
            impl Label for $t {
                fn is_positive_class(&self) -> bool {
                    *self == 1
                }
            }
        )*
    };
}

impl_label_for_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Label for f32 {
    fn is_positive_class(&self) -> bool {
        *self == 1.0
    }
}

impl Label for f64 {
    fn is_positive_class(&self) -> bool {
        *self == 1.0
    }
}

impl<L: Label + ?Sized> Label for &L {
    fn is_positive_class(&self) -> bool {
        (**self).is_positive_class()
    }
}

/// One ground-truth example: a label and the classifier's score for it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledSample<L> {
    /// Ground-truth class.
    pub label: L,
    /// Classifier score; higher means more likely positive.
    pub score: f64,
}

impl<L> LabeledSample<L> {
    /// Pair a label with its score.
    pub fn new(label: L, score: f64) -> Self {
        Self { label, score }
    }
}

impl<L> From<(L, f64)> for LabeledSample<L> {
    fn from((label, score): (L, f64)) -> Self {
        Self { label, score }
    }
}

impl<L> Scored for LabeledSample<L> {
    fn score(&self) -> f64 {
        self.score
    }
}

/// Anything that carries both a class label and a score.
///
/// Implemented for `(label, score)` tuples, [`LabeledSample`], and
/// references to either.
pub trait LabeledScore: Scored {
    /// Whether the sample belongs to the positive class.
    fn is_positive_class(&self) -> bool;
}

impl<L: Label> LabeledScore for (L, f64) {
    fn is_positive_class(&self) -> bool {
        self.0.is_positive_class()
    }
}

impl<L: Label> LabeledScore for LabeledSample<L> {
    fn is_positive_class(&self) -> bool {
        self.label.is_positive_class()
    }
}

impl<T: LabeledScore + ?Sized> LabeledScore for &T {
    fn is_positive_class(&self) -> bool {
        (**self).is_positive_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_one_labels() {
        assert!(1i32.is_positive_class());
        assert!(!0i32.is_positive_class());
        assert!(1u8.is_positive_class());
        assert!(!0usize.is_positive_class());
    }

    #[test]
    fn signed_labels() {
        assert!(1i64.is_positive_class());
        assert!(!(-1i64).is_positive_class());
        assert!(!(-1.0f64).is_positive_class());
        assert!(1.0f32.is_positive_class());
    }

    #[test]
    fn only_the_marker_is_positive() {
        assert!(!2i32.is_positive_class());
        assert!(!0.5f64.is_positive_class());
        assert!(true.is_positive_class());
        assert!(!false.is_positive_class());
    }

    #[test]
    fn samples_and_tuples_agree() {
        let tuple = (1i32, 0.8);
        let sample = LabeledSample::from(tuple);
        assert_eq!(sample, LabeledSample::new(1, 0.8));
        assert_eq!(
            LabeledScore::is_positive_class(&tuple),
            LabeledScore::is_positive_class(&sample)
        );
        assert_eq!(tuple.score(), sample.score());
        assert!(LabeledScore::is_positive_class(&&sample));
    }
}
