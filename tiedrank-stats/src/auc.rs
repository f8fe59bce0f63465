//! Area under the ROC curve via the Mann-Whitney rank-sum statistic.
//!
//! With `P` positives, `N` negatives and `S` the sum of the tied ranks of the
//! positive samples, `AUC = (S - P(P+1)/2) / (N * P)`.
//!
//! Three entry points share one [`AucAccumulator`]:
//!
//! - [`auc`] ranks unsorted in-memory scores with [`rank`](crate::rank::rank).
//! - [`auc_stream`] consumes `(label, score)` pairs sorted by score, holding
//!   only the positive count of the open tie run.
//! - [`auc_sorted`] zips a label sequence with the lazy ranks of a separate
//!   sorted score sequence.
//!
//! Data holding only one class (including empty data) is rejected with
//! [`TiedRankError::DegenerateLabels`] by every entry point.

use tiedrank_core::{Result, Scored, Summarizable, TiedRankError};
use tracing::debug;

use crate::label::{Label, LabeledScore};
use crate::options::StreamOptions;
use crate::rank::{rank, TieRun};
use crate::stream::{Feed, RunTracker, SortGuard, TiedRankExt};

/// Running totals for the rank-sum AUC.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AucAccumulator {
    /// Number of positive samples observed.
    pub positives: usize,
    /// Number of negative samples observed.
    pub negatives: usize,
    /// Sum of the ranks of the positive samples.
    pub positive_rank_sum: f64,
}

impl Summarizable for AucAccumulator {
    fn summary(&self) -> String {
        match self.auc() {
            Ok(value) => format!(
                "pos={}, neg={}, rank_sum={:.4}, auc={:.6}",
                self.positives, self.negatives, self.positive_rank_sum, value,
            ),
            Err(_) => format!(
                "pos={}, neg={}, rank_sum={:.4}, auc=undefined",
                self.positives, self.negatives, self.positive_rank_sum,
            ),
        }
    }
}

impl AucAccumulator {
    /// An empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one sample with its tied rank.
    pub fn observe<L: Label + ?Sized>(&mut self, label: &L, rank: f64) {
        if label.is_positive_class() {
            self.positives += 1;
            self.positive_rank_sum += rank;
        } else {
            self.negatives += 1;
        }
    }

    /// Record a whole tie run of which `positives` members are positive.
    ///
    /// `positives` is clamped to `run.len`.
    pub fn observe_run(&mut self, run: &TieRun, positives: usize) {
        let positives = positives.min(run.len);
        self.positives += positives;
        self.negatives += run.len - positives;
        self.positive_rank_sum += run.rank() * positives as f64;
    }

    /// Total number of samples observed.
    pub fn len(&self) -> usize {
        self.positives + self.negatives
    }

    /// Whether no samples have been observed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The AUC of the observed samples.
    ///
    /// # Errors
    ///
    /// Returns [`TiedRankError::DegenerateLabels`] if there are no positive or
    /// no negative samples.
    pub fn auc(&self) -> Result<f64> {
        if self.positives == 0 || self.negatives == 0 {
            return Err(TiedRankError::DegenerateLabels {
                positives: self.positives,
                negatives: self.negatives,
            });
        }
        let p = self.positives as f64;
        let n = self.negatives as f64;
        Ok((self.positive_rank_sum - p * (p + 1.0) / 2.0) / (n * p))
    }
}

/// AUC of unsorted in-memory `scores` against `labels`.
///
/// # Errors
///
/// Returns an error if the slices differ in length or hold only one class.
///
/// # Example
///
/// ```
/// use tiedrank_stats::auc::auc;
///
/// let value = auc(&[0, 0, 1, 1, 0, 1], &[1.0, 2.0, 2.0, 3.0, 5.0, 6.0]).unwrap();
/// assert!((value - 13.0 / 18.0).abs() < 1e-12);
/// ```
pub fn auc<L: Label>(labels: &[L], scores: &[f64]) -> Result<f64> {
    if labels.len() != scores.len() {
        return Err(TiedRankError::InvalidInput(format!(
            "labels length {} != scores length {}",
            labels.len(),
            scores.len()
        )));
    }

    let ranks = rank(scores);
    let mut acc = AucAccumulator::new();
    for (label, &r) in labels.iter().zip(ranks.iter()) {
        acc.observe(label, r);
    }
    finish(&acc, "batch")
}

/// AUC of `(label, score)` pairs sorted ascending by score.
///
/// Single forward pass; memory does not grow with the input or with the
/// length of tie runs. The sort order is trusted, see [`auc_stream_with`]
/// to verify it.
///
/// # Example
///
/// ```
/// use tiedrank_stats::auc::auc_stream;
///
/// let pairs = [(0, 1.0), (0, 2.0), (1, 2.0), (1, 3.0), (0, 5.0), (1, 6.0)];
/// let value = auc_stream(pairs).unwrap();
/// assert!((value - 13.0 / 18.0).abs() < 1e-12);
/// ```
pub fn auc_stream<I>(pairs: I) -> Result<f64>
where
    I: IntoIterator,
    I::Item: LabeledScore,
{
    auc_stream_with(pairs, &StreamOptions::default())
}

/// [`auc_stream`] with explicit [`StreamOptions`].
///
/// # Errors
///
/// Returns [`TiedRankError::Unsorted`] at the first out-of-order score when
/// `options.verify_sorted` is set, and [`TiedRankError::DegenerateLabels`]
/// for single-class input.
pub fn auc_stream_with<I>(pairs: I, options: &StreamOptions) -> Result<f64>
where
    I: IntoIterator,
    I::Item: LabeledScore,
{
    let mut guard = options.verify_sorted.then(SortGuard::new);
    let mut tracker = RunTracker::new();
    let mut acc = AucAccumulator::new();
    // Positives in the run the tracker currently holds open.
    let mut run_positives = 0usize;

    for sample in pairs {
        let score = sample.score();
        if let Some(guard) = guard.as_mut() {
            guard.check(score)?;
        }
        if let Some(run) = tracker.push(Feed::Value(score)) {
            acc.observe_run(&run, run_positives);
            run_positives = 0;
        }
        if LabeledScore::is_positive_class(&sample) {
            run_positives += 1;
        }
    }
    if let Some(run) = tracker.push(Feed::End) {
        acc.observe_run(&run, run_positives);
    }

    finish(&acc, "stream")
}

/// AUC of `labels` zipped positionally with the lazy tied ranks of
/// `sorted_scores` (non-decreasing).
///
/// # Errors
///
/// Returns an error if the sequences differ in length or hold only one class.
pub fn auc_sorted<L, LI, SI>(labels: LI, sorted_scores: SI) -> Result<f64>
where
    L: Label,
    LI: IntoIterator<Item = L>,
    SI: IntoIterator<Item = f64>,
{
    let mut labels = labels.into_iter();
    let mut ranks = sorted_scores.into_iter().tied_ranks();
    let mut acc = AucAccumulator::new();

    loop {
        match (labels.next(), ranks.next()) {
            (Some(label), Some(r)) => acc.observe(&label, r),
            (None, None) => break,
            (Some(_), None) => {
                return Err(TiedRankError::InvalidInput(format!(
                    "more labels than scores: scores ended after {}",
                    acc.len()
                )));
            }
            (None, Some(_)) => {
                return Err(TiedRankError::InvalidInput(format!(
                    "more scores than labels: labels ended after {}",
                    acc.len()
                )));
            }
        }
    }

    finish(&acc, "sorted")
}

fn finish(acc: &AucAccumulator, mode: &'static str) -> Result<f64> {
    let value = acc.auc()?;
    debug!(
        mode,
        positives = acc.positives,
        negatives = acc.negatives,
        positive_rank_sum = acc.positive_rank_sum,
        auc = value,
        "computed AUC"
    );
    Ok(value)
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::LabeledSample;

    const ACTUAL: [i32; 6] = [0, 0, 1, 1, 0, 1];
    const POSTERIOR: [f64; 6] = [1.0, 2.0, 2.0, 3.0, 5.0, 6.0];

    // ranks [1, 2.5, 2.5, 4, 5, 6], P=3, N=3, S=2.5+4+6=12.5 → (12.5-6)/9
    const EXPECTED: f64 = 6.5 / 9.0;

    // Ten samples with {-1, 1} labels; positives rank 1, 6 and 10 → 11/21.
    const SIGNED_SCORES: [f64; 10] = [
        0.488540, 0.588689, 0.311658, 0.379008, 0.224716, 0.522872, 0.530129, 0.446732, 0.700344,
        0.304563,
    ];
    const SIGNED_LABELS: [i32; 10] = [1, -1, -1, -1, 1, -1, -1, -1, 1, -1];

    fn sorted_pairs<L: Copy>(labels: &[L], scores: &[f64]) -> Vec<(L, f64)> {
        let mut pairs: Vec<(L, f64)> = labels.iter().copied().zip(scores.iter().copied()).collect();
        pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
        pairs
    }

    #[test]
    fn batch_known_value() {
        let value = auc(&ACTUAL, &POSTERIOR).unwrap();
        assert!((value - EXPECTED).abs() < 1e-12);
    }

    #[test]
    fn stream_known_value() {
        let pairs: Vec<(i32, f64)> = ACTUAL.iter().copied().zip(POSTERIOR).collect();
        let value = auc_stream(&pairs).unwrap();
        assert!((value - EXPECTED).abs() < 1e-12);
    }

    #[test]
    fn sorted_known_value() {
        let value = auc_sorted(ACTUAL, POSTERIOR).unwrap();
        assert!((value - EXPECTED).abs() < 1e-12);
    }

    #[test]
    fn signed_labels_match_zero_one() {
        let zero_one: Vec<u8> = SIGNED_LABELS.iter().map(|&l| u8::from(l == 1)).collect();
        let signed = auc(&SIGNED_LABELS, &SIGNED_SCORES).unwrap();
        let unsigned = auc(&zero_one, &SIGNED_SCORES).unwrap();
        assert!((signed - 11.0 / 21.0).abs() < 1e-12);
        assert!((signed - unsigned).abs() < 1e-12);

        let streamed = auc_stream(sorted_pairs(&SIGNED_LABELS, &SIGNED_SCORES)).unwrap();
        assert!((streamed - signed).abs() < 1e-12);
    }

    #[test]
    fn labels_other_than_one_are_negative() {
        // A label of 2 is negative: same AUC as the 0/1 encoding.
        let scores = [0.1, 0.4, 0.35, 0.8];
        let twos = auc(&[2, 2, 1, 1], &scores).unwrap();
        let zeros = auc(&[0, 0, 1, 1], &scores).unwrap();
        assert!((twos - 0.75).abs() < 1e-12);
        assert_eq!(twos, zeros);

        let streamed = auc_stream([(2, 0.1), (1, 0.35), (2, 0.4), (1, 0.8)]).unwrap();
        assert!((streamed - 0.75).abs() < 1e-12);
        assert!(matches!(
            auc(&[2, 2], &[0.1, 0.2]),
            Err(TiedRankError::DegenerateLabels {
                positives: 0,
                negatives: 2
            })
        ));
    }

    #[test]
    fn perfect_and_inverted_separation() {
        let scores = [0.1, 0.2, 0.8, 0.9];
        assert_eq!(auc(&[false, false, true, true], &scores).unwrap(), 1.0);
        assert_eq!(auc(&[true, true, false, false], &scores).unwrap(), 0.0);
    }

    #[test]
    fn all_tied_scores_give_half() {
        let value = auc(&[1, 0, 1, 0, 0], &[0.4; 5]).unwrap();
        assert!((value - 0.5).abs() < 1e-12);
        let streamed = auc_stream([(1, 0.4), (0, 0.4), (1, 0.4), (0, 0.4), (0, 0.4)]).unwrap();
        assert!((streamed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_class_is_degenerate() {
        let err = auc(&[1, 1, 1], &[0.1, 0.2, 0.3]).unwrap_err();
        assert_eq!(
            err,
            TiedRankError::DegenerateLabels {
                positives: 3,
                negatives: 0
            }
        );
        let err = auc_stream([(0, 0.1), (0, 0.2)]).unwrap_err();
        assert_eq!(
            err,
            TiedRankError::DegenerateLabels {
                positives: 0,
                negatives: 2
            }
        );
        assert!(matches!(
            auc_sorted([-1, -1], [0.1, 0.2]),
            Err(TiedRankError::DegenerateLabels { .. })
        ));
    }

    #[test]
    fn empty_is_degenerate() {
        let none: [bool; 0] = [];
        assert!(matches!(
            auc(&none, &[]),
            Err(TiedRankError::DegenerateLabels {
                positives: 0,
                negatives: 0
            })
        ));
        assert!(matches!(
            auc_stream(Vec::<(bool, f64)>::new()),
            Err(TiedRankError::DegenerateLabels { .. })
        ));
    }

    #[test]
    fn length_mismatch_is_invalid() {
        assert!(matches!(
            auc(&[1, 0], &[0.5]),
            Err(TiedRankError::InvalidInput(_))
        ));
        assert!(matches!(
            auc_sorted([1, 0, 1], [0.1, 0.2]),
            Err(TiedRankError::InvalidInput(_))
        ));
        assert!(matches!(
            auc_sorted([1, 0], [0.1, 0.2, 0.3]),
            Err(TiedRankError::InvalidInput(_))
        ));
    }

    #[test]
    fn verified_stream_rejects_unsorted() {
        let pairs = [(1, 0.9), (0, 0.1), (1, 0.5)];
        let opts = StreamOptions::new().with_verify_sorted(true);
        assert_eq!(
            auc_stream_with(pairs, &opts),
            Err(TiedRankError::Unsorted {
                index: 1,
                previous: 0.9,
                current: 0.1
            })
        );
        // Without verification the result is computed from the given order.
        assert!(auc_stream(pairs).is_ok());
    }

    #[test]
    fn stream_accepts_labeled_samples() {
        let samples: Vec<LabeledSample<bool>> = sorted_pairs(&ACTUAL, &POSTERIOR)
            .into_iter()
            .map(|(l, s)| LabeledSample::new(l == 1, s))
            .collect();
        let value = auc_stream(samples.iter()).unwrap();
        assert!((value - EXPECTED).abs() < 1e-12);
    }

    #[test]
    fn accumulator_observes_runs_and_samples_alike() {
        let run = TieRun {
            value: 2.0,
            first_rank: 2,
            len: 2,
        };
        let mut by_run = AucAccumulator::new();
        by_run.observe_run(&run, 1);

        let mut by_sample = AucAccumulator::new();
        by_sample.observe(&1, 2.5);
        by_sample.observe(&0, 2.5);

        assert_eq!(by_run, by_sample);
        assert_eq!(by_run.len(), 2);
        assert!(!by_run.is_empty());
    }

    #[test]
    fn summary_reports_undefined() {
        let acc = AucAccumulator::new();
        assert!(acc.is_empty());
        assert_eq!(acc.summary(), "pos=0, neg=0, rank_sum=0.0000, auc=undefined");

        let mut acc = AucAccumulator::new();
        acc.observe(&true, 2.0);
        acc.observe(&false, 1.0);
        assert_eq!(acc.summary(), "pos=1, neg=1, rank_sum=2.0000, auc=1.000000");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn labeled(max_len: usize) -> impl Strategy<Value = Vec<(bool, f64)>> {
        proptest::collection::vec((any::<bool>(), (0..10i32).prop_map(f64::from)), 0..=max_len)
    }

    proptest! {
        #[test]
        fn stream_and_batch_agree(mut pairs in labeled(150)) {
            pairs.sort_by(|a, b| a.1.total_cmp(&b.1));
            let labels: Vec<bool> = pairs.iter().map(|p| p.0).collect();
            let scores: Vec<f64> = pairs.iter().map(|p| p.1).collect();

            let batch = auc(&labels, &scores);
            let streamed = auc_stream(&pairs);
            let sorted = auc_sorted(labels.iter().copied(), scores.iter().copied());
            match batch {
                Ok(b) => {
                    prop_assert!((b - streamed.unwrap()).abs() < 1e-9);
                    prop_assert!((b - sorted.unwrap()).abs() < 1e-9);
                    prop_assert!((0.0..=1.0).contains(&b));
                }
                Err(err) => {
                    prop_assert_eq!(streamed, Err(err.clone()));
                    prop_assert_eq!(sorted, Err(err));
                }
            }
        }

        #[test]
        fn batch_ignores_input_order(pairs in labeled(100)) {
            let labels: Vec<bool> = pairs.iter().map(|p| p.0).collect();
            let scores: Vec<f64> = pairs.iter().map(|p| p.1).collect();
            let mut reversed = pairs.clone();
            reversed.reverse();
            let rev_labels: Vec<bool> = reversed.iter().map(|p| p.0).collect();
            let rev_scores: Vec<f64> = reversed.iter().map(|p| p.1).collect();
            prop_assert_eq!(auc(&labels, &scores), auc(&rev_labels, &rev_scores));
        }
    }
}
