//! Tied ranking of in-memory data.
//!
//! [`rank`] assigns every value the average of the 1-based positions its tie
//! run occupies in sorted order. [`tie_runs`] exposes the runs themselves.
//!
//! Values are sorted with [`f64::total_cmp`] and grouped with `==`, so `-0.0`
//! and `0.0` share a rank and every NaN forms its own run after all numbers.

/// A maximal block of equal values in sorted order.
///
/// All members share one rank: the mean of the integer positions
/// `first_rank..=last_rank()`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TieRun {
    /// The value shared by every member of the run.
    pub value: f64,
    /// 1-based sorted position of the first member.
    pub first_rank: usize,
    /// Number of members (always at least 1).
    pub len: usize,
}

impl TieRun {
    /// 1-based sorted position of the last member.
    pub fn last_rank(&self) -> usize {
        self.first_rank + self.len - 1
    }

    /// The tied rank shared by every member.
    pub fn rank(&self) -> f64 {
        (self.first_rank + self.last_rank()) as f64 / 2.0
    }

    /// Whether more than one value shares this run.
    pub fn is_tied(&self) -> bool {
        self.len > 1
    }
}

/// Assign tied (average) ranks to `data`.
///
/// Returns a `Vec<f64>` of the same length as `data`, where each element is
/// the rank of the corresponding input value. Empty input produces empty
/// output.
///
/// # Example
///
/// ```
/// use tiedrank_stats::rank::rank;
///
/// let r = rank(&[1.0, 2.0, 2.0, 3.0, 3.0, 5.0]);
/// assert_eq!(r, vec![1.0, 2.5, 2.5, 4.5, 4.5, 6.0]);
/// ```
pub fn rank(data: &[f64]) -> Vec<f64> {
    let sorted = sort_indexed(data);
    let mut ranks = vec![0.0; data.len()];

    for_each_run(&sorted, |run, members| {
        let r = run.rank();
        for &(_, orig_idx) in members {
            ranks[orig_idx] = r;
        }
    });

    ranks
}

/// The tie runs of `data` in ascending order of value.
///
/// The run lengths always sum to `data.len()`.
pub fn tie_runs(data: &[f64]) -> Vec<TieRun> {
    let sorted = sort_indexed(data);
    let mut runs = Vec::new();
    for_each_run(&sorted, |run, _| runs.push(run));
    runs
}

/// Build (value, original_index) and sort by value. The sort is stable, so
/// tied values stay in input order.
fn sort_indexed(data: &[f64]) -> Vec<(f64, usize)> {
    let mut indexed: Vec<(f64, usize)> = data.iter().copied().enumerate().map(|(i, v)| (v, i)).collect();
    indexed.sort_by(|a, b| a.0.total_cmp(&b.0));
    indexed
}

/// Scan sorted pairs and hand each completed run, with its members, to `visit`.
fn for_each_run<F>(sorted: &[(f64, usize)], mut visit: F)
where
    F: FnMut(TieRun, &[(f64, usize)]),
{
    let Some(&(mut current, _)) = sorted.first() else {
        return;
    };

    // 0-based sorted index where the current run began.
    let mut last_rank = 0;
    for (i, &(value, _)) in sorted.iter().enumerate().skip(1) {
        if value != current {
            // Run spans [last_rank, i): rank (last_rank + 1 + i) / 2.
            let run = TieRun {
                value: current,
                first_rank: last_rank + 1,
                len: i - last_rank,
            };
            visit(run, &sorted[last_rank..i]);
            current = value;
            last_rank = i;
        }
    }

    // Final run spans [last_rank, n - 1]: rank (last_rank + (n - 1) + 2) / 2.
    let run = TieRun {
        value: current,
        first_rank: last_rank + 1,
        len: sorted.len() - last_rank,
    };
    visit(run, &sorted[last_rank..]);
}

// ── Tests ──────────────────────────────────────────────────────────────────
