//! Out-of-core tied ranking over pre-sorted data.
//!
//! [`RunTracker`] is a push-driven state machine that detects tie runs in a
//! non-decreasing stream while holding only the current run. [`TiedRanks`]
//! wraps it as a lazy iterator: each rank is yielded once the run it belongs
//! to is known to be closed, i.e. after the next differing value or the end
//! of input has been seen.
//!
//! Sortedness is a caller precondition and is not checked by [`TiedRanks`].
//! [`CheckedTiedRanks`] adds an O(1) running comparison that reports the first
//! out-of-order pair.

use std::iter::FusedIterator;

use tiedrank_core::{Result, TiedRankError};
use tracing::{trace, warn};

use crate::rank::TieRun;

/// An event fed to a [`RunTracker`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feed {
    /// The next score of the sorted stream.
    Value(f64),
    /// End of input; flushes the pending run.
    End,
}

impl From<Option<f64>> for Feed {
    fn from(next: Option<f64>) -> Self {
        next.map_or(Feed::End, Feed::Value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum RunState {
    /// No value seen yet.
    Start,
    /// One pending value, not yet known to be tied.
    Single(f64),
    /// Two or more pending equal values.
    Tied { value: f64, count: usize },
    /// End of input has been flushed.
    Done,
}

/// Tie-run detector for a non-decreasing stream.
///
/// Feed it every score followed by [`Feed::End`]; each call returns the run
/// that the event closed, if any. Values pushed after `End` are ignored.
///
/// ```
/// use tiedrank_stats::stream::{Feed, RunTracker};
///
/// let mut tracker = RunTracker::new();
/// assert_eq!(tracker.push(Feed::Value(1.0)), None);
/// assert_eq!(tracker.push(Feed::Value(1.0)), None);
/// let run = tracker.push(Feed::Value(4.0)).unwrap();
/// assert_eq!((run.first_rank, run.len, run.rank()), (1, 2, 1.5));
/// let last = tracker.push(Feed::End).unwrap();
/// assert_eq!(last.rank(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct RunTracker {
    state: RunState,
    next_rank: usize,
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl RunTracker {
    /// A tracker that has seen no input.
    pub fn new() -> Self {
        Self {
            state: RunState::Start,
            next_rank: 1,
        }
    }

    /// Advance the state machine by one event.
    pub fn push(&mut self, feed: Feed) -> Option<TieRun> {
        let state = std::mem::replace(&mut self.state, RunState::Done);
        let (next, closed) = match (state, feed) {
            (RunState::Start, Feed::Value(v)) => (RunState::Single(v), None),
            (RunState::Single(last), Feed::Value(v)) if v == last => {
                (RunState::Tied { value: last, count: 2 }, None)
            }
            (RunState::Single(last), Feed::Value(v)) => {
                (RunState::Single(v), Some(self.close(last, 1)))
            }
            (RunState::Tied { value, count }, Feed::Value(v)) if v == value => {
                (RunState::Tied { value, count: count + 1 }, None)
            }
            (RunState::Tied { value, count }, Feed::Value(v)) => {
                (RunState::Single(v), Some(self.close(value, count)))
            }
            (RunState::Single(last), Feed::End) => (RunState::Done, Some(self.close(last, 1))),
            (RunState::Tied { value, count }, Feed::End) => {
                (RunState::Done, Some(self.close(value, count)))
            }
            (RunState::Start | RunState::Done, Feed::End) => (RunState::Done, None),
            (RunState::Done, Feed::Value(v)) => {
                trace!(value = v, "ignoring value pushed after end of input");
                (RunState::Done, None)
            }
        };
        self.state = next;
        closed
    }

    /// Whether [`Feed::End`] has been processed.
    pub fn is_finished(&self) -> bool {
        self.state == RunState::Done
    }

    /// Number of values held in the open run.
    pub fn pending_len(&self) -> usize {
        match self.state {
            RunState::Start | RunState::Done => 0,
            RunState::Single(_) => 1,
            RunState::Tied { count, .. } => count,
        }
    }

    /// 1-based position the open run starts at.
    pub fn next_rank(&self) -> usize {
        self.next_rank
    }

    fn close(&mut self, value: f64, len: usize) -> TieRun {
        let run = TieRun {
            value,
            first_rank: self.next_rank,
            len,
        };
        self.next_rank += len;
        trace!(value, first_rank = run.first_rank, len, "tie run closed");
        run
    }
}

/// Copies of a closed run's rank still owed to the consumer.
#[derive(Debug, Clone, Copy, Default)]
struct Pending {
    rank: f64,
    remaining: usize,
}

impl Pending {
    fn load(&mut self, run: TieRun) {
        self.rank = run.rank();
        self.remaining = run.len;
    }

    fn take(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.rank)
    }
}

/// Lazy tied ranks of a non-decreasing score stream.
///
/// Created by [`rank_stream`] or [`TiedRankExt::tied_ranks`]. Yields one rank
/// per input value, in input order.
#[derive(Debug, Clone)]
pub struct TiedRanks<I> {
    source: I,
    tracker: RunTracker,
    pending: Pending,
}

impl<I: Iterator<Item = f64>> TiedRanks<I> {
    fn new(source: I) -> Self {
        Self {
            source,
            tracker: RunTracker::new(),
            pending: Pending::default(),
        }
    }
}

impl<I: Iterator<Item = f64>> Iterator for TiedRanks<I> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        loop {
            if let Some(rank) = self.pending.take() {
                return Some(rank);
            }
            if self.tracker.is_finished() {
                return None;
            }
            let feed = Feed::from(self.source.next());
            if let Some(run) = self.tracker.push(feed) {
                self.pending.load(run);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let held = self.pending.remaining + self.tracker.pending_len();
        if self.tracker.is_finished() {
            return (held, Some(held));
        }
        let (lo, hi) = self.source.size_hint();
        (lo.saturating_add(held), hi.and_then(|h| h.checked_add(held)))
    }
}

impl<I: Iterator<Item = f64>> FusedIterator for TiedRanks<I> {}

/// O(1) running check that a stream is non-decreasing.
///
/// Order is [`f64::total_cmp`], except that equal values (`-0.0 == 0.0`) are
/// never a violation.
#[derive(Debug, Clone, Default)]
pub struct SortGuard {
    previous: Option<f64>,
    index: usize,
}

impl SortGuard {
    /// A guard that has seen no input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value`, failing if it sorts below its predecessor.
    pub fn check(&mut self, value: f64) -> Result<()> {
        let index = self.index;
        self.index += 1;
        if let Some(previous) = self.previous.replace(value) {
            if previous != value && previous.total_cmp(&value).is_gt() {
                warn!(index, previous, current = value, "sortedness violated");
                return Err(TiedRankError::Unsorted {
                    index,
                    previous,
                    current: value,
                });
            }
        }
        Ok(())
    }
}

/// Tied ranks of a stream that verifies its own sortedness.
///
/// Yields `Ok(rank)` for every value in a correctly sorted stream. On the
/// first out-of-order value it yields a single `Err(TiedRankError::Unsorted)`
/// and then ends; ranks of the run left open at that point are never emitted.
#[derive(Debug, Clone)]
pub struct CheckedTiedRanks<I> {
    source: I,
    tracker: RunTracker,
    pending: Pending,
    guard: SortGuard,
    failed: bool,
}

impl<I: Iterator<Item = f64>> CheckedTiedRanks<I> {
    fn new(source: I) -> Self {
        Self {
            source,
            tracker: RunTracker::new(),
            pending: Pending::default(),
            guard: SortGuard::new(),
            failed: false,
        }
    }
}

impl<I: Iterator<Item = f64>> Iterator for CheckedTiedRanks<I> {
    type Item = Result<f64>;

    fn next(&mut self) -> Option<Result<f64>> {
        loop {
            if let Some(rank) = self.pending.take() {
                return Some(Ok(rank));
            }
            if self.failed || self.tracker.is_finished() {
                return None;
            }
            let next = self.source.next();
            if let Some(value) = next {
                if let Err(err) = self.guard.check(value) {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
            if let Some(run) = self.tracker.push(Feed::from(next)) {
                self.pending.load(run);
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let owed = self.pending.remaining;
        if self.failed || self.tracker.is_finished() {
            return (owed, Some(owed));
        }
        // Past the owed ranks an error can end the stream at any point.
        let held = owed + self.tracker.pending_len();
        let (_, hi) = self.source.size_hint();
        (owed, hi.and_then(|h| h.checked_add(held)))
    }
}

impl<I: Iterator<Item = f64>> FusedIterator for CheckedTiedRanks<I> {}

/// Lazily rank an already sorted (non-decreasing) sequence.
///
/// # Example
///
/// ```
/// use tiedrank_stats::stream::rank_stream;
///
/// let ranks: Vec<f64> = rank_stream([1.0, 2.0, 2.0, 3.0, 3.0, 5.0]).collect();
/// assert_eq!(ranks, vec![1.0, 2.5, 2.5, 4.5, 4.5, 6.0]);
/// ```
pub fn rank_stream<I>(sorted_values: I) -> TiedRanks<I::IntoIter>
where
    I: IntoIterator<Item = f64>,
{
    TiedRanks::new(sorted_values.into_iter())
}

/// Like [`rank_stream`], but reports the first out-of-order value as an error.
pub fn rank_stream_checked<I>(sorted_values: I) -> CheckedTiedRanks<I::IntoIter>
where
    I: IntoIterator<Item = f64>,
{
    CheckedTiedRanks::new(sorted_values.into_iter())
}

/// Iterator adapters for tied ranking of sorted score streams.
pub trait TiedRankExt: Iterator<Item = f64> + Sized {
    /// See [`rank_stream`].
    fn tied_ranks(self) -> TiedRanks<Self> {
        TiedRanks::new(self)
    }

    /// See [`rank_stream_checked`].
    fn checked_tied_ranks(self) -> CheckedTiedRanks<Self> {
        CheckedTiedRanks::new(self)
    }
}

impl<I: Iterator<Item = f64>> TiedRankExt for I {}

// ── Tests ──────────────────────────────────────────────────────────────────
