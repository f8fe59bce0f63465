//! Tied ranking and rank-sum ROC AUC.
//!
//! - **Batch ranking** — [`rank::rank`] over unsorted in-memory data
//! - **Out-of-core ranking** — [`stream::rank_stream`], a lazy single pass over
//!   pre-sorted data that holds only the current tie run
//! - **AUC** — [`auc::auc`], [`auc::auc_stream`] and [`auc::auc_sorted`] via
//!   the Mann-Whitney U statistic
//! - **Labels** — [`label::Label`]: positive iff the label equals `1`

pub mod auc;
pub mod label;
pub mod options;
pub mod rank;
pub mod stream;

pub use auc::{auc, auc_sorted, auc_stream, auc_stream_with, AucAccumulator};
pub use label::{Label, LabeledSample, LabeledScore};
pub use options::StreamOptions;
pub use rank::{rank, tie_runs, TieRun};
pub use stream::{rank_stream, rank_stream_checked, Feed, RunTracker, TiedRankExt, TiedRanks};
