//! Shared primitives and traits for the tiedrank crates.
//!
//! `tiedrank-core` provides the foundation the ranking crates build on:
//!
//! - **Error types** — [`TiedRankError`] and [`Result`] for structured error handling
//! - **Traits** — [`Scored`] for anything carrying a score, [`Summarizable`] for one-line reports

pub mod error;
pub mod traits;

pub use error::{Result, TiedRankError};
pub use traits::*;
