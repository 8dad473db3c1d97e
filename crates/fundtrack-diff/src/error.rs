//! Error types for the comparison engine.

use fundtrack_types::{SnapshotDate, Ticker};

/// Invalid-snapshot conditions that abort a comparison.
///
/// Both variants are fatal to the run and propagate to the caller
/// unmodified. No partial diff is ever returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DiffError {
    /// The current snapshot has no holdings. An empty disclosure signals a
    /// failed fetch upstream and must not be reported as "all removed".
    #[error("current snapshot {date} has no holdings")]
    EmptyCurrent { date: SnapshotDate },

    /// A snapshot contains the same ticker twice, so row identity is
    /// ambiguous and no classification is safe.
    #[error("snapshot {date} contains duplicate ticker {ticker}")]
    DuplicateTicker { date: SnapshotDate, ticker: Ticker },
}

/// Convenience alias for comparison results.
pub type DiffResult<T> = Result<T, DiffError>;
