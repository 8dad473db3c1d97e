//! Holdings comparison engine for fundtrack.
//!
//! Computes the day-over-day difference between two holdings snapshots,
//! classifying every ticker present in either snapshot as added, removed,
//! changed, or unchanged, with exact per-field deltas.
//!
//! The engine is a pure function of its two inputs: no I/O, no shared
//! state, no tolerance thresholds. Disclosed values are already rounded by
//! the source, so field comparison is exact decimal equality.
//!
//! # Key Types
//!
//! - [`HoldingsDiff`] / [`DiffEntry`] / [`DiffStatus`] -- The classified comparison result
//! - [`compare_snapshots`] -- The comparison itself
//! - [`DiffError`] -- Invalid-snapshot conditions (empty current, duplicate ticker)

pub mod error;
pub mod holdings_diff;

pub use error::{DiffError, DiffResult};
pub use holdings_diff::{compare_snapshots, DiffEntry, DiffStatus, HoldingsDiff};
