//! Report generation for fundtrack.
//!
//! Turns a [`fundtrack_diff::HoldingsDiff`] into the two persisted daily
//! artifacts:
//!
//! - the change table, `holdings_change_table_{date}.csv` -- one row per
//!   moved ticker with before/after/delta columns;
//! - the summary, `summary_{date}.json` -- a machine-readable digest
//!   (counts, top movers, new holdings above a weight floor, positions
//!   reduced to dust, concentration statistics).
//!
//! Threshold knobs live in [`ReportConfig`], loadable from an optional
//! `fundtrack.toml` with `FUNDTRACK_*` environment overrides.

pub mod config;
pub mod error;
pub mod summary;
pub mod table;

pub use config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use summary::{write_summary, DiffSummary, SummaryEntry, TopHolding};
pub use table::{change_table_path, summary_path, write_change_table};
