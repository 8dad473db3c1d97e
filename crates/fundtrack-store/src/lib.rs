//! Snapshot persistence for fundtrack.
//!
//! A snapshot store is a keyed collection of dated holdings tables. The
//! canonical backend is a flat data directory of `YYYY-MM-DD.csv` files,
//! one per disclosure day, with header `ticker,name,shares,weight`.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FsSnapshotStore`] -- CSV files in a data directory
//! - [`InMemorySnapshotStore`] -- `BTreeMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Snapshots are immutable once read; re-writing a date replaces the
//!    whole file (a re-fetched disclosure supersedes the earlier one).
//! 2. A missing date reads as `Ok(None)`; only I/O failures and malformed
//!    data are errors.
//! 3. The previous-trading-day walk-back is bounded: after
//!    [`WALK_BACK_LIMIT`] attempts the result is the bootstrap state, not
//!    an error.

pub mod error;
pub mod fs;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::FsSnapshotStore;
pub use memory::InMemorySnapshotStore;
pub use traits::{SnapshotStore, WALK_BACK_LIMIT};
