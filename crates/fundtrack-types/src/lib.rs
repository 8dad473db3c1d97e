//! Foundation types for fundtrack.
//!
//! This crate provides the identity, temporal, and record types used
//! throughout the fundtrack system. Every other fundtrack crate depends on
//! `fundtrack-types`.
//!
//! # Key Types
//!
//! - [`Ticker`] — Validated identity key for one holding within a snapshot
//! - [`SnapshotDate`] — Calendar date labeling a snapshot (`YYYY-MM-DD`)
//! - [`HoldingRecord`] — One constituent: ticker, name, shares, weight
//! - [`Snapshot`] — A dated, order-preserving table of holdings records

pub mod date;
pub mod error;
pub mod holding;
pub mod snapshot;
pub mod ticker;

pub use date::SnapshotDate;
pub use error::TypeError;
pub use holding::HoldingRecord;
pub use snapshot::Snapshot;
pub use ticker::Ticker;
