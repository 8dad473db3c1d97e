use fundtrack_types::{Snapshot, SnapshotDate};
use tracing::debug;

use crate::error::StoreResult;

/// Maximum number of trading days `previous_before` walks back before
/// concluding no previous snapshot exists.
pub const WALK_BACK_LIMIT: usize = 30;

/// A keyed collection of dated holdings snapshots.
///
/// All implementations must satisfy these invariants:
/// - Reading a date that was never written returns `Ok(None)`, not an error.
/// - Writing a date that already exists replaces the stored snapshot.
/// - `dates()` is sorted ascending and reflects completed writes.
/// - I/O failures and malformed data are propagated, never silently ignored.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot for a date.
    ///
    /// Returns `Ok(None)` if no snapshot is stored for that date.
    fn read(&self, date: SnapshotDate) -> StoreResult<Option<Snapshot>>;

    /// Write a snapshot, replacing any existing one for the same date.
    fn write(&self, snapshot: &Snapshot) -> StoreResult<()>;

    /// All stored dates, sorted ascending.
    fn dates(&self) -> StoreResult<Vec<SnapshotDate>>;

    /// The most recent stored snapshot, if any.
    fn latest(&self) -> StoreResult<Option<Snapshot>> {
        match self.dates()?.last() {
            Some(&date) => self.read(date),
            None => Ok(None),
        }
    }

    /// The closest stored snapshot strictly before `date`, walking back one
    /// trading day at a time.
    ///
    /// Weekends are skipped by the calendar; exchange holidays simply have
    /// no file and cost one attempt each. After [`WALK_BACK_LIMIT`]
    /// attempts the result is `Ok(None)` -- the bootstrap state.
    fn previous_before(&self, date: SnapshotDate) -> StoreResult<Option<Snapshot>> {
        let mut candidate = date.previous_trading_day();
        for _ in 0..WALK_BACK_LIMIT {
            let Some(cand) = candidate else {
                return Ok(None);
            };
            if let Some(snapshot) = self.read(cand)? {
                return Ok(Some(snapshot));
            }
            debug!(%cand, "no snapshot stored, walking back");
            candidate = cand.previous_trading_day();
        }
        debug!(%date, limit = WALK_BACK_LIMIT, "walk-back exhausted");
        Ok(None)
    }
}
