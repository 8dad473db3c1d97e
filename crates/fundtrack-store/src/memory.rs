use std::collections::BTreeMap;
use std::sync::RwLock;

use fundtrack_types::{Snapshot, SnapshotDate};

use crate::error::StoreResult;
use crate::traits::SnapshotStore;

/// In-memory, `BTreeMap`-based snapshot store.
///
/// Intended for tests and embedding. Snapshots are held behind a `RwLock`
/// and cloned on read/write.
pub struct InMemorySnapshotStore {
    snapshots: RwLock<BTreeMap<SnapshotDate, Snapshot>>,
}

impl InMemorySnapshotStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            snapshots: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of snapshots currently stored.
    pub fn len(&self) -> usize {
        self.snapshots.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.snapshots.read().expect("lock poisoned").is_empty()
    }

    /// Remove all snapshots from the store.
    pub fn clear(&self) {
        self.snapshots.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn read(&self, date: SnapshotDate) -> StoreResult<Option<Snapshot>> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(map.get(&date).cloned())
    }

    fn write(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let mut map = self.snapshots.write().expect("lock poisoned");
        map.insert(snapshot.date, snapshot.clone());
        Ok(())
    }

    fn dates(&self) -> StoreResult<Vec<SnapshotDate>> {
        let map = self.snapshots.read().expect("lock poisoned");
        Ok(map.keys().copied().collect())
    }
}

impl std::fmt::Debug for InMemorySnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySnapshotStore")
            .field("snapshot_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundtrack_types::{HoldingRecord, Ticker};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> SnapshotDate {
        SnapshotDate::parse(s).unwrap()
    }

    fn sample(date_str: &str) -> Snapshot {
        Snapshot::new(
            date(date_str),
            vec![HoldingRecord::new(
                Ticker::new("2330").unwrap(),
                "TSMC",
                dec!(1000),
                dec!(10.0),
            )],
        )
    }

    #[test]
    fn write_and_read() {
        let store = InMemorySnapshotStore::new();
        let snap = sample("2025-08-06");
        store.write(&snap).unwrap();
        assert_eq!(store.read(date("2025-08-06")).unwrap().unwrap(), snap);
    }

    #[test]
    fn read_missing_returns_none() {
        let store = InMemorySnapshotStore::new();
        assert!(store.read(date("2025-08-06")).unwrap().is_none());
    }

    #[test]
    fn write_replaces_existing_date() {
        let store = InMemorySnapshotStore::new();
        store.write(&sample("2025-08-06")).unwrap();

        let mut replacement = sample("2025-08-06");
        replacement.holdings[0].shares = dec!(2000);
        store.write(&replacement).unwrap();

        assert_eq!(store.len(), 1);
        let read_back = store.read(date("2025-08-06")).unwrap().unwrap();
        assert_eq!(read_back.holdings[0].shares, dec!(2000));
    }

    #[test]
    fn dates_are_sorted() {
        let store = InMemorySnapshotStore::new();
        store.write(&sample("2025-08-06")).unwrap();
        store.write(&sample("2025-08-04")).unwrap();
        store.write(&sample("2025-08-05")).unwrap();

        assert_eq!(
            store.dates().unwrap(),
            vec![date("2025-08-04"), date("2025-08-05"), date("2025-08-06")]
        );
    }

    #[test]
    fn latest_and_previous_before() {
        let store = InMemorySnapshotStore::new();
        store.write(&sample("2025-08-05")).unwrap();
        store.write(&sample("2025-08-06")).unwrap();

        assert_eq!(store.latest().unwrap().unwrap().date, date("2025-08-06"));
        assert_eq!(
            store.previous_before(date("2025-08-06")).unwrap().unwrap().date,
            date("2025-08-05")
        );
    }

    #[test]
    fn clear_removes_all() {
        let store = InMemorySnapshotStore::new();
        store.write(&sample("2025-08-06")).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.latest().unwrap().is_none());
    }
}
