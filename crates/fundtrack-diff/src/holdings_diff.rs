//! Snapshot-level diff: compare two dated holdings tables.
//!
//! Every ticker present in either snapshot gets exactly one [`DiffEntry`].
//! Ordering is deterministic: tickers of the current snapshot first, in
//! disclosure order, followed by removed tickers in the previous snapshot's
//! disclosure order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fundtrack_types::{HoldingRecord, Snapshot, SnapshotDate, Ticker};

use crate::error::{DiffError, DiffResult};

/// Classification of one ticker across two snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiffStatus {
    /// Present in the current snapshot only.
    Added,
    /// Present in the previous snapshot only.
    Removed,
    /// Present in both with a different share count or weight.
    Changed,
    /// Present in both with identical share count and weight.
    Unchanged,
}

impl fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DiffStatus::Added => "ADDED",
            DiffStatus::Removed => "REMOVED",
            DiffStatus::Changed => "CHANGED",
            DiffStatus::Unchanged => "UNCHANGED",
        };
        write!(f, "{s}")
    }
}

/// The classified comparison result for one ticker.
///
/// `*_before` fields are `None` when the ticker is absent from the previous
/// snapshot, `*_after` when absent from the current one. Deltas are
/// `after - before`, populated only for [`DiffStatus::Changed`] entries
/// (a changed entry carries both deltas, one of which may be zero).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub ticker: Ticker,
    /// Descriptive name, preferring the current snapshot's value.
    pub name: String,
    pub status: DiffStatus,
    pub shares_before: Option<Decimal>,
    pub shares_after: Option<Decimal>,
    pub shares_delta: Option<Decimal>,
    pub weight_before: Option<Decimal>,
    pub weight_after: Option<Decimal>,
    pub weight_delta: Option<Decimal>,
}

impl DiffEntry {
    fn added(after: &HoldingRecord) -> Self {
        Self {
            ticker: after.ticker.clone(),
            name: after.name.clone(),
            status: DiffStatus::Added,
            shares_before: None,
            shares_after: Some(after.shares),
            shares_delta: None,
            weight_before: None,
            weight_after: Some(after.weight),
            weight_delta: None,
        }
    }

    fn removed(before: &HoldingRecord) -> Self {
        Self {
            ticker: before.ticker.clone(),
            name: before.name.clone(),
            status: DiffStatus::Removed,
            shares_before: Some(before.shares),
            shares_after: None,
            shares_delta: None,
            weight_before: Some(before.weight),
            weight_after: None,
            weight_delta: None,
        }
    }

    fn compared(before: &HoldingRecord, after: &HoldingRecord) -> Self {
        let changed = before.shares != after.shares || before.weight != after.weight;
        let (status, shares_delta, weight_delta) = if changed {
            (
                DiffStatus::Changed,
                Some(after.shares - before.shares),
                Some(after.weight - before.weight),
            )
        } else {
            (DiffStatus::Unchanged, None, None)
        };
        Self {
            ticker: after.ticker.clone(),
            name: after.name.clone(),
            status,
            shares_before: Some(before.shares),
            shares_after: Some(after.shares),
            shares_delta,
            weight_before: Some(before.weight),
            weight_after: Some(after.weight),
            weight_delta,
        }
    }
}

/// The complete classification of a snapshot pair.
///
/// `entries` always covers every ticker in either snapshot, including the
/// unchanged ones: "nothing changed" is an auditable outcome, not an empty
/// file. Callers that only report movement use [`HoldingsDiff::changed_entries`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingsDiff {
    /// Date of the current snapshot.
    pub date: SnapshotDate,
    /// Date of the previous snapshot; `None` on a bootstrap run.
    pub base_date: Option<SnapshotDate>,
    /// One entry per ticker, in deterministic order.
    pub entries: Vec<DiffEntry>,
}

impl HoldingsDiff {
    /// Total number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of added tickers.
    pub fn additions(&self) -> usize {
        self.count(DiffStatus::Added)
    }

    /// Number of removed tickers.
    pub fn removals(&self) -> usize {
        self.count(DiffStatus::Removed)
    }

    /// Number of changed tickers.
    pub fn changes(&self) -> usize {
        self.count(DiffStatus::Changed)
    }

    /// Number of unchanged tickers.
    pub fn unchanged(&self) -> usize {
        self.count(DiffStatus::Unchanged)
    }

    /// Returns `true` if every entry is unchanged.
    pub fn is_unchanged(&self) -> bool {
        self.entries
            .iter()
            .all(|e| e.status == DiffStatus::Unchanged)
    }

    /// Entries with any movement (status other than unchanged), in order.
    pub fn changed_entries(&self) -> impl Iterator<Item = &DiffEntry> {
        self.entries
            .iter()
            .filter(|e| e.status != DiffStatus::Unchanged)
    }

    /// Look up the entry for a ticker.
    pub fn entry(&self, ticker: &Ticker) -> Option<&DiffEntry> {
        self.entries.iter().find(|e| &e.ticker == ticker)
    }

    fn count(&self, status: DiffStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }
}

/// Compare two holdings snapshots.
///
/// `previous` is `None` on the first-ever run (bootstrap): every current
/// ticker classifies as added and no error is raised. An empty `current`
/// or a duplicate ticker in either snapshot aborts with [`DiffError`]
/// before any classification happens.
pub fn compare_snapshots(
    previous: Option<&Snapshot>,
    current: &Snapshot,
) -> DiffResult<HoldingsDiff> {
    if current.is_empty() {
        return Err(DiffError::EmptyCurrent { date: current.date });
    }
    if let Some(dup) = current.first_duplicate_ticker() {
        return Err(DiffError::DuplicateTicker {
            date: current.date,
            ticker: dup.clone(),
        });
    }
    if let Some(prev) = previous {
        if let Some(dup) = prev.first_duplicate_ticker() {
            return Err(DiffError::DuplicateTicker {
                date: prev.date,
                ticker: dup.clone(),
            });
        }
    }

    let prev_by_ticker: HashMap<&Ticker, &HoldingRecord> = previous
        .map(|p| p.iter().map(|r| (&r.ticker, r)).collect())
        .unwrap_or_default();

    let mut entries = Vec::with_capacity(current.len() + prev_by_ticker.len());

    // Current snapshot first, in disclosure order.
    for record in current.iter() {
        match prev_by_ticker.get(&record.ticker) {
            Some(before) => entries.push(DiffEntry::compared(before, record)),
            None => entries.push(DiffEntry::added(record)),
        }
    }

    // Then removed tickers, in the previous snapshot's disclosure order.
    if let Some(prev) = previous {
        let current_tickers: HashSet<&Ticker> = current.tickers().collect();
        for record in prev.iter() {
            if !current_tickers.contains(&record.ticker) {
                entries.push(DiffEntry::removed(record));
            }
        }
    }

    Ok(HoldingsDiff {
        date: current.date,
        base_date: previous.map(|p| p.date),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticker(s: &str) -> Ticker {
        Ticker::new(s).unwrap()
    }

    fn date(s: &str) -> SnapshotDate {
        SnapshotDate::parse(s).unwrap()
    }

    fn record(t: &str, name: &str, shares: Decimal, weight: Decimal) -> HoldingRecord {
        HoldingRecord::new(ticker(t), name, shares, weight)
    }

    fn previous() -> Snapshot {
        Snapshot::new(
            date("2025-08-05"),
            vec![
                record("2330", "TSMC", dec!(1000), dec!(10.0)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
            ],
        )
    }

    fn current() -> Snapshot {
        Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1200), dec!(11.0)),
                record("2454", "MediaTek", dec!(300), dec!(3.0)),
            ],
        )
    }

    // -----------------------------------------------------------------------
    // Classification
    // -----------------------------------------------------------------------

    #[test]
    fn worked_example() {
        let prev = previous();
        let curr = current();
        let diff = compare_snapshots(Some(&prev), &curr).unwrap();

        assert_eq!(diff.len(), 3);
        assert_eq!(diff.date, date("2025-08-06"));
        assert_eq!(diff.base_date, Some(date("2025-08-05")));

        let tsmc = &diff.entries[0];
        assert_eq!(tsmc.ticker.as_str(), "2330");
        assert_eq!(tsmc.status, DiffStatus::Changed);
        assert_eq!(tsmc.shares_before, Some(dec!(1000)));
        assert_eq!(tsmc.shares_after, Some(dec!(1200)));
        assert_eq!(tsmc.shares_delta, Some(dec!(200)));
        assert_eq!(tsmc.weight_before, Some(dec!(10.0)));
        assert_eq!(tsmc.weight_after, Some(dec!(11.0)));
        assert_eq!(tsmc.weight_delta, Some(dec!(1.0)));

        let mediatek = &diff.entries[1];
        assert_eq!(mediatek.ticker.as_str(), "2454");
        assert_eq!(mediatek.status, DiffStatus::Added);
        assert_eq!(mediatek.shares_before, None);
        assert_eq!(mediatek.shares_after, Some(dec!(300)));
        assert_eq!(mediatek.shares_delta, None);
        assert_eq!(mediatek.weight_after, Some(dec!(3.0)));

        let foxconn = &diff.entries[2];
        assert_eq!(foxconn.ticker.as_str(), "2317");
        assert_eq!(foxconn.status, DiffStatus::Removed);
        assert_eq!(foxconn.shares_before, Some(dec!(500)));
        assert_eq!(foxconn.shares_after, None);
        assert_eq!(foxconn.weight_before, Some(dec!(5.0)));
        assert_eq!(foxconn.weight_delta, None);
    }

    #[test]
    fn identical_snapshots_are_all_unchanged() {
        let prev = previous();
        let mut curr = previous();
        curr.date = date("2025-08-06");

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        assert!(diff.is_unchanged());
        assert_eq!(diff.unchanged(), 2);
        assert_eq!(diff.additions() + diff.removals() + diff.changes(), 0);
        for e in &diff.entries {
            assert_eq!(e.shares_delta, None);
            assert_eq!(e.weight_delta, None);
        }
    }

    #[test]
    fn shares_only_change_still_carries_both_deltas() {
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1100), dec!(10.0)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        let tsmc = diff.entry(&ticker("2330")).unwrap();
        assert_eq!(tsmc.status, DiffStatus::Changed);
        assert_eq!(tsmc.shares_delta, Some(dec!(100)));
        assert_eq!(tsmc.weight_delta, Some(dec!(0.0)));
    }

    #[test]
    fn smallest_representable_weight_change_flips_status() {
        let prev = previous();
        let mut curr = previous();
        curr.date = date("2025-08-06");
        curr.holdings[0].weight += dec!(0.0001);

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        let tsmc = diff.entry(&ticker("2330")).unwrap();
        assert_eq!(tsmc.status, DiffStatus::Changed);
        assert_eq!(tsmc.weight_delta, Some(dec!(0.0001)));
        assert_eq!(tsmc.shares_delta, Some(dec!(0)));
    }

    #[test]
    fn negative_deltas_are_signed() {
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(800), dec!(8.5)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        let tsmc = diff.entry(&ticker("2330")).unwrap();
        assert_eq!(tsmc.shares_delta, Some(dec!(-200)));
        assert_eq!(tsmc.weight_delta, Some(dec!(-1.5)));
    }

    #[test]
    fn scale_differences_are_not_changes() {
        // 1000 shares at weight 10.0 versus 1000.0 shares at weight 10.00:
        // numerically equal, so the entry is unchanged.
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1000.0), dec!(10.00)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        assert!(diff.is_unchanged());
    }

    #[test]
    fn name_prefers_current_snapshot() {
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "Taiwan Semiconductor", dec!(1000), dec!(10.0)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        let tsmc = diff.entry(&ticker("2330")).unwrap();
        // A rename with equal shares and weight does not affect status.
        assert_eq!(tsmc.status, DiffStatus::Unchanged);
        assert_eq!(tsmc.name, "Taiwan Semiconductor");
    }

    // -----------------------------------------------------------------------
    // Bootstrap
    // -----------------------------------------------------------------------

    #[test]
    fn bootstrap_is_all_added() {
        let curr = current();
        let diff = compare_snapshots(None, &curr).unwrap();

        assert_eq!(diff.base_date, None);
        assert_eq!(diff.additions(), curr.len());
        for e in &diff.entries {
            assert_eq!(e.status, DiffStatus::Added);
            assert_eq!(e.shares_before, None);
            assert_eq!(e.weight_before, None);
            assert_eq!(e.shares_delta, None);
            assert_eq!(e.weight_delta, None);
        }
    }

    #[test]
    fn empty_previous_is_allowed() {
        // An empty previous snapshot behaves like bootstrap, except the
        // base date is known.
        let prev = Snapshot::new(date("2025-08-05"), vec![]);
        let curr = current();

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        assert_eq!(diff.base_date, Some(date("2025-08-05")));
        assert_eq!(diff.additions(), curr.len());
    }

    // -----------------------------------------------------------------------
    // Error conditions
    // -----------------------------------------------------------------------

    #[test]
    fn empty_current_is_an_error() {
        let prev = previous();
        let curr = Snapshot::new(date("2025-08-06"), vec![]);

        let err = compare_snapshots(Some(&prev), &curr).unwrap_err();
        assert_eq!(
            err,
            DiffError::EmptyCurrent {
                date: date("2025-08-06")
            }
        );
    }

    #[test]
    fn empty_current_is_an_error_even_on_bootstrap() {
        let curr = Snapshot::new(date("2025-08-06"), vec![]);
        assert!(matches!(
            compare_snapshots(None, &curr),
            Err(DiffError::EmptyCurrent { .. })
        ));
    }

    #[test]
    fn duplicate_ticker_in_current_is_an_error() {
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1000), dec!(10.0)),
                record("2330", "TSMC", dec!(200), dec!(2.0)),
            ],
        );

        let err = compare_snapshots(Some(&prev), &curr).unwrap_err();
        assert_eq!(
            err,
            DiffError::DuplicateTicker {
                date: date("2025-08-06"),
                ticker: ticker("2330"),
            }
        );
    }

    #[test]
    fn duplicate_ticker_in_previous_is_an_error() {
        let prev = Snapshot::new(
            date("2025-08-05"),
            vec![
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
                record("2317", "Foxconn", dec!(100), dec!(1.0)),
            ],
        );
        let curr = current();

        let err = compare_snapshots(Some(&prev), &curr).unwrap_err();
        assert_eq!(
            err,
            DiffError::DuplicateTicker {
                date: date("2025-08-05"),
                ticker: ticker("2317"),
            }
        );
    }

    // -----------------------------------------------------------------------
    // Ordering and determinism
    // -----------------------------------------------------------------------

    #[test]
    fn ordering_is_current_then_removed() {
        let prev = Snapshot::new(
            date("2025-08-05"),
            vec![
                record("1101", "Cement", dec!(10), dec!(1.0)),
                record("2330", "TSMC", dec!(1000), dec!(10.0)),
                record("9910", "Shoes", dec!(20), dec!(0.5)),
            ],
        );
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1000), dec!(10.0)),
                record("2454", "MediaTek", dec!(300), dec!(3.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        let order: Vec<&str> = diff.entries.iter().map(|e| e.ticker.as_str()).collect();
        // Current order first, then removed tickers in previous order.
        assert_eq!(order, ["2330", "2454", "1101", "9910"]);
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let prev = previous();
        let curr = current();

        let a = compare_snapshots(Some(&prev), &curr).unwrap();
        let b = compare_snapshots(Some(&prev), &curr).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    // -----------------------------------------------------------------------
    // Filtering view
    // -----------------------------------------------------------------------

    #[test]
    fn changed_entries_excludes_unchanged_only() {
        let prev = previous();
        let curr = Snapshot::new(
            date("2025-08-06"),
            vec![
                record("2330", "TSMC", dec!(1200), dec!(11.0)),
                record("2317", "Foxconn", dec!(500), dec!(5.0)),
                record("2454", "MediaTek", dec!(300), dec!(3.0)),
            ],
        );

        let diff = compare_snapshots(Some(&prev), &curr).unwrap();
        assert_eq!(diff.len(), 3);
        let moved: Vec<&str> = diff.changed_entries().map(|e| e.ticker.as_str()).collect();
        assert_eq!(moved, ["2330", "2454"]);
    }

    #[test]
    fn status_display_matches_report_vocabulary() {
        assert_eq!(DiffStatus::Added.to_string(), "ADDED");
        assert_eq!(DiffStatus::Removed.to_string(), "REMOVED");
        assert_eq!(DiffStatus::Changed.to_string(), "CHANGED");
        assert_eq!(DiffStatus::Unchanged.to_string(), "UNCHANGED");
    }

    #[test]
    fn status_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&DiffStatus::Added).unwrap(),
            "\"ADDED\""
        );
    }
}
