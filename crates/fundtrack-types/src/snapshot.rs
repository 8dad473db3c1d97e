use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::date::SnapshotDate;
use crate::holding::HoldingRecord;
use crate::ticker::Ticker;

/// A dated, order-preserving table of holdings records.
///
/// Construction does not deduplicate: the disclosure's row order is part of
/// the snapshot (diff output ordering depends on it), and duplicate tickers
/// are a data-quality failure surfaced by the comparison engine rather than
/// silently resolved here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub date: SnapshotDate,
    pub holdings: Vec<HoldingRecord>,
}

impl Snapshot {
    /// Create a snapshot from records in disclosure order.
    pub fn new(date: SnapshotDate, holdings: Vec<HoldingRecord>) -> Self {
        Self { date, holdings }
    }

    /// Number of holdings.
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Returns `true` if the snapshot has no holdings.
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Iterate the records in disclosure order.
    pub fn iter(&self) -> impl Iterator<Item = &HoldingRecord> {
        self.holdings.iter()
    }

    /// Look up a record by ticker (first match in disclosure order).
    pub fn get(&self, ticker: &Ticker) -> Option<&HoldingRecord> {
        self.holdings.iter().find(|r| &r.ticker == ticker)
    }

    /// Iterate the tickers in disclosure order.
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.holdings.iter().map(|r| &r.ticker)
    }

    /// The first ticker that appears more than once, if any.
    pub fn first_duplicate_ticker(&self) -> Option<&Ticker> {
        let mut seen = HashSet::with_capacity(self.holdings.len());
        self.holdings
            .iter()
            .map(|r| &r.ticker)
            .find(|t| !seen.insert(*t))
    }

    /// Sum of all disclosed weights.
    pub fn total_weight(&self) -> Decimal {
        self.holdings.iter().map(|r| r.weight).sum()
    }

    /// The `n` heaviest holdings, by weight descending.
    ///
    /// Ties keep disclosure order (the sort is stable).
    pub fn top_holdings(&self, n: usize) -> Vec<&HoldingRecord> {
        let mut by_weight: Vec<&HoldingRecord> = self.holdings.iter().collect();
        by_weight.sort_by(|a, b| b.weight.cmp(&a.weight));
        by_weight.truncate(n);
        by_weight
    }
}
