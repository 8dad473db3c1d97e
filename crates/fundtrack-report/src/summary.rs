//! The daily summary digest.
//!
//! A machine-readable recap of one comparison run: status counts,
//! concentration statistics of the current snapshot, the biggest weight
//! movers in both directions, newly added holdings above a weight floor,
//! and previously held tickers reduced to dust.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use fundtrack_diff::{DiffEntry, DiffStatus, HoldingsDiff};
use fundtrack_types::{Snapshot, SnapshotDate, Ticker};

use crate::config::ReportConfig;
use crate::error::ReportResult;

/// The heaviest holding of the current snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopHolding {
    pub ticker: Ticker,
    pub name: String,
    pub weight: Decimal,
}

/// One line of a summary list (movers, new holdings, dust).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub ticker: Ticker,
    pub name: String,
    pub weight_before: Option<Decimal>,
    pub weight_after: Option<Decimal>,
    /// Weight movement with an absent side counted as zero, so added and
    /// removed tickers rank alongside changed ones.
    pub weight_delta: Decimal,
}

impl SummaryEntry {
    fn from_entry(entry: &DiffEntry) -> Self {
        Self {
            ticker: entry.ticker.clone(),
            name: entry.name.clone(),
            weight_before: entry.weight_before,
            weight_after: entry.weight_after,
            weight_delta: effective_weight_delta(entry),
        }
    }
}

/// Weight movement of an entry, counting an absent side as zero weight.
fn effective_weight_delta(entry: &DiffEntry) -> Decimal {
    entry.weight_after.unwrap_or_default() - entry.weight_before.unwrap_or_default()
}

/// The serializable digest of one comparison run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub date: SnapshotDate,
    pub base_date: Option<SnapshotDate>,
    pub total_count: usize,
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
    pub unchanged: usize,
    pub top_weight: Option<TopHolding>,
    pub top10_weight_sum: Decimal,
    pub movers_up: Vec<SummaryEntry>,
    pub movers_down: Vec<SummaryEntry>,
    pub new_holdings: Vec<SummaryEntry>,
    pub reduced_to_dust: Vec<SummaryEntry>,
}

impl DiffSummary {
    /// Build the summary from a diff, the current snapshot, and the
    /// configured thresholds.
    pub fn build(diff: &HoldingsDiff, current: &Snapshot, config: &ReportConfig) -> Self {
        let top_weight = current.top_holdings(1).first().map(|r| TopHolding {
            ticker: r.ticker.clone(),
            name: r.name.clone(),
            weight: r.weight,
        });
        let top10_weight_sum = current
            .top_holdings(10)
            .iter()
            .map(|r| r.weight)
            .sum();

        // Movement above the noise floor, ranked by signed delta.
        let mut movers: Vec<SummaryEntry> = diff
            .entries
            .iter()
            .map(SummaryEntry::from_entry)
            .filter(|e| e.weight_delta.abs() >= config.noise_threshold)
            .collect();
        movers.sort_by(|a, b| b.weight_delta.cmp(&a.weight_delta));

        let movers_up: Vec<SummaryEntry> = movers
            .iter()
            .filter(|e| e.weight_delta > Decimal::ZERO)
            .take(config.top_n)
            .cloned()
            .collect();
        let movers_down: Vec<SummaryEntry> = movers
            .iter()
            .rev()
            .filter(|e| e.weight_delta < Decimal::ZERO)
            .take(config.top_n)
            .cloned()
            .collect();

        let mut new_holdings: Vec<SummaryEntry> = diff
            .entries
            .iter()
            .filter(|e| {
                e.status == DiffStatus::Added
                    && e.weight_after.unwrap_or_default() >= config.new_holding_min_weight
            })
            .map(SummaryEntry::from_entry)
            .collect();
        new_holdings.sort_by(|a, b| {
            b.weight_after
                .unwrap_or_default()
                .cmp(&a.weight_after.unwrap_or_default())
        });

        // Held yesterday above the noise floor, at or below the dust line
        // today. Removed tickers count as zero weight today.
        let mut reduced_to_dust: Vec<SummaryEntry> = diff
            .entries
            .iter()
            .filter(|e| {
                e.weight_after.unwrap_or_default() <= config.sell_alert_max_weight
                    && e.weight_before.unwrap_or_default() > config.noise_threshold
            })
            .map(SummaryEntry::from_entry)
            .collect();
        reduced_to_dust.sort_by(|a, b| a.weight_delta.cmp(&b.weight_delta));

        Self {
            date: diff.date,
            base_date: diff.base_date,
            total_count: current.len(),
            added: diff.additions(),
            removed: diff.removals(),
            changed: diff.changes(),
            unchanged: diff.unchanged(),
            top_weight,
            top10_weight_sum,
            movers_up,
            movers_down,
            new_holdings,
            reduced_to_dust,
        }
    }
}

/// Write the summary as pretty-printed JSON.
pub fn write_summary(summary: &DiffSummary, path: &Path) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(summary)?;
    fs::write(path, json)?;
    debug!(date = %summary.date, path = %path.display(), "summary written");
    Ok(())
}
