//! The persisted change table.

use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use rust_decimal::Decimal;
use tracing::debug;

use fundtrack_diff::{DiffEntry, HoldingsDiff};
use fundtrack_types::SnapshotDate;

use crate::error::{ReportError, ReportResult};

const HEADER: [&str; 9] = [
    "ticker",
    "name",
    "status",
    "shares_before",
    "shares_after",
    "shares_delta",
    "weight_before",
    "weight_after",
    "weight_delta",
];

/// Path of the change table for a date inside an output directory.
pub fn change_table_path(out_dir: &Path, date: SnapshotDate) -> PathBuf {
    out_dir.join(format!("holdings_change_table_{date}.csv"))
}

/// Path of the summary JSON for a date inside an output directory.
pub fn summary_path(out_dir: &Path, date: SnapshotDate) -> PathBuf {
    out_dir.join(format!("summary_{date}.json"))
}

/// Write the change table CSV.
///
/// Only entries with movement are written unless `include_unchanged` is
/// set; either way row order is the diff's deterministic order. Absent
/// sides (an added ticker's before, a removed ticker's after) serialize as
/// empty fields.
pub fn write_change_table(
    diff: &HoldingsDiff,
    path: &Path,
    include_unchanged: bool,
) -> ReportResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    let rows: Vec<&DiffEntry> = if include_unchanged {
        diff.entries.iter().collect()
    } else {
        diff.changed_entries().collect()
    };

    writer
        .write_record(HEADER)
        .and_then(|()| {
            rows.iter().try_for_each(|entry| {
                let status = entry.status.to_string();
                let shares_before = render(entry.shares_before);
                let shares_after = render(entry.shares_after);
                let shares_delta = render(entry.shares_delta);
                let weight_before = render(entry.weight_before);
                let weight_after = render(entry.weight_after);
                let weight_delta = render(entry.weight_delta);
                writer.write_record([
                    entry.ticker.as_str(),
                    entry.name.as_str(),
                    status.as_str(),
                    shares_before.as_str(),
                    shares_after.as_str(),
                    shares_delta.as_str(),
                    weight_before.as_str(),
                    weight_after.as_str(),
                    weight_delta.as_str(),
                ])
            })
        })
        .map_err(|source| ReportError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush()?;

    debug!(date = %diff.date, rows = rows.len(), path = %path.display(), "change table written");
    Ok(())
}

fn render(value: Option<Decimal>) -> String {
    value.map(|d| d.to_string()).unwrap_or_default()
}
