use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use csv::{ReaderBuilder, Trim, WriterBuilder};
use rust_decimal::Decimal;
use tracing::debug;

use fundtrack_types::{HoldingRecord, Snapshot, SnapshotDate, Ticker};

use crate::error::{StoreError, StoreResult};
use crate::traits::SnapshotStore;

/// Expected column order of every snapshot file.
const HEADER: [&str; 4] = ["ticker", "name", "shares", "weight"];

/// Snapshot store over a flat data directory.
///
/// Each snapshot lives in `<root>/<YYYY-MM-DD>.csv`. Files whose stem is
/// not a date are ignored when listing (the directory may carry a README
/// or editor droppings), but a file that *is* named like a snapshot must
/// parse completely -- a malformed row aborts the read with the file and
/// line number.
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// Create a store over `root`. The directory is created lazily on the
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The data directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, date: SnapshotDate) -> PathBuf {
        self.root.join(format!("{date}.csv"))
    }

    fn parse_decimal(
        raw: &str,
        field: &str,
        path: &Path,
        line: usize,
    ) -> StoreResult<Decimal> {
        Decimal::from_str(raw).map_err(|_| StoreError::MalformedRow {
            path: path.to_path_buf(),
            line,
            reason: format!("cannot parse {field} value {raw:?} as a decimal"),
        })
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn read(&self, date: SnapshotDate) -> StoreResult<Option<Snapshot>> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(None);
        }

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&path)
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?
            .clone();
        if headers.iter().collect::<Vec<_>>() != HEADER {
            return Err(StoreError::MalformedRow {
                path,
                line: 1,
                reason: format!("expected header {HEADER:?}, got {headers:?}"),
            });
        }

        let mut holdings = Vec::new();
        for (idx, row) in reader.records().enumerate() {
            let line = idx + 2;
            let row = row.map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
            if row.len() != HEADER.len() {
                return Err(StoreError::MalformedRow {
                    path,
                    line,
                    reason: format!("expected {} fields, got {}", HEADER.len(), row.len()),
                });
            }

            let ticker = Ticker::new(&row[0]).map_err(|e| StoreError::MalformedRow {
                path: path.clone(),
                line,
                reason: e.to_string(),
            })?;
            let shares = Self::parse_decimal(&row[2], "shares", &path, line)?;
            let weight = Self::parse_decimal(&row[3], "weight", &path, line)?;
            holdings.push(HoldingRecord::new(ticker, &row[1], shares, weight));
        }

        Ok(Some(Snapshot::new(date, holdings)))
    }

    fn write(&self, snapshot: &Snapshot) -> StoreResult<()> {
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(snapshot.date);

        let mut writer = WriterBuilder::new()
            .from_path(&path)
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
        writer
            .write_record(HEADER)
            .and_then(|()| {
                snapshot.iter().try_for_each(|r| {
                    let shares = r.shares.to_string();
                    let weight = r.weight.to_string();
                    writer.write_record([
                        r.ticker.as_str(),
                        r.name.as_str(),
                        shares.as_str(),
                        weight.as_str(),
                    ])
                })
            })
            .map_err(|source| StoreError::Csv {
                path: path.clone(),
                source,
            })?;
        writer.flush()?;

        debug!(date = %snapshot.date, rows = snapshot.len(), path = %path.display(), "snapshot written");
        Ok(())
    }

    fn dates(&self) -> StoreResult<Vec<SnapshotDate>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut dates = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match SnapshotDate::parse(stem) {
                Ok(date) => dates.push(date),
                Err(_) => debug!(path = %path.display(), "ignoring non-snapshot file"),
            }
        }
        dates.sort();
        Ok(dates)
    }
}

impl std::fmt::Debug for FsSnapshotStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FsSnapshotStore")
            .field("root", &self.root)
            .finish()
    }
}
