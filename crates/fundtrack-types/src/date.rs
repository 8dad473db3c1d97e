use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Calendar date labeling a snapshot.
///
/// Renders as `YYYY-MM-DD`, which is also the file stem of the snapshot's
/// CSV in the data directory. The date labels output; it never participates
/// in comparison logic.
///
/// `is_trading_day` only knows the Mon–Fri rule. Exchange holidays look like
/// trading days here; gaps they leave in the data directory are handled by
/// the store's walk-back, not by the calendar.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotDate(NaiveDate);

impl SnapshotDate {
    /// Wrap an existing calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day. `None` if the components are out of range.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parse a strict `YYYY-MM-DD` string.
    pub fn parse(input: &str) -> Result<Self, TypeError> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|_| TypeError::InvalidDate {
                input: input.to_string(),
            })
    }

    /// The underlying calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns `true` for Monday through Friday.
    pub fn is_trading_day(&self) -> bool {
        !matches!(self.0.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// The closest strictly-earlier Mon–Fri date.
    ///
    /// `None` only at the lower bound of the calendar.
    pub fn previous_trading_day(&self) -> Option<Self> {
        let mut cand = self.0.pred_opt()?;
        while matches!(cand.weekday(), Weekday::Sat | Weekday::Sun) {
            cand = cand.pred_opt()?;
        }
        Some(Self(cand))
    }
}

impl From<NaiveDate> for SnapshotDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for SnapshotDate {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Debug for SnapshotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SnapshotDate({})", self.0.format("%Y-%m-%d"))
    }
}

impl fmt::Display for SnapshotDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
