//! Threshold configuration for report generation.
//!
//! Defaults mirror the portal disclosure's granularity: weights are
//! percentages with two to four decimal places, so a hundredth of a
//! percent is the noise floor.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};

/// Report thresholds. All weights are portfolio percentages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Length of the movers-up and movers-down lists.
    pub top_n: usize,
    /// Absolute weight change below which movement counts as noise.
    pub noise_threshold: Decimal,
    /// Minimum weight for an added ticker to appear as a new holding.
    pub new_holding_min_weight: Decimal,
    /// Weight at or below which a previously held ticker counts as
    /// reduced to dust.
    pub sell_alert_max_weight: Decimal,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: 10,
            noise_threshold: dec!(0.01),
            new_holding_min_weight: dec!(0.5),
            sell_alert_max_weight: dec!(0.1),
        }
    }
}

impl ReportConfig {
    /// Load configuration: the TOML file if present, then environment
    /// overrides on top.
    ///
    /// A missing file is the default configuration; a file that exists but
    /// does not parse is an error, as is an unparseable override.
    pub fn load(path: Option<&Path>) -> ReportResult<Self> {
        let base = match path {
            Some(p) if p.exists() => {
                let raw = fs::read_to_string(p)?;
                toml::from_str(&raw).map_err(|e| ReportError::Config {
                    reason: format!("{}: {e}", p.display()),
                })?
            }
            _ => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `FUNDTRACK_*` overrides from a lookup function.
    ///
    /// Separated from [`ReportConfig::load`] so tests can inject overrides
    /// without touching process environment.
    pub fn with_overrides(
        mut self,
        get: impl Fn(&str) -> Option<String>,
    ) -> ReportResult<Self> {
        if let Some(raw) = get("FUNDTRACK_TOP_N") {
            self.top_n = raw.parse().map_err(|_| bad_override("FUNDTRACK_TOP_N", &raw))?;
        }
        if let Some(raw) = get("FUNDTRACK_NOISE_THRESHOLD") {
            self.noise_threshold = parse_decimal("FUNDTRACK_NOISE_THRESHOLD", &raw)?;
        }
        if let Some(raw) = get("FUNDTRACK_NEW_HOLDING_MIN_WEIGHT") {
            self.new_holding_min_weight =
                parse_decimal("FUNDTRACK_NEW_HOLDING_MIN_WEIGHT", &raw)?;
        }
        if let Some(raw) = get("FUNDTRACK_SELL_ALERT_MAX_WEIGHT") {
            self.sell_alert_max_weight =
                parse_decimal("FUNDTRACK_SELL_ALERT_MAX_WEIGHT", &raw)?;
        }
        Ok(self)
    }
}

fn parse_decimal(key: &str, raw: &str) -> ReportResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| bad_override(key, raw))
}

fn bad_override(key: &str, raw: &str) -> ReportError {
    ReportError::Config {
        reason: format!("cannot parse {key}={raw:?}"),
    }
}
