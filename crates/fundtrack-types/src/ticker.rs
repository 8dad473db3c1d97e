//! Ticker validation.
//!
//! A ticker is the identity key for one holding within a snapshot. Valid
//! tickers:
//! - Must be non-empty after trimming surrounding whitespace
//! - Must not contain interior whitespace
//! - Must not contain `,` (tickers travel through delimited files)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identity key for one holding within a snapshot.
///
/// Disclosure sources use short security codes (`"2330"`, `"00878"`); the
/// type treats them as opaque strings and only enforces that they are usable
/// as lookup keys and CSV fields.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Create a ticker, trimming surrounding whitespace and validating.
    pub fn new(raw: impl Into<String>) -> Result<Self, TypeError> {
        let raw = raw.into();
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(TypeError::InvalidTicker {
                ticker: raw,
                reason: "ticker must not be empty".into(),
            });
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TypeError::InvalidTicker {
                ticker: raw,
                reason: "ticker must not contain whitespace".into(),
            });
        }
        if trimmed.contains(',') {
            return Err(TypeError::InvalidTicker {
                ticker: raw,
                reason: "ticker must not contain ','".into(),
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// The ticker as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Ticker> for String {
    fn from(t: Ticker) -> Self {
        t.0
    }
}

impl FromStr for Ticker {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker({})", self.0)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
