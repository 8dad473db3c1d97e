use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ticker::Ticker;

/// One constituent of a holdings snapshot.
///
/// `ticker` is the identity key; `name` is informational and never
/// participates in comparison logic. `shares` may be fractional (fund
/// disclosures use fractional share counts), and `weight` is a portfolio
/// percentage passed through exactly as disclosed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingRecord {
    pub ticker: Ticker,
    pub name: String,
    pub shares: Decimal,
    pub weight: Decimal,
}

impl HoldingRecord {
    /// Create a new holdings record.
    pub fn new(ticker: Ticker, name: impl Into<String>, shares: Decimal, weight: Decimal) -> Self {
        Self {
            ticker,
            name: name.into(),
            shares,
            weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> HoldingRecord {
        HoldingRecord::new(
            Ticker::new("2330").unwrap(),
            "TSMC",
            dec!(1000),
            dec!(10.53),
        )
    }

    #[test]
    fn equality_is_numeric_not_textual() {
        let a = record();
        let mut b = record();
        b.shares = dec!(1000.0);
        b.weight = dec!(10.530);
        // Same quantities at different scales compare equal.
        assert_eq!(a, b);
    }

    #[test]
    fn fractional_shares_are_representable() {
        let mut r = record();
        r.shares = dec!(1234.567);
        assert_eq!(r.shares, dec!(1234.567));
    }

    #[test]
    fn serde_roundtrip() {
        let r = record();
        let json = serde_json::to_string(&r).unwrap();
        let parsed: HoldingRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(r, parsed);
    }
}
