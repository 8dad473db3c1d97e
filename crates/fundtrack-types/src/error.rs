use thiserror::Error;

/// Errors produced by type construction and parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid ticker {ticker:?}: {reason}")]
    InvalidTicker { ticker: String, reason: String },

    #[error("invalid snapshot date {input:?}: expected YYYY-MM-DD")]
    InvalidDate { input: String },

    #[error("invalid decimal {input:?} for {field}")]
    InvalidDecimal { field: &'static str, input: String },
}
