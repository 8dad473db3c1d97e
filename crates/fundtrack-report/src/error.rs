use std::path::PathBuf;

/// Errors from report generation.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// I/O error writing a report artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV layer failed while writing the change table.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The summary could not be serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration file or environment override is unusable.
    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

/// Result alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
