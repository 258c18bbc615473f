use thiserror::Error;

/// Errors that can occur while loading records, exporting summaries,
/// or rendering reports.
///
/// Aggregation itself never fails: row-level defects degrade the one
/// derived value they touch and are never propagated as errors.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("input is not a readable record sequence: {0}")]
    InvalidInput(String),

    #[error("unsupported input format: {0} (convert the export to CSV)")]
    UnsupportedFormat(String),

    #[error("report template error: {0}")]
    Template(String),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
