use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A requested column is not part of the experiment table schema
    #[error("column '{column}' not found (available: {available})")]
    MissingColumn { column: String, available: String },

    #[error("experiment table has no records, nothing to group")]
    EmptyTable,

    #[error("column '{0}' is not numeric")]
    NonNumericColumn(String),

    #[error("malformed statistics line: {0}")]
    MalformedStatistics(String),

    #[error("malformed run data: {0}")]
    MalformedRunData(String),

    #[error("unknown report format '{0}' (expected 'text' or 'json')")]
    UnknownReportFormat(String),

    #[error("malformed graph file: {0}")]
    MalformedGraph(String),

    #[error("invalid solver parameters: {0}")]
    InvalidParameters(String),

    #[error("invalid value '{value}' for {key}")]
    InvalidSetting { key: String, value: String },

    #[error("plot rendering failed: {0}")]
    Plot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid statistics pattern: {0}")]
    Regex(#[from] regex::Error),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),
}
