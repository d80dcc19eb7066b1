//! Error types for the stats pipeline

use std::path::PathBuf;

use crate::matrix::CoverageError;

/// Fatal errors. Unrecognized names are not errors; they are skipped by the collector.
#[derive(thiserror::Error, Debug)]
pub enum StatsError {
    /// File system error on a specific path
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited text
    #[error("failed to parse {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Expected column is not in the header
    #[error("missing column `{column}` in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// A cell could not be parsed as a number
    #[error("invalid number {value:?} in column `{column}` (row {row}) of {}", path.display())]
    InvalidNumber {
        path: PathBuf,
        column: String,
        row: usize,
        value: String,
    },

    /// Column has no samples to average
    #[error("column `{column}` of {} has no values", path.display())]
    EmptyColumn { path: PathBuf, column: String },

    /// An estimator did not produce a value for every clip of its decoder
    #[error(transparent)]
    Coverage(#[from] CoverageError),

    /// Configuration file could not be parsed
    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl StatsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StatsError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        StatsError::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result type for stats operations
pub type Result<T> = std::result::Result<T, StatsError>;
