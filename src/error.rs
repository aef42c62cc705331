//! Error types for file jobs.
//!
//! Redaction itself is total; only I/O, table parsing and configuration
//! can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("table {0} has no header row")]
    EmptyTable(PathBuf),

    #[error("column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    #[error("invalid job config: {0}")]
    Config(#[from] serde_json::Error),
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn table(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Table {
            path: path.into(),
            source,
        }
    }
}

/// Failure of a single translation call.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("translation model unavailable: {0}")]
    Unavailable(String),

    #[error("translation failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PipelineError::MissingColumn {
            column: "combined_text".to_string(),
            path: PathBuf::from("data/in.csv"),
        };
        assert_eq!(
            err.to_string(),
            "column 'combined_text' not found in data/in.csv"
        );

        let err = PipelineError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        );
        assert!(err.to_string().starts_with("I/O error on missing.csv"));
    }
}
