//! Error types returned by the loader and the query engine

use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`crate::api::StockAnalyzer`]
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Malformed input in {} at line {line}: {reason}", .path.display())]
    MalformedInput {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("No records found for {symbol} between {start} and {end}")]
    NotFound {
        symbol: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AnalyzerError {
    /// True for the "no matching data" business condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, AnalyzerError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AnalyzerError::FileNotFound(PathBuf::from("data/TSLA.csv"));
        assert_eq!(err.to_string(), "File not found: data/TSLA.csv");

        let err = AnalyzerError::MalformedInput {
            path: PathBuf::from("AAPL.csv"),
            line: 3,
            reason: "invalid number 'abc' in column 2".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed input in AAPL.csv at line 3: invalid number 'abc' in column 2"
        );
    }

    #[test]
    fn test_is_not_found() {
        let err = AnalyzerError::NotFound {
            symbol: "AAPL".to_string(),
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        };
        assert!(err.is_not_found());
        assert!(!AnalyzerError::FileNotFound(PathBuf::from("x.csv")).is_not_found());
    }
}
