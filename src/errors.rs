use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the data, storage, and configuration layers.
#[derive(Error, Debug)]
pub enum BudgetError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Invalid month {month} (expected 1-12)")]
    InvalidMonth { month: u32 },
    #[error("Invalid year {year} (expected 0-9999)")]
    InvalidYear { year: i32 },
    #[error("Budget limit must be a positive number, got `{0}`")]
    InvalidBudgetLimit(String),
}

pub type Result<T> = StdResult<T, BudgetError>;

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        BudgetError::StorageError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_map_to_storage_errors() {
        let err: BudgetError = std::io::Error::new(std::io::ErrorKind::Other, "disk full").into();
        assert!(matches!(err, BudgetError::StorageError(ref msg) if msg.contains("disk full")));
    }

    #[test]
    fn invalid_month_message_names_the_month() {
        let err = BudgetError::InvalidMonth { month: 13 };
        assert_eq!(err.to_string(), "Invalid month 13 (expected 1-12)");
    }
}
