//! Error taxonomy for statement decoding and parsing.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header fields located by the individual header probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HeaderField {
    Timestamp,
    CustomerName,
    AccountInfo,
    Balance,
    Period,
}

impl HeaderField {
    pub const ALL: [HeaderField; 5] = [
        HeaderField::Timestamp,
        HeaderField::CustomerName,
        HeaderField::AccountInfo,
        HeaderField::Balance,
        HeaderField::Period,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderField::Timestamp => "timestamp",
            HeaderField::CustomerName => "customerName",
            HeaderField::AccountInfo => "accountInfo",
            HeaderField::Balance => "balance",
            HeaderField::Period => "period",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum StatementError {
    #[error("Document format error: {0}")]
    DocumentFormat(String),

    #[error("Header field not found: {0}")]
    HeaderFieldNotFound(HeaderField),

    #[error("Failed to extract dates from transaction: {0}")]
    DateExtractionFailed(String),

    #[error("Failed to extract amounts from transaction: {0}")]
    AmountExtractionFailed(String),

    #[error("Transaction table not found (no \"Transaction Date\" marker)")]
    TransactionTableNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StatementError {
    /// The offending row text for per-row failures.
    pub fn row_text(&self) -> Option<&str> {
        match self {
            StatementError::DateExtractionFailed(row)
            | StatementError::AmountExtractionFailed(row) => Some(row),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StatementError>;
