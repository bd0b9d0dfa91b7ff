//! PDF statements → raw text, and the file-level parse entry points.

use std::fs;
use std::path::Path;

use tracing::debug;

use stmtx_core::{Result, StatementDocument, StatementError};

use crate::parser::parse_statement;

/// Decode an in-memory PDF into its raw text.
pub fn extract_raw_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| StatementError::DocumentFormat(e.to_string()))?;
    debug!(bytes = bytes.len(), chars = text.len(), "extracted text from PDF");
    Ok(text)
}

pub fn extract_raw_text_from_path(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading statement document");
    let bytes = fs::read(path)?;
    extract_raw_text(&bytes)
}

pub fn parse_statement_pdf_bytes(bytes: &[u8]) -> Result<StatementDocument> {
    parse_statement(&extract_raw_text(bytes)?)
}

/// Read, decode and parse a PDF statement.
pub fn parse_statement_pdf(path: impl AsRef<Path>) -> Result<StatementDocument> {
    parse_statement(&extract_raw_text_from_path(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pdf_is_format_error() {
        let err = extract_raw_text(b"Transaction Date, but not a PDF").unwrap_err();
        assert!(matches!(err, StatementError::DocumentFormat(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = parse_statement_pdf("definitely/not/here/statement.pdf").unwrap_err();
        assert!(matches!(err, StatementError::Io(_)));
    }
}
