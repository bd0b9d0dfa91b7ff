//! One-call conversions from a statement file to export text.

use anyhow::{Context, Result};
use std::path::Path;

use stmtx_ingest::parse_statement_pdf;

use crate::csv_writer::to_csv_string;

/// Decode, parse and render a PDF statement as CSV.
pub fn convert_pdf_to_csv(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let doc = parse_statement_pdf(path).with_context(|| format!("parsing {}", path.display()))?;
    to_csv_string(&doc)
}
