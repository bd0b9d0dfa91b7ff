//! stmtx-ingest: bank statement text parsing (header probes, row segmentation,
//! per-row field extraction) and PDF text decoding.

pub mod document;
pub mod header;
pub mod normalize;
pub mod parser;
pub mod row;
pub mod segment;

mod patterns;

pub use document::{
    extract_raw_text, extract_raw_text_from_path, parse_statement_pdf, parse_statement_pdf_bytes,
};
pub use header::HeaderProbes;
pub use normalize::normalize_text;
pub use parser::{
    parse_statement, HeaderPolicy, ParseOptions, ParsedStatement, PrintOrder, StatementParser,
};
pub use row::{extract_row, locate_amounts, AmountSpans};
pub use segment::segment_transactions;
