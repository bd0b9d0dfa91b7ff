//! stmtx-export: tabular (CSV) and JSON rendering of parsed statements

pub mod convert;
pub mod csv_writer;
pub mod fields;
pub mod json;

pub use convert::convert_pdf_to_csv;
pub use csv_writer::{to_csv_string, write_csv, write_csv_file, write_transactions_csv};
pub use fields::{export_rows, serialize_for_export, ExportRow, EXPORT_FIELDS};
pub use json::to_json_string;
