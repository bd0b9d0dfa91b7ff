//! Transaction table segmentation.
//!
//! Rows have no reliable delimiter in the extracted text, so a row is taken to
//! start wherever a transaction date is immediately followed by a value date:
//!   02-Jan-2024 02-Jan-2024 Salary Transfer 5,000.00 15,000.00 05-Jan-2024 ...

use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

use stmtx_core::{Result, StatementError};

use crate::patterns::row_boundary_re;

/// Column-header label that opens the transaction table (and every page's copy of it).
pub const TABLE_MARKER: &str = "Transaction Date";

fn header_band_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Transaction Date.*?Balance").expect("header band regex"))
}

/// Offset of the first table marker in normalized text.
pub fn locate_table(text: &str) -> Result<usize> {
    text.find(TABLE_MARKER)
        .ok_or(StatementError::TransactionTableNotFound)
}

/// Start of the page-number remnant in front of a repeated marker at `pos`.
///
/// A whitespace-delimited page number ("... 13,000.00 12 Transaction Date")
/// goes whole, whatever its width. Otherwise the two characters right before
/// the marker are taken to be the remnant.
fn page_number_start(table: &str, pos: usize) -> usize {
    let before = table[..pos].trim_end();
    let digits = before.bytes().rev().take_while(u8::is_ascii_digit).count();
    let number_start = before.len() - digits;
    let delimited = number_start == 0 || before.as_bytes()[number_start - 1].is_ascii_whitespace();
    if digits > 0 && delimited {
        return number_start;
    }

    table[..pos]
        .char_indices()
        .rev()
        .nth(1)
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Drop the page-number remnant sitting right before every repeated marker.
fn strip_page_numbers(table: &str) -> String {
    let mut out = String::with_capacity(table.len());
    let mut copied = 0;

    for (pos, _) in table.match_indices(TABLE_MARKER).filter(|(pos, _)| *pos > 0) {
        let cut = page_number_start(table, pos).max(copied);
        out.push_str(&table[copied..cut]);
        copied = pos;
    }
    out.push_str(&table[copied..]);
    out
}

/// Table text with page-number remnants and repeated column headers removed.
///
/// `table` must start at the first marker (see [`locate_table`]).
pub fn clean_table(table: &str) -> String {
    let without_page_numbers = strip_page_numbers(table);
    header_band_re()
        .replace_all(&without_page_numbers, "")
        .into_owned()
}

/// Split cleaned table text into one trimmed substring per row.
///
/// Rows run from one boundary to the next. Text ahead of the first boundary
/// (or the whole text, when there is no boundary) is kept as a row of its own
/// so that field extraction rejects it instead of it going missing.
pub fn split_rows(table: &str) -> Vec<&str> {
    let mut cuts: Vec<usize> = row_boundary_re().find_iter(table).map(|m| m.start()).collect();
    if cuts.first() != Some(&0) {
        cuts.insert(0, 0);
    }

    cuts.iter()
        .zip(cuts.iter().skip(1).map(Some).chain(std::iter::once(None)))
        .map(|(&start, end)| match end {
            Some(&end) => table[start..end].trim(),
            None => table[start..].trim(),
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Normalized statement text → transaction row substrings, in printed order.
pub fn segment_transactions(text: &str) -> Result<Vec<String>> {
    let offset = locate_table(text)?;
    let table = clean_table(&text[offset..]);
    let rows: Vec<String> = split_rows(&table).into_iter().map(str::to_string).collect();
    debug!(rows = rows.len(), "segmented transaction table");
    Ok(rows)
}
