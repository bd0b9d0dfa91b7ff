//! Per-row field extraction: dates, amount/balance, debit/credit, description.

use std::cmp::Ordering;
use std::ops::Range;

use chrono::NaiveDate;

use stmtx_core::{
    parse_amount, parse_signed_amount, parse_statement_date, Result, StatementError,
    TransactionRecord,
};

use crate::patterns::{amount_token_re, compact_date_re, date_token_re};

/// Byte ranges of the transaction amount and the resulting balance in a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountSpans {
    pub amount: Range<usize>,
    pub balance: Range<usize>,
}

/// A `.` followed by two digits.
fn is_decimal_point(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'.'
        && bytes.get(i + 1).is_some_and(u8::is_ascii_digit)
        && bytes.get(i + 2).is_some_and(u8::is_ascii_digit)
}

/// Locate the last two amounts in a row.
///
/// Amount and balance are frequently printed with no separator at all
/// ("1,000.005,000.00"), so the spans are found from the decimal points rather
/// than by tokenizing: the amount runs backward from the second-to-last point
/// over digits and commas, the balance is whatever follows it up to the last
/// point's two decimals.
pub fn locate_amounts(row: &str) -> Option<AmountSpans> {
    let bytes = row.as_bytes();
    let mut points = (0..bytes.len()).rev().filter(|&i| is_decimal_point(bytes, i));
    let last = points.next()?;
    let second = points.next()?;

    let mut start = second;
    while start > 0 && (bytes[start - 1].is_ascii_digit() || bytes[start - 1] == b',') {
        start -= 1;
    }

    let mut balance_start = second + 3;
    while balance_start < last && bytes[balance_start].is_ascii_whitespace() {
        balance_start += 1;
    }

    Some(AmountSpans {
        amount: start..second + 3,
        balance: balance_start..last + 3,
    })
}

/// Transaction amount and resulting balance.
pub fn extract_amounts(row: &str) -> Result<(f64, f64)> {
    let failed = || StatementError::AmountExtractionFailed(row.to_string());
    let spans = locate_amounts(row).ok_or_else(failed)?;
    let amount = parse_amount(&row[spans.amount]).ok_or_else(failed)?;
    let balance = parse_signed_amount(&row[spans.balance]).ok_or_else(failed)?;
    Ok((amount, balance))
}

/// Transaction date and value date: exactly two date tokens must be present.
pub fn extract_dates(row: &str) -> Result<(NaiveDate, NaiveDate)> {
    let failed = || StatementError::DateExtractionFailed(row.to_string());
    let normalized = date_token_re().replace_all(row, "$1-$2-$3");
    let dates: Vec<&str> = compact_date_re()
        .find_iter(&normalized)
        .map(|m| m.as_str())
        .collect();

    let [transaction, value] = dates.as_slice() else {
        return Err(failed());
    };
    Ok((
        parse_statement_date(transaction).ok_or_else(failed)?,
        parse_statement_date(value).ok_or_else(failed)?,
    ))
}

/// Row text with every amount-like and date token removed.
pub fn extract_description(row: &str) -> String {
    let without_amounts = amount_token_re().replace_all(row, " ");
    let without_dates = date_token_re().replace_all(&without_amounts, " ");
    without_dates.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// `(debit, credit)` for an amount that moved the balance from `baseline` to `balance`.
pub fn classify(amount: f64, balance: f64, baseline: f64) -> (f64, f64) {
    match balance.partial_cmp(&baseline) {
        Some(Ordering::Less) => (amount, 0.0),
        Some(Ordering::Greater) => (0.0, amount),
        _ => (0.0, 0.0),
    }
}

/// Extract one transaction, classifying it against the previous running balance.
pub fn extract_row(row: &str, baseline: f64) -> Result<TransactionRecord> {
    let (transaction_date, value_date) = extract_dates(row)?;
    let (amount, balance) = extract_amounts(row)?;
    let (debit, credit) = classify(amount, balance, baseline);

    Ok(TransactionRecord {
        transaction_date,
        value_date,
        reference_no: String::new(),
        description: extract_description(row),
        debit,
        credit,
        balance,
    })
}
