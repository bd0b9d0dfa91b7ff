use chrono::NaiveDate;
use stmtx_core::{Currency, HeaderField, StatementError};
use stmtx_ingest::{normalize_text, parse_statement, segment_transactions};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("statement.txt")
}

fn fixture_text() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture should be readable")
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_fixture_header() {
    let doc = parse_statement(&fixture_text()).expect("fixture should parse");
    let h = &doc.header;

    assert_eq!(h.timestamp.to_rfc3339(), "2024-01-15T10:30:45+02:00");
    assert_eq!(h.customer_name, "Ahmed Mohamed Ali");
    assert_eq!(h.customer_id, "1234567");
    assert_eq!(h.account_number, "1020304050607080901");
    assert_eq!(h.account_number.len(), 19);
    assert_eq!(h.currency, Currency::Egp);
    assert_eq!(h.opening_balance, 10000.00);
    assert_eq!(h.closing_balance, 12150.50);
    assert_eq!(h.period_start, ymd(2024, 1, 1));
    assert_eq!(h.period_end, ymd(2024, 1, 31));
}

#[test]
fn test_parse_fixture_transactions() {
    let doc = parse_statement(&fixture_text()).unwrap();
    let txns = &doc.transactions;
    assert_eq!(txns.len(), 5);

    assert_eq!(txns[0].description, "Salary Transfer");
    assert_eq!((txns[0].debit, txns[0].credit), (0.0, 5000.00));

    // Wrapped across two lines and spaced date in the source.
    assert_eq!(txns[1].description, "ATM Withdrawal Cairo Branch");
    assert_eq!(txns[1].value_date, ymd(2024, 1, 6));
    assert_eq!((txns[1].debit, txns[1].credit), (2000.00, 0.0));

    // Balance unchanged: neither debit nor credit.
    assert_eq!((txns[2].debit, txns[2].credit), (0.0, 0.0));

    // Page break between rows 3 and 4.
    assert_eq!(txns[3].description, "Card Purchase");
    assert_eq!(txns[3].balance, 12250.50);

    // Amount and balance printed with no separator.
    assert_eq!(txns[4].description, "Bank Charges");
    assert_eq!((txns[4].debit, txns[4].credit), (100.00, 0.0));
    assert_eq!(doc.final_balance(), doc.header.closing_balance);
    assert_eq!(doc.total_debits(), 2849.50);
    assert_eq!(doc.total_credits(), 5000.00);
}

#[test]
fn test_running_balance_invariant() {
    let doc = parse_statement(&fixture_text()).unwrap();
    let mut previous = doc.header.opening_balance;
    for txn in &doc.transactions {
        let expected = previous - txn.debit + txn.credit;
        assert!(
            (txn.balance - expected).abs() < 0.005,
            "balance {} != {} for {:?}",
            txn.balance,
            expected,
            txn.description
        );
        assert!(txn.debit == 0.0 || txn.credit == 0.0);
        previous = txn.balance;
    }
}

#[test]
fn test_segments_match_rows() {
    let text = normalize_text(&fixture_text());
    let rows = segment_transactions(&text).unwrap();
    assert_eq!(rows.len(), 5);
    assert!(rows.iter().all(|r| !r.contains("Transaction Date")));
    assert_eq!(rows[2], "08-Jan-2024 08-Jan-2024 Reversal 100.00 13,000.00");
    assert_eq!(rows[3], "10-Jan-2024 10-Jan-2024 Card Purchase 749.50 12,250.50");
}

#[test]
fn test_missing_opening_balance_produces_no_document() {
    let text = fixture_text().replace("Opening Balance", "Previous Balance");
    match parse_statement(&text) {
        Err(StatementError::HeaderFieldNotFound(field)) => assert_eq!(field, HeaderField::Balance),
        other => panic!("expected missing balance, got {other:?}"),
    }
}

#[test]
fn test_unrecognised_first_row_fails_the_parse() {
    // Single-digit day: not a row boundary, so it lands in the leading slice.
    let text = fixture_text().replace("02-Jan-2024 02-Jan-2024 Salary", "2-Jan-2024 02-Jan-2024 Salary");
    match parse_statement(&text) {
        Err(StatementError::DateExtractionFailed(row)) => {
            assert_eq!(row, "2-Jan-2024 02-Jan-2024 Salary Transfer 5,000.00 15,000.00");
        }
        other => panic!("expected the first row to be rejected, got {other:?}"),
    }
}

#[test]
fn test_two_digit_page_number_is_stripped() {
    let text = fixture_text().replace("\n2\nTransaction Date", "\n12\nTransaction Date");
    let rows = segment_transactions(&normalize_text(&text)).unwrap();
    assert_eq!(rows[2], "08-Jan-2024 08-Jan-2024 Reversal 100.00 13,000.00");

    let doc = parse_statement(&text).unwrap();
    assert_eq!(doc.transactions.len(), 5);
    assert_eq!(doc.transactions[2].description, "Reversal");
}
