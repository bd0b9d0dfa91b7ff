//! Statement parsing pipeline: normalize → header probes → segment → rows.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stmtx_core::{
    same_amount, HeaderField, LenientStatement, Result, StatementDocument, StatementError,
    StatementHeader, TransactionRecord,
};

use crate::header::HeaderProbes;
use crate::normalize::normalize_text;
use crate::row::extract_row;
use crate::segment::segment_transactions;

/// What to do when a header probe fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderPolicy {
    /// Abort on the first missing field.
    #[default]
    FailFast,
    /// Keep going and report missing fields alongside the result.
    CollectWarnings,
}

/// Chronological direction the statement's rows are printed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrintOrder {
    /// The first printed row directly follows the opening balance.
    #[default]
    OldestFirst,
    /// The last printed row directly follows the opening balance.
    NewestFirst,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    pub header_policy: HeaderPolicy,
    pub print_order: PrintOrder,
}

/// Result of [`StatementParser::parse_with_policy`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParsedStatement {
    Complete(StatementDocument),
    Partial(LenientStatement),
}

impl ParsedStatement {
    pub fn transactions(&self) -> &[TransactionRecord] {
        match self {
            ParsedStatement::Complete(doc) => &doc.transactions,
            ParsedStatement::Partial(lenient) => &lenient.transactions,
        }
    }

    pub fn missing_fields(&self) -> &[HeaderField] {
        match self {
            ParsedStatement::Complete(_) => &[],
            ParsedStatement::Partial(lenient) => &lenient.missing_fields,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StatementParser {
    options: ParseOptions,
}

impl StatementParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse with every header field required.
    pub fn parse(&self, raw_text: &str) -> Result<StatementDocument> {
        let text = normalize_text(raw_text);
        let header = HeaderProbes::run(&text).into_header()?;
        let transactions = self.extract_transactions(&text, header.opening_balance)?;
        self.reconcile(&header, &transactions);
        Ok(StatementDocument {
            header,
            transactions,
        })
    }

    /// Parse leaving unresolved header fields empty.
    ///
    /// The opening balance stays mandatory: without it rows cannot be
    /// classified as debit or credit.
    pub fn parse_lenient(&self, raw_text: &str) -> Result<LenientStatement> {
        let text = normalize_text(raw_text);
        let (header, missing_fields) = HeaderProbes::run(&text).into_partial();
        for field in &missing_fields {
            warn!(%field, "header field not found; leaving it empty");
        }

        let opening_balance = header
            .opening_balance
            .ok_or(StatementError::HeaderFieldNotFound(HeaderField::Balance))?;
        let transactions = self.extract_transactions(&text, opening_balance)?;

        Ok(LenientStatement {
            header,
            transactions,
            missing_fields,
        })
    }

    /// Parse under the configured [`HeaderPolicy`].
    pub fn parse_with_policy(&self, raw_text: &str) -> Result<ParsedStatement> {
        match self.options.header_policy {
            HeaderPolicy::FailFast => self.parse(raw_text).map(ParsedStatement::Complete),
            HeaderPolicy::CollectWarnings => {
                let lenient = self.parse_lenient(raw_text)?;
                if lenient.is_complete() {
                    if let Some(header) = lenient.header.clone().into_complete() {
                        self.reconcile(&header, &lenient.transactions);
                        return Ok(ParsedStatement::Complete(StatementDocument {
                            header,
                            transactions: lenient.transactions,
                        }));
                    }
                }
                Ok(ParsedStatement::Partial(lenient))
            }
        }
    }

    fn extract_transactions(&self, text: &str, opening_balance: f64) -> Result<Vec<TransactionRecord>> {
        let rows = segment_transactions(text)?;

        // Walk rows in chronological order so each one is compared against the
        // balance that immediately preceded it.
        let chronological: Vec<&str> = match self.options.print_order {
            PrintOrder::OldestFirst => rows.iter().map(String::as_str).collect(),
            PrintOrder::NewestFirst => rows.iter().rev().map(String::as_str).collect(),
        };

        let mut baseline = opening_balance;
        let mut records = Vec::with_capacity(rows.len());
        for row in chronological {
            let record = extract_row(row, baseline)?;
            baseline = record.balance;
            records.push(record);
        }

        if self.options.print_order == PrintOrder::NewestFirst {
            records.reverse();
        }

        debug!(
            transactions = records.len(),
            order = ?self.options.print_order,
            "extracted transactions"
        );
        Ok(records)
    }

    /// Warn when the running balance does not land on the printed closing balance.
    fn reconcile(&self, header: &StatementHeader, transactions: &[TransactionRecord]) {
        let latest = match self.options.print_order {
            PrintOrder::OldestFirst => transactions.last(),
            PrintOrder::NewestFirst => transactions.first(),
        };
        let running = latest.map_or(header.opening_balance, |t| t.balance);
        if !same_amount(running, header.closing_balance) {
            warn!(
                running_balance = running,
                closing_balance = header.closing_balance,
                "running balance does not match the statement's closing balance"
            );
        }
    }
}

/// Parse raw statement text with the default options (fail-fast, oldest first).
pub fn parse_statement(raw_text: &str) -> Result<StatementDocument> {
    StatementParser::default().parse(raw_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
Account Statement as of 15 January 2024 10:30:45 GMT +0200
Ahmed Mohamed Ali : Customer Name
Customer ID Account Number Currency From Date To Date
1234567 1020304050607080901 EGP 01-Jan-2024 31-Jan-2024
Opening Balance Closing Balance
EGP10,000.0012,250.50
";

    const NEWEST_FIRST_TABLE: &str = "\
Transaction Date Value Date Description Debit Credit Balance
10-Jan-2024 10-Jan-2024 Card Purchase 749.50 12,250.50
05-Jan-2024 06-Jan-2024 ATM Withdrawal 2,000.00 13,000.00
02-Jan-2024 02-Jan-2024 Salary Transfer 5,000.00 15,000.00
";

    #[test]
    fn test_newest_first_seeds_last_printed_row() {
        let parser = StatementParser::new(ParseOptions {
            print_order: PrintOrder::NewestFirst,
            ..ParseOptions::default()
        });
        let doc = parser.parse(&format!("{HEADER}{NEWEST_FIRST_TABLE}")).unwrap();

        let amounts: Vec<(f64, f64)> = doc.transactions.iter().map(|t| (t.debit, t.credit)).collect();
        assert_eq!(amounts, vec![(749.50, 0.0), (2000.00, 0.0), (0.0, 5000.00)]);
        assert_eq!(doc.transactions[0].description, "Card Purchase");
        assert_eq!(doc.transactions[2].description, "Salary Transfer");
    }

    #[test]
    fn test_lenient_keeps_going_without_customer_name() {
        let text = format!("{HEADER}{NEWEST_FIRST_TABLE}").replace("Customer Name", "Client");
        let parser = StatementParser::new(ParseOptions {
            header_policy: HeaderPolicy::CollectWarnings,
            print_order: PrintOrder::NewestFirst,
        });

        let parsed = parser.parse_with_policy(&text).unwrap();
        assert_eq!(parsed.missing_fields(), &[HeaderField::CustomerName]);
        assert_eq!(parsed.transactions().len(), 3);
        assert!(matches!(parsed, ParsedStatement::Partial(_)));

        let strict = StatementParser::default().parse(&text).unwrap_err();
        assert!(matches!(strict, StatementError::HeaderFieldNotFound(HeaderField::CustomerName)));
    }

    #[test]
    fn test_lenient_still_needs_opening_balance() {
        let text = format!("{HEADER}{NEWEST_FIRST_TABLE}").replace("Opening Balance", "Brought Forward");
        let err = StatementParser::default().parse_lenient(&text).unwrap_err();
        assert!(matches!(err, StatementError::HeaderFieldNotFound(HeaderField::Balance)));
    }

    #[test]
    fn test_collect_warnings_promotes_complete_header() {
        let parser = StatementParser::new(ParseOptions {
            header_policy: HeaderPolicy::CollectWarnings,
            print_order: PrintOrder::NewestFirst,
        });
        let parsed = parser.parse_with_policy(&format!("{HEADER}{NEWEST_FIRST_TABLE}")).unwrap();
        assert!(matches!(parsed, ParsedStatement::Complete(_)));
        assert!(parsed.missing_fields().is_empty());
    }

    #[test]
    fn test_bad_row_aborts_whole_parse() {
        let text = format!("{HEADER}{NEWEST_FIRST_TABLE}").replace("749.50 12,250.50", "749.50");
        let err = parse_statement(&text).unwrap_err();
        let row = err.row_text().unwrap();
        assert!(row.starts_with("10-Jan-2024 10-Jan-2024 Card Purchase"));
    }

    #[test]
    fn test_table_without_rows_is_empty() {
        let text = format!("{HEADER}Transaction Date Value Date Description Debit Credit Balance");
        let doc = parse_statement(&text).unwrap();
        assert!(doc.transactions.is_empty());
        assert_eq!(doc.final_balance(), 10000.00);
    }
}
