//! The seven-column export view of a statement.

use serde::Serialize;
use stmtx_core::{to_canonical, StatementDocument, TransactionRecord};

/// Column names, in export order.
pub const EXPORT_FIELDS: [&str; 7] = [
    "transactionDate",
    "valueDate",
    "referenceNo",
    "description",
    "debit",
    "credit",
    "balance",
];

/// One exported transaction, dates already in canonical form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub transaction_date: String,
    pub value_date: String,
    pub reference_no: String,
    pub description: String,
    pub debit: f64,
    pub credit: f64,
    pub balance: f64,
}

impl ExportRow {
    /// Field values in [`EXPORT_FIELDS`] order. Amounts use the shortest
    /// representation ("1000", "749.5").
    pub fn values(&self) -> [String; 7] {
        [
            self.transaction_date.clone(),
            self.value_date.clone(),
            self.reference_no.clone(),
            self.description.clone(),
            self.debit.to_string(),
            self.credit.to_string(),
            self.balance.to_string(),
        ]
    }
}

impl From<&TransactionRecord> for ExportRow {
    fn from(t: &TransactionRecord) -> Self {
        Self {
            transaction_date: to_canonical(t.transaction_date),
            value_date: to_canonical(t.value_date),
            reference_no: t.reference_no.clone(),
            description: t.description.clone(),
            debit: t.debit,
            credit: t.credit,
            balance: t.balance,
        }
    }
}

pub fn export_rows(transactions: &[TransactionRecord]) -> Vec<ExportRow> {
    transactions.iter().map(ExportRow::from).collect()
}

/// Rows for a tabular-export collaborator, one per transaction in printed order.
pub fn serialize_for_export(doc: &StatementDocument) -> Vec<ExportRow> {
    export_rows(&doc.transactions)
}
