//! Statement record types produced by the parser

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::HeaderField;

/// Account currencies accepted on statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Egp,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub const ALL: [Currency; 4] = [Currency::Egp, Currency::Usd, Currency::Eur, Currency::Gbp];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Egp => "EGP",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| format!("unsupported currency: {s}"))
    }
}

/// Statement-level metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementHeader {
    /// When the statement was generated ("as of ..." clause)
    pub timestamp: DateTime<FixedOffset>,
    pub customer_id: String,
    pub customer_name: String,
    /// Always 19 digits
    pub account_number: String,
    pub currency: Currency,
    pub opening_balance: f64,
    pub closing_balance: f64,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
}

/// One transaction row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub transaction_date: NaiveDate,
    pub value_date: NaiveDate,
    /// Not extracted yet; always empty
    pub reference_no: String,
    pub description: String,
    pub debit: f64,
    pub credit: f64,
    /// Running balance after this transaction
    pub balance: f64,
}

impl TransactionRecord {
    pub fn is_debit(&self) -> bool {
        self.debit > 0.0
    }

    pub fn is_credit(&self) -> bool {
        self.credit > 0.0
    }
}

/// A fully parsed statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatementDocument {
    pub header: StatementHeader,
    pub transactions: Vec<TransactionRecord>,
}

impl StatementDocument {
    /// Balance after the last transaction, or the opening balance when there are none.
    pub fn final_balance(&self) -> f64 {
        self.transactions
            .last()
            .map(|t| t.balance)
            .unwrap_or(self.header.opening_balance)
    }

    pub fn total_debits(&self) -> f64 {
        self.transactions.iter().map(|t| t.debit).sum()
    }

    pub fn total_credits(&self) -> f64 {
        self.transactions.iter().map(|t| t.credit).sum()
    }
}

/// Header produced in lenient mode: fields whose probe failed are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialHeader {
    pub timestamp: Option<DateTime<FixedOffset>>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub account_number: Option<String>,
    pub currency: Option<Currency>,
    pub opening_balance: Option<f64>,
    pub closing_balance: Option<f64>,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
}

impl From<StatementHeader> for PartialHeader {
    fn from(h: StatementHeader) -> Self {
        Self {
            timestamp: Some(h.timestamp),
            customer_id: Some(h.customer_id),
            customer_name: Some(h.customer_name),
            account_number: Some(h.account_number),
            currency: Some(h.currency),
            opening_balance: Some(h.opening_balance),
            closing_balance: Some(h.closing_balance),
            period_start: Some(h.period_start),
            period_end: Some(h.period_end),
        }
    }
}

impl PartialHeader {
    /// Promote to a full header when every field resolved.
    pub fn into_complete(self) -> Option<StatementHeader> {
        Some(StatementHeader {
            timestamp: self.timestamp?,
            customer_id: self.customer_id?,
            customer_name: self.customer_name?,
            account_number: self.account_number?,
            currency: self.currency?,
            opening_balance: self.opening_balance?,
            closing_balance: self.closing_balance?,
            period_start: self.period_start?,
            period_end: self.period_end?,
        })
    }
}

/// Lenient parse result: whatever header fields resolved, plus the ones that didn't.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenientStatement {
    pub header: PartialHeader,
    pub transactions: Vec<TransactionRecord>,
    pub missing_fields: Vec<HeaderField>,
}

impl LenientStatement {
    pub fn is_complete(&self) -> bool {
        self.missing_fields.is_empty()
    }
}
