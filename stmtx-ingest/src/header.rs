//! Header probes: each statement-level field is located by its fixed textual
//! neighbour (a label or marker), independently of every other field.
//!
//! Expected normalized text around the header (labels first, values after):
//!   ... as of 15 January 2024 10:30:45 GMT +0200 Ahmed Ali : Customer Name
//!   Customer ID Account Number Currency From Date To Date
//!   1234567 1020304050607080901 EGP 01-Jan-2024 31-Jan-2024
//!   Opening Balance Closing Balance EGP10,000.0012,250.50 ...

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use stmtx_core::{
    month_number, parse_amount, parse_statement_date, Currency, HeaderField, PartialHeader,
    Result, StatementError, StatementHeader,
};

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"as of\s+(?P<day>[0-9]{2})\s+(?P<month>[A-Za-z]+)\s+(?P<year>[0-9]{4})\s+",
            r"(?P<h>[0-9]{2}):(?P<m>[0-9]{2}):(?P<s>[0-9]{2})\s+GMT\s*",
            r"(?P<sign>[+-])(?P<oh>[0-9]{2})(?P<om>[0-9]{2})"
        ))
        .expect("timestamp regex")
    })
}

fn customer_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[0-9]{2}:[0-9]{2}:[0-9]{2}\s+GMT\s*[+-][0-9]{4}\s+(?P<name>.*?)\s*:?\s*Customer Name")
            .expect("customer name regex")
    })
}

fn account_info_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // The non-digit before the account number keeps 20+ digit runs from matching.
        Regex::new(r"To Date.*?(?P<customer>[0-9]+).*?[^0-9](?P<account>[0-9]{19})\s*(?P<currency>EGP|USD|EUR|GBP)")
            .expect("account info regex")
    })
}

fn balance_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"Opening Balance.*?(?P<currency>EGP|USD|EUR|GBP)",
            r"(?P<opening>[0-9,]+\.[0-9]{2})(?P<closing>[0-9,]+\.[0-9]{2})"
        ))
        .expect("balance regex")
    })
}

fn period_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[0-9]{1,2}\s*-\s*[A-Za-z]+\s*-\s*[0-9]{4}").expect("period date regex")
    })
}

fn not_found(field: HeaderField) -> StatementError {
    StatementError::HeaderFieldNotFound(field)
}

#[derive(Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub customer_id: String,
    pub account_number: String,
    pub currency: Currency,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceInfo {
    pub currency: Currency,
    pub opening_balance: f64,
    pub closing_balance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// `as of DD Month YYYY HH:MM:SS GMT +ZZZZ`
pub fn probe_timestamp(text: &str) -> Result<DateTime<FixedOffset>> {
    let field = HeaderField::Timestamp;
    let caps = timestamp_re().captures(text).ok_or(not_found(field))?;
    let num = |name: &str| caps[name].parse::<u32>().map_err(|_| not_found(field));

    let month = month_number(&caps["month"]).ok_or(not_found(field))?;
    let year: i32 = caps["year"].parse().map_err(|_| not_found(field))?;
    let naive = NaiveDate::from_ymd_opt(year, month, num("day")?)
        .and_then(|d| d.and_hms_opt(num("h").ok()?, num("m").ok()?, num("s").ok()?))
        .ok_or(not_found(field))?;

    let offset_secs = (num("oh")? * 3600 + num("om")? * 60) as i32;
    let offset = if &caps["sign"] == "-" {
        FixedOffset::west_opt(offset_secs)
    } else {
        FixedOffset::east_opt(offset_secs)
    }
    .ok_or(not_found(field))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or(not_found(field))
}

/// Text between the timestamp clause and the `Customer Name` label.
pub fn probe_customer_name(text: &str) -> Result<String> {
    customer_name_re()
        .captures(text)
        .map(|caps| caps["name"].trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or(not_found(HeaderField::CustomerName))
}

pub fn probe_account_info(text: &str) -> Result<AccountInfo> {
    let field = HeaderField::AccountInfo;
    let caps = account_info_re().captures(text).ok_or(not_found(field))?;
    Ok(AccountInfo {
        customer_id: caps["customer"].to_string(),
        account_number: caps["account"].to_string(),
        currency: caps["currency"].parse().map_err(|_| not_found(field))?,
    })
}

/// Currency code glued to the opening and closing balances.
pub fn probe_balance(text: &str) -> Result<BalanceInfo> {
    let field = HeaderField::Balance;
    let caps = balance_re().captures(text).ok_or(not_found(field))?;
    Ok(BalanceInfo {
        currency: caps["currency"].parse().map_err(|_| not_found(field))?,
        opening_balance: parse_amount(&caps["opening"]).ok_or(not_found(field))?,
        closing_balance: parse_amount(&caps["closing"]).ok_or(not_found(field))?,
    })
}

/// First two `D[D]-Month-YYYY` tokens anywhere in the text.
pub fn probe_period(text: &str) -> Result<StatementPeriod> {
    let field = HeaderField::Period;
    let mut dates = period_date_re().find_iter(text).map(|m| m.as_str());
    let (Some(start), Some(end)) = (dates.next(), dates.next()) else {
        return Err(not_found(field));
    };
    Ok(StatementPeriod {
        start: parse_statement_date(start).ok_or(not_found(field))?,
        end: parse_statement_date(end).ok_or(not_found(field))?,
    })
}

/// Outcome of every header probe, kept per field until the caller decides how
/// strict to be.
#[derive(Debug)]
pub struct HeaderProbes {
    pub timestamp: Result<DateTime<FixedOffset>>,
    pub customer_name: Result<String>,
    pub account: Result<AccountInfo>,
    pub balance: Result<BalanceInfo>,
    pub period: Result<StatementPeriod>,
}

impl HeaderProbes {
    pub fn run(text: &str) -> Self {
        let probes = Self {
            timestamp: probe_timestamp(text),
            customer_name: probe_customer_name(text),
            account: probe_account_info(text),
            balance: probe_balance(text),
            period: probe_period(text),
        };

        if let (Ok(account), Ok(balance)) = (&probes.account, &probes.balance) {
            if account.currency != balance.currency {
                warn!(
                    account_currency = %account.currency,
                    balance_currency = %balance.currency,
                    "account and balance currencies differ; using the balance currency"
                );
            }
        }
        probes
    }

    pub fn opening_balance(&self) -> Option<f64> {
        self.balance.as_ref().ok().map(|b| b.opening_balance)
    }

    pub fn missing_fields(&self) -> Vec<HeaderField> {
        let mut missing = Vec::new();
        if self.timestamp.is_err() {
            missing.push(HeaderField::Timestamp);
        }
        if self.customer_name.is_err() {
            missing.push(HeaderField::CustomerName);
        }
        if self.account.is_err() {
            missing.push(HeaderField::AccountInfo);
        }
        if self.balance.is_err() {
            missing.push(HeaderField::Balance);
        }
        if self.period.is_err() {
            missing.push(HeaderField::Period);
        }
        missing
    }

    /// Fail-fast: the first failing probe (in field order) is the error.
    pub fn into_header(self) -> Result<StatementHeader> {
        let timestamp = self.timestamp?;
        let customer_name = self.customer_name?;
        let account = self.account?;
        let balance = self.balance?;
        let period = self.period?;

        Ok(StatementHeader {
            timestamp,
            customer_id: account.customer_id,
            customer_name,
            account_number: account.account_number,
            currency: balance.currency,
            opening_balance: balance.opening_balance,
            closing_balance: balance.closing_balance,
            period_start: period.start,
            period_end: period.end,
        })
    }

    /// Collect-warnings: failed fields are left `None` and reported back.
    pub fn into_partial(self) -> (PartialHeader, Vec<HeaderField>) {
        let missing = self.missing_fields();
        let account = self.account.ok();
        let balance = self.balance.ok();
        let period = self.period.ok();

        let header = PartialHeader {
            timestamp: self.timestamp.ok(),
            customer_id: account.as_ref().map(|a| a.customer_id.clone()),
            customer_name: self.customer_name.ok(),
            account_number: account.map(|a| a.account_number),
            currency: balance.as_ref().map(|b| b.currency),
            opening_balance: balance.as_ref().map(|b| b.opening_balance),
            closing_balance: balance.map(|b| b.closing_balance),
            period_start: period.map(|p| p.start),
            period_end: period.map(|p| p.end),
        };
        (header, missing)
    }
}
