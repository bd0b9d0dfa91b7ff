//! CSV rendering: quoted header row, then one row per transaction.
//!
//!   "transactionDate","valueDate","referenceNo","description","debit","credit","balance"
//!   "2023-01-01","2023-01-02","","Transfer",0,1000,5000

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use stmtx_core::{StatementDocument, TransactionRecord};

use crate::fields::{export_rows, EXPORT_FIELDS};

fn writer_for<W: Write>(out: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::NonNumeric)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out)
}

pub fn write_transactions_csv<W: Write>(out: W, transactions: &[TransactionRecord]) -> Result<()> {
    let mut wtr = writer_for(out);
    wtr.write_record(EXPORT_FIELDS).context("writing CSV header")?;
    for row in export_rows(transactions) {
        wtr.write_record(row.values())
            .with_context(|| format!("writing CSV row for {}", row.transaction_date))?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_csv<W: Write>(out: W, doc: &StatementDocument) -> Result<()> {
    write_transactions_csv(out, &doc.transactions)
}

pub fn to_csv_string(doc: &StatementDocument) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(&mut buf, doc)?;
    String::from_utf8(buf).context("CSV output is not UTF-8")
}

pub fn write_csv_file(path: impl AsRef<Path>, transactions: &[TransactionRecord]) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    write_transactions_csv(file, transactions).with_context(|| format!("writing {}", path.display()))
}
