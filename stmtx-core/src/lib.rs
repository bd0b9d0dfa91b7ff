//! stmtx-core: statement data model, error taxonomy and shared value parsing

pub mod amount;
pub mod dates;
pub mod error;
pub mod model;

pub use amount::{parse_amount, parse_signed_amount, same_amount};
pub use dates::{canonical_date, month_number, parse_statement_date, to_canonical};
pub use error::{HeaderField, Result, StatementError};
pub use model::{
    Currency, LenientStatement, PartialHeader, StatementDocument, StatementHeader,
    TransactionRecord,
};
