//! Regexes shared by the header probes, the segmenter and the row extractor.

use regex::Regex;
use std::sync::OnceLock;

/// `DD-Month-YYYY`, whitespace allowed around the hyphens. Groups: day, month, year.
pub(crate) fn date_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"([0-9]{2})\s*-\s*([A-Za-z]{3,})\s*-\s*([0-9]{4})").expect("date token regex")
    })
}

/// Canonical (whitespace-free) `DD-Month-YYYY` token.
pub(crate) fn compact_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{2}-[A-Za-z]{3,}-[0-9]{4}").expect("compact date regex"))
}

/// Transaction date immediately followed by value date: the start of a row.
pub(crate) fn row_boundary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(concat!(
            r"[0-9]{2}\s*-\s*[A-Za-z]{3,}\s*-\s*[0-9]{4}",
            r"\s*",
            r"[0-9]{2}\s*-\s*[A-Za-z]{3,}\s*-\s*[0-9]{4}",
        ))
        .expect("row boundary regex")
    })
}

/// Anything printed like a money amount ("1,234.56", "-50.00").
pub(crate) fn amount_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"-?[0-9,]+\.[0-9]{2}").expect("amount token regex"))
}
