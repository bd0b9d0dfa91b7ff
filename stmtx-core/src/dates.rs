//! Month-name table and canonical (`YYYY-MM-DD`) statement dates.

use chrono::NaiveDate;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Map a month name to its number (1-12).
///
/// Matches case-insensitively on the full name or any prefix of at least three
/// letters, so "Jan", "Sept" and "January" are all accepted.
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.trim().to_ascii_lowercase();
    if name.len() < 3 || !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| m.starts_with(&name))
        .map(|i| i as u32 + 1)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

/// Parse a statement date token.
///
/// Accepts `D[D]-Month-YYYY` (whitespace around the hyphens is ignored) and the
/// canonical `YYYY-MM-DD` form.
pub fn parse_statement_date(token: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = token.split('-').map(str::trim).collect();
    let [first, month, last] = parts.as_slice() else {
        return None;
    };

    if first.len() == 4 && all_digits(first) {
        if month.len() != 2 || last.len() != 2 || !all_digits(month) || !all_digits(last) {
            return None;
        }
        return NaiveDate::from_ymd_opt(first.parse().ok()?, month.parse().ok()?, last.parse().ok()?);
    }

    if first.len() > 2 || !all_digits(first) || last.len() != 4 || !all_digits(last) {
        return None;
    }
    NaiveDate::from_ymd_opt(last.parse().ok()?, month_number(month)?, first.parse().ok()?)
}

/// Render a date in canonical `YYYY-MM-DD` form.
pub fn to_canonical(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Normalize a date token to canonical form. Canonical input is returned as-is.
pub fn canonical_date(token: &str) -> Option<String> {
    parse_statement_date(token).map(to_canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_and_prefixes() {
        assert_eq!(month_number("January"), Some(1));
        assert_eq!(month_number("jan"), Some(1));
        assert_eq!(month_number("Sept"), Some(9));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("Ma"), None);
        assert_eq!(month_number("Transfer"), None);
        assert_eq!(month_number("Jan1"), None);
    }

    #[test]
    fn test_parse_statement_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_statement_date("05-March-2024"), Some(d));
        assert_eq!(parse_statement_date("5-Mar-2024"), Some(d));
        assert_eq!(parse_statement_date("05- Mar -2024"), Some(d));
        assert_eq!(parse_statement_date("2024-03-05"), Some(d));
        assert_eq!(parse_statement_date("31-February-2024"), None);
        assert_eq!(parse_statement_date("05-Foo-2024"), None);
        assert_eq!(parse_statement_date("05/03/2024"), None);
    }

    #[test]
    fn test_canonical_is_idempotent_for_all_months() {
        for (i, name) in MONTHS.iter().enumerate() {
            let token = format!("09-{}-2023", name);
            let once = canonical_date(&token).unwrap();
            assert_eq!(once, format!("2023-{:02}-09", i + 1));
            assert_eq!(canonical_date(&once).as_deref(), Some(once.as_str()));
        }
    }
}
