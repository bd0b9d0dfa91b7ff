//! Decimal amounts as printed on statements ("12,345.67").

/// Parse an amount, stripping comma thousands separators.
///
/// Only plain digits with an optional fractional part are accepted, so words
/// like "inf" or "NaN" never sneak through `f64::from_str`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (s.as_str(), None),
    };
    if int.is_empty() || !int.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if let Some(frac) = frac {
        if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    s.parse().ok()
}

/// [`parse_amount`] plus an optional leading minus, as printed on overdrawn balances.
pub fn parse_signed_amount(raw: &str) -> Option<f64> {
    match raw.trim().strip_prefix('-') {
        Some(magnitude) => parse_amount(magnitude).map(|v| -v),
        None => parse_amount(raw),
    }
}

/// Two balances are the same if they agree to the cent.
pub fn same_amount(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.005
}
