/// Collapse raw extracted text onto a single line.
///
/// Every line break (`\r\n`, `\n` or `\r`) becomes one space; the result is trimmed.
pub fn normalize_text(raw: &str) -> String {
    raw.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .trim()
        .to_string()
}
