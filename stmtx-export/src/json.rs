use anyhow::{Context, Result};
use serde::Serialize;

/// Pretty JSON for a parsed statement (complete or lenient).
pub fn to_json_string<T: Serialize>(statement: &T) -> Result<String> {
    serde_json::to_string_pretty(statement).context("serializing statement to JSON")
}
