//! Lenient parsing of JSON answers.
//!
//! Models sometimes wrap JSON in markdown fences even when asked for
//! `application/json`.

use regex::Regex;
use serde::de::DeserializeOwned;

use gratia_core::error::{GratiaError, Result};

/// Removes every ```` ```json ```` and ```` ``` ```` marker and trims.
pub fn strip_code_fences(text: &str) -> Result<String> {
    let fence = Regex::new(r"(?i)```json|```").map_err(|e| GratiaError::internal(e.to_string()))?;
    Ok(fence.replace_all(text, "").trim().to_string())
}

/// Parses `text` as `T` after stripping fences. `None` on any failure.
pub fn parse_lenient<T: DeserializeOwned>(text: &str) -> Option<T> {
    let clean = strip_code_fences(text).ok()?;
    match serde_json::from_str(&clean) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(error = %e, raw = %text, "model answer is not valid JSON");
            None
        }
    }
}
