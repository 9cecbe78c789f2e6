/// Input validation
///
/// Validation failures are rejected before any store call is made, so a
/// rejected command has no side effect at all.
use crate::error::{CuelistError, Result};
use url::Url;

/// Require a non-empty value for a named field; returns the trimmed value
pub fn non_empty(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(CuelistError::validation(format!("{field} must not be empty")));
    }
    Ok(value.to_string())
}

/// Require an http(s) url; returns the input unchanged
pub fn http_url(value: &str) -> Result<String> {
    let value = value.trim();
    let parsed = Url::parse(value)
        .map_err(|e| CuelistError::validation(format!("invalid url: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(value.to_string()),
        other => Err(CuelistError::validation(format!(
            "url scheme must be http or https, got {other}"
        ))),
    }
}
