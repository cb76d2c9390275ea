//! Destination URL validation.
//!
//! URLs are checked, never rewritten: the string the user submitted is what
//! gets stored and what the redirect returns.

use crate::error::AppError;
use url::Url;

/// Validates that `input` is present and parses as an absolute URL.
///
/// Blank input counts as missing. Any scheme is accepted as long as the URL
/// is absolute (`https://example.com`, `ftp://files.example.com/a`,
/// `mailto:someone@example.com`).
///
/// # Errors
///
/// - [`AppError::InvalidUrl`] with "URL is required" when missing or blank
/// - [`AppError::InvalidUrl`] with "Invalid URL" when it does not parse or
///   contains ASCII control characters
pub fn validate_url(input: Option<&str>) -> Result<&str, AppError> {
    let raw = match input {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Err(AppError::url_required()),
    };

    // The parser drops tabs and newlines, but the raw string is stored and
    // later sent as a `Location` header, where they are illegal.
    if raw.chars().any(|c| c.is_ascii_control()) {
        return Err(AppError::invalid_url());
    }

    Url::parse(raw).map_err(|_| AppError::invalid_url())?;

    Ok(raw)
}
