//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Length of generated codes.
pub const GENERATED_CODE_LENGTH: usize = 8;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Pattern every short code must match, custom or generated.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").expect("code pattern is valid"));

/// Generates a random 8-character alphanumeric code.
///
/// Codes are case-sensitive and drawn from `[A-Za-z0-9]` using the thread-local
/// RNG.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code();
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..GENERATED_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Returns true if `code` is 6 to 8 ASCII letters or digits.
pub fn is_valid_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Validates a user-provided custom short code.
///
/// No normalization is applied: `AbC123` and `abc123` are distinct codes.
///
/// # Errors
///
/// Returns [`AppError::InvalidCode`] if the code does not match
/// `^[A-Za-z0-9]{6,8}$`.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        Ok(())
    } else {
        Err(AppError::InvalidCode)
    }
}
