//! Short code generation and custom alias validation.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use serde_json::json;

/// Default generated code length. 62^6 codes make collisions rare enough
/// that the service's bounded retry loop almost never runs twice.
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Path segments under `/links/` that a short code must not shadow.
const RESERVED_ALIASES: &[&str] = &["shorten", "search"];

/// Generates a random short code of `length` alphanumeric characters.
///
/// Draws uniformly from the 62-symbol alphabet `[A-Za-z0-9]`, independently
/// per call. Uniqueness is not guaranteed here; the service checks the
/// active table and retries on collision.
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a caller-supplied custom alias.
///
/// # Rules
///
/// - 1-32 characters
/// - Letters, digits, hyphens and underscores
/// - Not a reserved route segment
///
/// Deliberately more permissive than the generator's alphabet: a caller may
/// reuse any previously retired code, including hand-picked ones.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > 32 {
        return Err(AppError::bad_request(
            "Custom alias must be 1-32 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
