//! Qualified name validation

use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::error::{ModelError, ModelResult};

/// Maximum length for qualified names
pub const MAX_QUALIFIED_NAME_LENGTH: usize = 128;

/// URL-safe characters only (RFC 3986 unreserved set)
static QUALIFIED_NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9._~-]+$").unwrap());

/// Validate a model's qualified name
pub fn validate_qualified_name(name: &str) -> ModelResult<()> {
    if name.is_empty() {
        return Err(ModelError::invalid_qualified_name(
            name,
            "qualified name cannot be empty",
        ));
    }

    if name.len() > MAX_QUALIFIED_NAME_LENGTH {
        return Err(ModelError::invalid_qualified_name(
            name,
            format!(
                "too long: {} characters (max {})",
                name.len(),
                MAX_QUALIFIED_NAME_LENGTH
            ),
        ));
    }

    if !QUALIFIED_NAME_PATTERN.is_match(name) {
        return Err(ModelError::invalid_qualified_name(
            name,
            "must be URL-safe: letters, digits, '.', '_', '~' and '-' only",
        ));
    }

    Ok(())
}
