pub mod ip;
pub mod url_validator;

use uuid::Uuid;

use crate::errors::{Result, TrimmrrError};

/// Generate a random short code.
///
/// Takes the first hyphen-separated segment of a v4 UUID (8 hex characters).
/// This carries far less collision resistance than the full 128-bit UUID;
/// the link registry compensates by retrying creation on a conflict rather
/// than by lengthening the code.
pub fn generate_short_code() -> String {
    let id = Uuid::new_v4().to_string();
    id.split('-').next().unwrap_or(&id).to_string()
}

/// Whether a code is URL-path-safe: non-empty, alphanumeric plus `_`, `-`, `.`
pub fn is_valid_short_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Validate a user-supplied custom code.
///
/// Only checks shape; uniqueness is enforced by the store at persistence
/// time, not here.
pub fn validate_custom_code(candidate: &str) -> Result<()> {
    if candidate.is_empty() {
        return Err(TrimmrrError::validation("Custom code cannot be empty"));
    }
    if !is_valid_short_code(candidate) {
        return Err(TrimmrrError::validation(format!(
            "Invalid custom code '{}'. Only alphanumeric, underscore, hyphen and dot allowed.",
            candidate
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_short_code_shape() {
        let code = generate_short_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_codes_differ() {
        // Not a collision-resistance proof, just a sanity check
        let a = generate_short_code();
        let b = generate_short_code();
        assert_ne!(a, b);
    }

    #[test]
    fn test_is_valid_short_code() {
        assert!(is_valid_short_code("abc123"));
        assert!(is_valid_short_code("my-link_v1.2"));
        assert!(!is_valid_short_code(""));
        assert!(!is_valid_short_code("has space"));
        assert!(!is_valid_short_code("a/b"));
        assert!(!is_valid_short_code("emoji💥"));
    }

    #[test]
    fn test_validate_custom_code() {
        assert!(validate_custom_code("docs").is_ok());
        assert!(validate_custom_code("").is_err());
        assert!(validate_custom_code("bad code").is_err());
        assert!(validate_custom_code("a?b").is_err());
    }
}
