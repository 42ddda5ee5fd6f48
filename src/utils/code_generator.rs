//! Short code and session identifier generation.
//!
//! Both are drawn from the operating system RNG and encoded as URL-safe
//! base64 without padding, so they can travel in paths, headers and cookies
//! unescaped.

use base64::Engine as _;
use regex::Regex;
use std::sync::LazyLock;

/// Length of random bytes behind a short code (encodes to 12 characters).
const CODE_LENGTH_BYTES: usize = 9;

/// Length of random bytes behind a session identifier (encodes to 43 characters).
const SESSION_ID_LENGTH_BYTES: usize = 32;

/// Upper bound on short code length, matching the `short_code` column.
pub const MAX_CODE_LENGTH: usize = 15;

/// Shape of any code that can exist in the bookmarks table.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,15}$").expect("valid short code pattern"));

/// Shape of an issued session identifier.
static SESSION_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{43}$").expect("valid session id pattern"));

/// Generates a cryptographically secure random short code.
///
/// Produces a 12-character code over `[A-Za-z0-9_-]`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    random_token::<CODE_LENGTH_BYTES>()
}

/// Generates an opaque, unguessable session identifier (256 bits of entropy).
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_session_id() -> String {
    random_token::<SESSION_ID_LENGTH_BYTES>()
}

fn random_token<const N: usize>() -> String {
    let mut buffer = [0u8; N];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

/// Returns true if `code` could be a stored short code.
///
/// Lets the redirect path reject garbage without a database round-trip.
pub fn is_well_formed_code(code: &str) -> bool {
    CODE_REGEX.is_match(code)
}

/// Returns true if `session_id` has the shape of an issued identifier.
pub fn is_well_formed_session_id(session_id: &str) -> bool {
    SESSION_ID_REGEX.is_match(session_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_correct_length() {
        let code = generate_code();
        assert_eq!(code.len(), 12);
        assert!(code.len() <= MAX_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_url_safe_characters() {
        let code = generate_code();
        assert!(
            code.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert!(!code.contains('='));
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000).map(|_| generate_code()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generated_code_is_well_formed() {
        for _ in 0..100 {
            assert!(is_well_formed_code(&generate_code()));
        }
    }

    #[test]
    fn test_session_id_length_and_shape() {
        let id = generate_session_id();
        assert_eq!(id.len(), 43);
        assert!(is_well_formed_session_id(&id));
    }

    #[test]
    fn test_session_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_session_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_malformed_codes() {
        assert!(!is_well_formed_code(""));
        assert!(!is_well_formed_code("this-code-is-way-too-long"));
        assert!(!is_well_formed_code("has space"));
        assert!(!is_well_formed_code("semi;colon"));
        assert!(!is_well_formed_code("dots.."));
    }

    #[test]
    fn test_well_formed_codes() {
        assert!(is_well_formed_code("c1"));
        assert!(is_well_formed_code("AbC-12_x"));
        assert!(is_well_formed_code("abcdefghijklmno"));
    }

    #[test]
    fn test_malformed_session_ids() {
        assert!(!is_well_formed_session_id(""));
        assert!(!is_well_formed_session_id("short"));
        assert!(!is_well_formed_session_id(&"a".repeat(44)));
        assert!(!is_well_formed_session_id(&format!("{}=", "a".repeat(42))));
    }
}
