/// Session token utilities
///
/// This module generates and hashes the opaque tokens carried by the session
/// cookie. It works in conjunction with the `models::session` module for
/// database operations.
///
/// # Security
///
/// - **Format**: `dtsk_{32_chars}` (prefix + 32 random alphanumeric chars)
/// - **Storage**: Tokens are hashed with SHA-256 before storage; the
///   plaintext exists only in the Set-Cookie header and the browser
/// - **Lookup**: Requests are resolved by hashing the presented token and
///   matching the hash column, so no plaintext comparison ever happens
///
/// # Example
///
/// ```
/// use duetask_shared::auth::session_token::{
///     generate_session_token, hash_session_token, validate_session_token_format,
/// };
///
/// let (token, hash) = generate_session_token();
/// assert!(token.starts_with("dtsk_"));
/// assert_eq!(token.len(), 37);
///
/// assert!(validate_session_token_format(&token));
/// assert_eq!(hash, hash_session_token(&token));
/// ```

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of the random part of the token (characters)
const TOKEN_RANDOM_LENGTH: usize = 32;

/// Session token prefix
///
/// Makes a leaked token recognizable in logs and secret scanners.
const TOKEN_PREFIX: &str = "dtsk_";

/// Total length of a session token (prefix + random)
pub const SESSION_TOKEN_LENGTH: usize = TOKEN_PREFIX.len() + TOKEN_RANDOM_LENGTH;

/// Generates a new session token
///
/// Creates a cryptographically random token with the format `dtsk_{32_chars}`
/// and its SHA-256 hash for database storage.
///
/// # Returns
///
/// Tuple of (plaintext_token, sha256_hash)
///
/// # Example
///
/// ```
/// use duetask_shared::auth::session_token::generate_session_token;
///
/// let (token, hash) = generate_session_token();
/// assert_eq!(token.len(), 37);
/// assert_eq!(hash.len(), 64); // SHA-256 hex is 64 chars
/// ```
pub fn generate_session_token() -> (String, String) {
    let random_part = generate_random_string(TOKEN_RANDOM_LENGTH);
    let token = format!("{}{}", TOKEN_PREFIX, random_part);
    let hash = hash_session_token(&token);

    (token, hash)
}

/// Generates a random alphanumeric string
///
/// Base62 (A-Z, a-z, 0-9), so the token is cookie-safe without encoding.
fn generate_random_string(length: usize) -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::thread_rng();

    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Hashes a session token using SHA-256
///
/// # Returns
///
/// Hex-encoded SHA-256 hash (64 characters)
pub fn hash_session_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Validates session token format
///
/// Checks the prefix, the total length, and that the random part is
/// alphanumeric. Cookies that fail this check are discarded without a
/// database round trip.
///
/// # Example
///
/// ```
/// use duetask_shared::auth::session_token::validate_session_token_format;
///
/// assert!(validate_session_token_format("dtsk_abcdefghijklmnopqrstuvwxyz123456"));
/// assert!(!validate_session_token_format("dtsk_short"));
/// assert!(!validate_session_token_format("dusk_abcdefghijklmnopqrstuvwxyz123456"));
/// ```
pub fn validate_session_token_format(token: &str) -> bool {
    if token.len() != SESSION_TOKEN_LENGTH {
        return false;
    }

    if !token.starts_with(TOKEN_PREFIX) {
        return false;
    }

    let random_part = &token[TOKEN_PREFIX.len()..];
    random_part.chars().all(|c| c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_token() {
        let (token1, hash1) = generate_session_token();
        let (token2, hash2) = generate_session_token();

        assert!(token1.starts_with("dtsk_"));
        assert_eq!(token1.len(), SESSION_TOKEN_LENGTH);

        // Two calls never collide
        assert_ne!(token1, token2);
        assert_ne!(hash1, hash2);

        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let hash1 = hash_session_token("dtsk_sametoken");
        let hash2 = hash_session_token("dtsk_sametoken");
        let hash3 = hash_session_token("dtsk_othertoken");

        assert_eq!(hash1, hash2);
        assert_ne!(hash1, hash3);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_generated_hash_matches_recomputed_hash() {
        let (token, hash) = generate_session_token();
        assert_eq!(hash, hash_session_token(&token));
    }

    #[test]
    fn test_validate_session_token_format() {
        assert!(validate_session_token_format(
            "dtsk_abcdefghijklmnopqrstuvwxyz123456"
        ));
        assert!(validate_session_token_format(
            "dtsk_ABCDEFGHIJKLMNOPQRSTUVWXYZ123456"
        ));

        // Wrong prefix
        assert!(!validate_session_token_format(
            "dusk_abcdefghijklmnopqrstuvwxyz123456"
        ));

        // Wrong length
        assert!(!validate_session_token_format("dtsk_short"));
        assert!(!validate_session_token_format(
            "dtsk_abcdefghijklmnopqrstuvwxyz1234567890"
        ));

        // Non-alphanumeric random part
        assert!(!validate_session_token_format(
            "dtsk_abcdefghijklmnopqrstuvwxyz12345!"
        ));

        // Empty
        assert!(!validate_session_token_format(""));
    }

    #[test]
    fn test_generated_tokens_pass_format_check() {
        for _ in 0..20 {
            let (token, _) = generate_session_token();
            assert!(validate_session_token_format(&token));
        }
    }
}
