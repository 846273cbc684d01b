//! Editor token generation and hashing.

use base64::Engine as _;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per token before base64 encoding.
const TOKEN_LENGTH_BYTES: usize = 32;

/// Generates a URL-safe random bearer token (43 characters).
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
pub fn generate_token() -> Result<String, getrandom::Error> {
    let mut buffer = [0u8; TOKEN_LENGTH_BYTES];
    getrandom::fill(&mut buffer)?;
    Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer))
}

/// Hashes a raw token with HMAC-SHA256 keyed by `secret`.
///
/// Returns a 64-character lowercase hex string, the form stored in
/// `editor_tokens.token_hash` and in the site configuration's `editors`.
pub fn hash_token(secret: &str, token: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(token.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_shape() {
        let token = generate_token().unwrap();
        assert_eq!(token.len(), 43);
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        assert_ne!(token, generate_token().unwrap());
    }

    #[test]
    fn test_hash_token_is_stable_hex() {
        let hash = hash_token("secret", "token");
        assert_eq!(hash.len(), 64);
        assert_eq!(hash, hash_token("secret", "token"));
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_token_depends_on_secret() {
        assert_ne!(hash_token("secret-a", "token"), hash_token("secret-b", "token"));
        assert_ne!(hash_token("secret", "token1"), hash_token("secret", "token2"));
    }
}
