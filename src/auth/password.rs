//! Admin secret hashing.
//!
//! Uses Argon2id with a random salt; hashes are stored as PHC strings.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Secret hashing errors.
#[derive(Error, Debug)]
pub enum SecretError {
    /// The secret is empty.
    #[error("secret must not be empty")]
    Empty,

    /// Hashing failed.
    #[error("secret hashing failed: {0}")]
    HashError(String),

    /// The stored hash is not a valid PHC string.
    #[error("invalid secret hash format")]
    InvalidHash,

    /// The secret does not match.
    #[error("secret verification failed")]
    VerificationFailed,
}

/// Argon2id with 64 MiB memory, 3 iterations, 4 lanes.
fn create_argon2() -> Result<Argon2<'static>, SecretError> {
    let params =
        Params::new(65536, 3, 4, None).map_err(|e| SecretError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a secret, returning a PHC string with salt and parameters.
///
/// ```
/// use contest_board::auth::hash_secret;
///
/// let hash = hash_secret("open sesame").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_secret(secret: &str) -> Result<String, SecretError> {
    if secret.is_empty() {
        return Err(SecretError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = create_argon2()?
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| SecretError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a secret against a PHC hash in constant time.
pub fn verify_secret(secret: &str, hash: &str) -> Result<(), SecretError> {
    let parsed = PasswordHash::new(hash).map_err(|_| SecretError::InvalidHash)?;

    // Parameters come from the parsed hash.
    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .map_err(|_| SecretError::VerificationFailed)
}

/// Whether `value` parses as a PHC hash string.
pub fn is_phc_hash(value: &str) -> bool {
    PasswordHash::new(value).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_format() {
        let hash = hash_secret("admin-secret").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(is_phc_hash(&hash));
    }

    #[test]
    fn test_salted() {
        let a = hash_secret("same").unwrap();
        let b = hash_secret("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify() {
        let hash = hash_secret("correct").unwrap();
        assert!(verify_secret("correct", &hash).is_ok());
        assert!(matches!(
            verify_secret("wrong", &hash),
            Err(SecretError::VerificationFailed)
        ));
    }

    #[test]
    fn test_invalid_hash() {
        assert!(matches!(
            verify_secret("x", "not_a_hash"),
            Err(SecretError::InvalidHash)
        ));
        assert!(!is_phc_hash("5f4dcc3b5aa765d61d8327deb882cf99"));
    }

    #[test]
    fn test_empty_secret() {
        assert!(matches!(hash_secret(""), Err(SecretError::Empty)));
    }
}
