//! Password value object - Domain layer password handling.
//!
//! Hashes with Argon2id, salted per password and peppered with an
//! application-wide secret.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain text password with the given pepper.
    ///
    /// Length rules are enforced by the user validation pipeline before
    /// this is called.
    pub fn new(plain_text: &str, pepper: &str) -> AppResult<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2(pepper)?
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    pub fn verify(&self, plain_text: &str, pepper: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash, pepper).unwrap_or(false)
    }

    fn verify_hash(plain_text: &str, hash: &str, pepper: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2(pepper)?
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    /// Argon2id keyed with the pepper.
    fn argon2(pepper: &str) -> AppResult<Argon2<'_>> {
        Argon2::new_with_secret(
            pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| AppError::internal(format!("Invalid password pepper: {}", e)))
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for Password {}

/// Deterministic keyed digest, hex encoded.
///
/// Used for secrets that must be looked up by value (password reset
/// tokens): the key doubles as the Argon2 salt so equal inputs always map
/// to the same digest. The key must be at least 8 bytes.
pub fn keyed_digest(value: &str, key: &[u8]) -> AppResult<String> {
    let mut out = [0u8; 32];
    Argon2::default()
        .hash_password_into(value.as_bytes(), key, &mut out)
        .map_err(|e| AppError::internal(format!("Digest failed: {}", e)))?;
    Ok(to_hex(&out))
}

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PEPPER: &str = "test-pepper";

    #[test]
    fn test_password_hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain, PEPPER).unwrap();

        assert!(password.verify(plain, PEPPER));
        assert!(!password.verify("WrongPassword123", PEPPER));
    }

    #[test]
    fn test_pepper_is_required_to_verify() {
        let password = Password::new("megaman007", PEPPER).unwrap();

        assert!(!password.verify("megaman007", "another-pepper"));
    }

    #[test]
    fn test_password_from_hash() {
        let plain = "TestPassword123";
        let hash = Password::new(plain, PEPPER).unwrap().into_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain, PEPPER));
    }

    #[test]
    fn test_same_password_different_salts() {
        let pass1 = Password::new("SamePassword123", PEPPER).unwrap();
        let pass2 = Password::new("SamePassword123", PEPPER).unwrap();

        assert_ne!(pass1.as_str(), pass2.as_str());
    }

    #[test]
    fn test_keyed_digest_is_deterministic() {
        let a = keyed_digest("token-value", b"hmac-key-123").unwrap();
        let b = keyed_digest("token-value", b"hmac-key-123").unwrap();
        let c = keyed_digest("token-value", b"other-key-456").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }
}
