use std::sync::OnceLock;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Digest compared against when the account does not exist.
static DUMMY_DIGEST: OnceLock<Option<String>> = OnceLock::new();

/// Password hashing implementation.
///
/// Argon2id with a random salt per digest; digests are PHC strings, so
/// algorithm parameters travel with the stored value.
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password.
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// The comparison inside `argon2` is constant-time. A mismatch is
    /// `Ok(false)`; only an unreadable digest is an error.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored digest is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Run one verification against a throwaway digest and discard the result.
    pub fn verify_dummy(&self, password: &str) {
        let digest = DUMMY_DIGEST.get_or_init(|| self.hash("storefront-dummy-password").ok());
        if let Some(digest) = digest {
            let _ = self.verify(password, digest);
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
