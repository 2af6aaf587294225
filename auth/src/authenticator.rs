use crate::jwt::JwtError;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;
use crate::token::AccessToken;
use crate::token::TokenService;
use crate::token::VerifiedClaims;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: TokenService,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator around a configured token service.
    pub fn new(tokens: TokenService) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            tokens,
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a password against its stored digest and issue a token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password digest
    /// * `subject` - Token subject (user id)
    /// * `role` - Role carried by the token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored digest is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: impl ToString,
        role: Role,
    ) -> Result<AccessToken, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.tokens.issue(subject, role)?)
    }

    /// Reject a login for an account that does not exist.
    ///
    /// Burns one password verification so that unknown accounts and wrong
    /// passwords take the same time to fail.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        self.password_hasher.verify_dummy(password);
        AuthenticationError::InvalidCredentials
    }

    /// Validate a token and return its subject and role.
    ///
    /// # Errors
    /// * `JwtError` - Token is forged, malformed, expired or premature
    pub fn validate_token(&self, token: &str) -> Result<VerifiedClaims, JwtError> {
        self.tokens.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn authenticator() -> Authenticator {
        let tokens =
            TokenService::new(b"test_secret_key_at_least_32_bytes!", Duration::minutes(15))
                .unwrap();
        Authenticator::new(tokens)
    }

    #[test]
    fn test_authenticate_success() {
        let authenticator = authenticator();

        let password = "my_password";
        let hash = authenticator
            .hash_password(password)
            .expect("Failed to hash password");

        let access = authenticator
            .authenticate(password, &hash, "user123", Role::Admin)
            .expect("Authentication failed");

        assert!(!access.token.is_empty());

        let verified = authenticator
            .validate_token(&access.token)
            .expect("Token validation failed");
        assert_eq!(verified.subject, "user123");
        assert_eq!(verified.role, Role::Admin);
    }

    #[test]
    fn test_authenticate_invalid_password() {
        let authenticator = authenticator();

        let hash = authenticator
            .hash_password("my_password")
            .expect("Failed to hash password");

        let result = authenticator.authenticate("wrong_password", &hash, "user123", Role::User);
        assert!(matches!(
            result,
            Err(AuthenticationError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_authenticate_unreadable_digest() {
        let authenticator = authenticator();

        let result = authenticator.authenticate("my_password", "not-a-phc", "user123", Role::User);
        assert!(matches!(result, Err(AuthenticationError::PasswordError(_))));
    }

    #[test]
    fn test_reject_unknown_is_invalid_credentials() {
        let authenticator = authenticator();
        assert!(matches!(
            authenticator.reject_unknown("anything"),
            AuthenticationError::InvalidCredentials
        ));
    }

    #[test]
    fn test_validate_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.validate_token("invalid.token.here");
        assert!(result.is_err());
    }
}
