use thiserror::Error;

use crate::domain::errors::RepositoryError;

/// Errors raised by the login flow.
///
/// `InvalidCredentials` is the only one a caller can act on; it is raised
/// identically for an unknown email and a wrong password.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Stored password digest is unreadable: {0}")]
    CorruptDigest(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => AuthError::CorruptDigest(e.to_string()),
            auth::AuthenticationError::JwtError(e) => AuthError::TokenIssuance(e.to_string()),
        }
    }
}
