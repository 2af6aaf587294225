use async_trait::async_trait;
use auth::AccessToken;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;

/// Port for the login operation.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    /// * `Repository` - Credential store lookup failed
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError>;
}
