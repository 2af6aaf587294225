use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessToken;
use auth::Authenticator;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::user::ports::UserRepository;

/// Login service: credential store lookup, password check, token issuance.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn login(&self, credentials: Credentials) -> Result<AccessToken, AuthError> {
        // An address that cannot exist is just another unknown account.
        let Ok(email) = EmailAddress::new(&credentials.email) else {
            return Err(self.authenticator.reject_unknown(&credentials.password).into());
        };

        let Some(user) = self.repository.find_by_email(&email).await? else {
            tracing::debug!("Login rejected: unknown account");
            return Err(self.authenticator.reject_unknown(&credentials.password).into());
        };

        let access_token = self
            .authenticator
            .authenticate(&credentials.password, &user.password_hash, user.id, user.role)
            .map_err(|e| {
                tracing::debug!(user_id = %user.id, error = %e, "Login rejected");
                AuthError::from(e)
            })?;

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in");
        Ok(access_token)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use auth::PasswordHasher;
    use auth::Role;
    use auth::TokenService;
    use chrono::Duration;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::domain::user::models::User;
    use crate::domain::user::models::UserId;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, RepositoryError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;
            async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;
            async fn update(&self, user: User) -> Result<User, RepositoryError>;
            async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
        }
    }

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    fn authenticator() -> Arc<Authenticator> {
        let tokens = TokenService::new(SECRET, Duration::minutes(15)).unwrap();
        Arc::new(Authenticator::new(tokens))
    }

    fn stored_user(email: &str, password: &str, role: Role) -> User {
        User {
            id: UserId::new(),
            email: EmailAddress::new(email).unwrap(),
            password_hash: PasswordHasher::new().hash(password).unwrap(),
            role,
            name: None,
            address: None,
            created_at: Utc::now(),
        }
    }

    fn credentials(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    fn repository_with(user: Option<User>) -> MockTestUserRepository {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(user.clone()));
        repository
    }

    #[tokio::test]
    async fn test_login_returns_token_for_stored_identity() {
        let user = stored_user("tester2@example.com", "abc123456", Role::Admin);
        let user_id = user.id;
        let authenticator = authenticator();
        let service = AuthService::new(Arc::new(repository_with(Some(user))), authenticator.clone());

        let access = service
            .login(credentials("tester2@example.com", "abc123456"))
            .await
            .expect("Login failed");

        let verified = authenticator.validate_token(&access.token).unwrap();
        assert_eq!(verified.subject, user_id.to_string());
        assert_eq!(verified.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_case_folds_email() {
        let mut repository = MockTestUserRepository::new();
        let user = stored_user("tester2@example.com", "abc123456", Role::User);
        repository
            .expect_find_by_email()
            .withf(|email| email.as_str() == "tester2@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(credentials("Tester2@Example.com", "abc123456"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let user = stored_user("tester2@example.com", "abc123456", Role::User);
        let service = AuthService::new(Arc::new(repository_with(Some(user))), authenticator());

        let result = service
            .login(credentials("tester2@example.com", "wrongPassword"))
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_unknown_email_is_indistinguishable() {
        let service = AuthService::new(Arc::new(repository_with(None)), authenticator());

        let unknown = service
            .login(credentials("nobody@example.com", "abc123456"))
            .await
            .unwrap_err();

        let user = stored_user("tester2@example.com", "abc123456", Role::User);
        let service = AuthService::new(Arc::new(repository_with(Some(user))), authenticator());
        let mismatch = service
            .login(credentials("tester2@example.com", "wrongPassword"))
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), mismatch.to_string());
    }

    #[tokio::test]
    async fn test_login_malformed_email_skips_lookup() {
        let mut repository = MockTestUserRepository::new();
        repository.expect_find_by_email().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.login(credentials("not-an-email", "abc123456")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_propagates_store_failure() {
        let mut repository = MockTestUserRepository::new();
        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Err(RepositoryError::Database("connection reset".to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service
            .login(credentials("tester2@example.com", "abc123456"))
            .await;
        assert!(matches!(
            result,
            Err(AuthError::Repository(RepositoryError::Database(_)))
        ));
    }
}
