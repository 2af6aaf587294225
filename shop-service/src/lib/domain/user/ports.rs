use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;

/// Port for user domain service operations.
#[async_trait]
pub trait UserServicePort: Send + Sync + 'static {
    /// Register a shopper account with role `USER`.
    ///
    /// # Errors
    /// * `EmailInUse` - Email is already registered
    /// * `Hashing` - Password hashing failed
    /// * `Repository` - Database operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError>;

    /// Retrieve user by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `Repository` - Database operation failed
    async fn get_user(&self, id: &UserId) -> Result<User, UserError>;

    /// Retrieve every account, newest first.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update existing user with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - User does not exist
    /// * `EmailInUse` - New email belongs to another account
    /// * `Repository` - Database operation failed
    async fn update_user(&self, id: &UserId, command: UpdateUserCommand)
        -> Result<User, UserError>;

    /// Delete existing user.
    ///
    /// # Errors
    /// * `Repository(RecordNotFound)` - User does not exist
    async fn delete_user(&self, id: &UserId) -> Result<(), UserError>;

    /// Make sure an administrator account exists for `email`.
    ///
    /// Creates it with role `ADMIN` when missing; an existing account is
    /// returned untouched.
    async fn ensure_admin(&self, email: EmailAddress, password: Password)
        -> Result<User, UserError>;
}

/// Persistence operations for user aggregate (the credential store).
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user.
    ///
    /// # Errors
    /// * `UniqueViolation { field: "email" }` - Email is already registered
    async fn create(&self, user: User) -> Result<User, RepositoryError>;

    /// Retrieve user by identifier (None if not found).
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, RepositoryError>;

    /// Retrieve user by normalized email (None if not found).
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, RepositoryError>;

    /// Retrieve all users.
    async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    /// Overwrite an existing user.
    ///
    /// # Errors
    /// * `RecordNotFound` - User does not exist
    /// * `UniqueViolation { field: "email" }` - New email is taken
    async fn update(&self, user: User) -> Result<User, RepositoryError>;

    /// Remove user.
    ///
    /// # Errors
    /// * `RecordNotFound` - User does not exist
    async fn delete(&self, id: &UserId) -> Result<(), RepositoryError>;
}
