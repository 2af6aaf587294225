use std::sync::Arc;

use async_trait::async_trait;
use auth::Role;
use chrono::Utc;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash(&self, password: &Password) -> Result<String, UserError> {
        self.password_hasher
            .hash(password.expose())
            .map_err(|e| UserError::Hashing(e.to_string()))
    }

    async fn ensure_email_free(
        &self,
        email: &EmailAddress,
        owner: Option<UserId>,
    ) -> Result<(), UserError> {
        match self.repository.find_by_email(email).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(UserError::EmailInUse(email.to_string()))
            }
            _ => Ok(()),
        }
    }

    async fn insert(
        &self,
        email: EmailAddress,
        password: &Password,
        role: Role,
        name: Option<String>,
        address: Option<String>,
    ) -> Result<User, UserError> {
        let user = User {
            id: UserId::new(),
            email,
            password_hash: self.hash(password)?,
            role,
            name,
            address,
            created_at: Utc::now(),
        };

        Ok(self.repository.create(user).await?)
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        self.ensure_email_free(&command.email, None).await?;

        let user = self
            .insert(
                command.email,
                &command.password,
                Role::User,
                command.name,
                command.address,
            )
            .await?;

        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.repository.list_all().await?)
    }

    async fn update_user(
        &self,
        id: &UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_email) = command.email {
            if new_email != user.email {
                self.ensure_email_free(&new_email, Some(user.id)).await?;
                user.email = new_email;
            }
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash(&new_password)?;
        }

        if let Some(name) = command.name {
            user.name = Some(name);
        }

        if let Some(address) = command.address {
            user.address = Some(address);
        }

        Ok(self.repository.update(user).await?)
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }

    async fn ensure_admin(
        &self,
        email: EmailAddress,
        password: Password,
    ) -> Result<User, UserError> {
        if let Some(existing) = self.repository.find_by_email(&email).await? {
            tracing::info!(user_id = %existing.id, role = %existing.role, "Admin account already present");
            return Ok(existing);
        }

        let admin = self.insert(email, &password, Role::Admin, None, None).await?;
        tracing::info!(user_id = %admin.id, "Admin account created");
        Ok(admin)
    }
}
