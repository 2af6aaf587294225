use auth::Role;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Json;
use crate::domain::auth::models::Actor;
use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Password;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::errors::NormalizedError;
use crate::inbound::http::router::AppState;

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, NormalizedError> {
    let user = state
        .user_service
        .register(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&user).into()))
}

pub async fn get_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<ApiSuccess<UserResponseData>, NormalizedError> {
    let user = state.user_service.get_user(&actor.user_id).await?;
    Ok(ApiSuccess::ok((&user).into()))
}

pub async fn update_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<ApiSuccess<UserResponseData>, NormalizedError> {
    let user = state
        .user_service
        .update_user(&actor.user_id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::ok((&user).into()))
}

pub async fn delete_me(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<StatusCode, NormalizedError> {
    state.user_service.delete_user(&actor.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<UserResponseData>>, NormalizedError> {
    let users = state.user_service.list_users().await?;
    Ok(ApiSuccess::ok(users.iter().map(Into::into).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<UserResponseData>, NormalizedError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;
    let user = state.user_service.get_user(&user_id).await?;
    Ok(ApiSuccess::ok((&user).into()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, NormalizedError> {
    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;
    state.user_service.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Clone, Deserialize)]
pub struct RegisterUserRequest {
    email: String,
    password: String,
    name: Option<String>,
    address: Option<String>,
}

impl RegisterUserRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, UserError> {
        Ok(RegisterUserCommand {
            email: EmailAddress::new(&self.email)?,
            password: Password::new(self.password)?,
            name: self.name,
            address: self.address,
        })
    }
}

/// HTTP request body for a partial profile update (raw JSON)
#[derive(Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    address: Option<String>,
}

impl UpdateUserRequest {
    fn try_into_command(self) -> Result<UpdateUserCommand, UserError> {
        Ok(UpdateUserCommand {
            email: self.email.as_deref().map(EmailAddress::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            name: self.name,
            address: self.address,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseData {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponseData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email.as_str().to_string(),
            role: user.role,
            name: user.name.clone(),
            address: user.address.clone(),
            created_at: user.created_at,
        }
    }
}
