use axum::extract::State;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Json;
use crate::domain::auth::models::Credentials;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::errors::NormalizedError;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, NormalizedError> {
    let token = state.auth_service.login(body.into()).await?;

    Ok(ApiSuccess::ok(LoginResponseData {
        access_token: token.token,
        expires_at: token.expires_at,
    }))
}

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl From<LoginRequest> for Credentials {
    fn from(body: LoginRequest) -> Self {
        Credentials {
            email: body.email,
            password: body.password,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponseData {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}
