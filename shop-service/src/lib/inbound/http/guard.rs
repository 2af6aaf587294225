use auth::Authenticator;
use auth::JwtError;
use axum::extract::MatchedPath;
use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use thiserror::Error;

use super::errors::NormalizedError;
use super::routes::RouteAccess;
use crate::domain::auth::models::Actor;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;

/// Reason a request was stopped before reaching its handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("No bearer token presented")]
    MissingToken,

    #[error("Bearer token rejected: {0}")]
    InvalidToken(JwtError),

    #[error("Route requires the ADMIN role")]
    Forbidden,
}

/// Decide whether a request may proceed.
///
/// Public routes pass without looking at the token. Otherwise the token
/// must verify, and admin-only routes additionally require `ADMIN`.
/// Returns the caller identity when one was established.
pub fn authorize(
    access: RouteAccess,
    bearer: Option<&str>,
    authenticator: &Authenticator,
) -> Result<Option<Actor>, Denial> {
    if access.is_public {
        return Ok(None);
    }

    let token = bearer.ok_or(Denial::MissingToken)?;
    let claims = authenticator
        .validate_token(token)
        .map_err(Denial::InvalidToken)?;
    let user_id = UserId::from_string(&claims.subject)
        .map_err(|e| Denial::InvalidToken(JwtError::Malformed(e.to_string())))?;

    if access.is_admin_only && !claims.role.is_admin() {
        return Err(Denial::Forbidden);
    }

    Ok(Some(Actor {
        user_id,
        role: claims.role,
    }))
}

/// Extract the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Route guard middleware.
///
/// Resolves the matched route template against the route table, runs
/// [`authorize`] and stores the [`Actor`] in request extensions for the
/// handler.
pub async fn guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, NormalizedError> {
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let access = state.routes.access(req.method(), &path);

    let decision = authorize(access, bearer_token(req.headers()), &state.authenticator);
    match decision {
        Ok(Some(actor)) => {
            req.extensions_mut().insert(actor);
        }
        Ok(None) => {}
        Err(denial) => {
            tracing::warn!(
                method = %req.method(),
                route = %path,
                reason = %denial,
                "Request denied"
            );
            return Err(denial.into());
        }
    }

    Ok(next.run(req).await)
}
