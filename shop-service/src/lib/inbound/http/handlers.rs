use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use crate::inbound::http::errors::NormalizedError;

pub mod auth;
pub mod categories;
pub mod health;
pub mod products;
pub mod purchases;
pub mod users;

/// JSON request body whose rejections are answered like any other failure.
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(NormalizedError))]
pub struct Json<T>(pub T);

/// Query string extractor whose rejections are answered like any other failure.
#[derive(Debug, Clone, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(NormalizedError))]
pub struct Query<T>(pub T);

/// Successful response: a status code and a JSON body.
#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, axum::Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, axum::Json(data))
    }

    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}
