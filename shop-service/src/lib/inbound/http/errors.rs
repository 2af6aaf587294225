//! Translation of internal failures into caller-facing errors.
//!
//! Every failure leaving a handler or the route guard is wrapped in a
//! [`Failure`] and run through an ordered chain of handlers. The first
//! handler that recognizes the failure produces a [`NormalizedError`] with a
//! fixed message; a failure nobody recognizes is handed back untouched and
//! answered as an opaque internal error.

use auth::JwtError;
use axum::extract::rejection::JsonRejection;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use super::guard::Denial;
use crate::domain::auth::errors::AuthError;
use crate::domain::category::errors::CategoryError;
use crate::domain::errors::Entity;
use crate::domain::errors::RepositoryError;
use crate::domain::product::errors::ProductError;
use crate::domain::purchase::errors::PurchaseError;
use crate::domain::user::errors::UserError;

/// Caller-facing error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    Forbidden,
    NotFound,
    BadRequest,
    Internal,
}

impl ErrorKind {
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Terminal, serializable error handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl NormalizedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::new(ErrorKind::Internal, "Internal server error")
    }

    fn unauthorized(message: &str) -> Option<Self> {
        Some(Self::new(ErrorKind::Unauthorized, message))
    }

    fn bad_request(message: impl Into<String>) -> Option<Self> {
        Some(Self::new(ErrorKind::BadRequest, message))
    }

    fn not_found(entity: Entity) -> Option<Self> {
        let message = match entity {
            Entity::User => "User not found",
            Entity::Category => "Category not found",
            Entity::Product => "Product not found",
            Entity::Purchase => "Purchase not found",
        };
        Some(Self::new(ErrorKind::NotFound, message))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status_code: u16,
    message: &'a str,
}

impl IntoResponse for NormalizedError {
    fn into_response(self) -> Response {
        let status = self.kind.status();
        let body = ErrorBody {
            status_code: status.as_u16(),
            message: &self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Any failure that can reach the HTTP boundary.
#[derive(Debug, Error)]
pub enum Failure {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Purchase(#[from] PurchaseError),

    #[error(transparent)]
    Token(#[from] JwtError),

    #[error(transparent)]
    Denied(#[from] Denial),

    #[error(transparent)]
    Rejected(#[from] Rejection),
}

/// Request that could not be decoded into a handler's input.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error(transparent)]
    Body(#[from] JsonRejection),

    #[error(transparent)]
    Query(#[from] QueryRejection),
}

impl Failure {
    fn repository_error(&self) -> Option<&RepositoryError> {
        match self {
            Failure::Auth(AuthError::Repository(e))
            | Failure::User(UserError::Repository(e))
            | Failure::Category(CategoryError::Repository(e))
            | Failure::Product(ProductError::Repository(e))
            | Failure::Purchase(PurchaseError::Repository(e)) => Some(e),
            _ => None,
        }
    }
}

type Handler = fn(&Failure) -> Option<NormalizedError>;

/// Handlers in the order they inspect a failure.
const CHAIN: &[Handler] = &[
    guard_denials,
    token_errors,
    business_rules,
    validation_errors,
    constraint_violations,
];

/// Run `failure` through the handler chain.
///
/// Returns the original failure when no handler recognizes it.
pub fn normalize(failure: Failure) -> Result<NormalizedError, Failure> {
    let recognized = CHAIN.iter().find_map(|handle| handle(&failure));
    match recognized {
        Some(normalized) => Ok(normalized),
        None => Err(failure),
    }
}

fn guard_denials(failure: &Failure) -> Option<NormalizedError> {
    match failure {
        Failure::Denied(Denial::MissingToken) => {
            NormalizedError::unauthorized("Missing authorization token")
        }
        Failure::Denied(Denial::InvalidToken(_)) => {
            NormalizedError::unauthorized("Invalid authorization token")
        }
        Failure::Denied(Denial::Forbidden) => Some(NormalizedError::new(
            ErrorKind::Forbidden,
            "Admin access required",
        )),
        _ => None,
    }
}

fn token_errors(failure: &Failure) -> Option<NormalizedError> {
    match failure {
        Failure::Token(
            JwtError::Expired
            | JwtError::NotYetValid
            | JwtError::Malformed(_)
            | JwtError::InvalidSignature,
        ) => NormalizedError::unauthorized("Invalid authorization token"),
        _ => None,
    }
}

fn business_rules(failure: &Failure) -> Option<NormalizedError> {
    match failure {
        Failure::Auth(AuthError::InvalidCredentials) => {
            NormalizedError::unauthorized("Invalid credentials")
        }
        Failure::User(UserError::EmailInUse(_)) => {
            NormalizedError::bad_request("E-mail already in use")
        }
        Failure::User(UserError::NotFound(_)) => NormalizedError::not_found(Entity::User),
        Failure::Category(CategoryError::NameInUse(_)) => {
            NormalizedError::bad_request("Category name already in use")
        }
        Failure::Category(CategoryError::NotFound(_)) => {
            NormalizedError::not_found(Entity::Category)
        }
        Failure::Product(ProductError::NameInUse(_)) => {
            NormalizedError::bad_request("Product name already in use")
        }
        Failure::Product(ProductError::UnknownCategory(_)) => {
            NormalizedError::bad_request("Category does not exist")
        }
        Failure::Product(ProductError::NotFound(_) | ProductError::NotFoundByUrlName(_))
        | Failure::Purchase(PurchaseError::ProductNotFound(_)) => {
            NormalizedError::not_found(Entity::Product)
        }
        Failure::Purchase(PurchaseError::NotFound(_)) => {
            NormalizedError::not_found(Entity::Purchase)
        }
        Failure::Purchase(PurchaseError::NotOwner(_)) => {
            NormalizedError::bad_request("Not the owner of this purchase")
        }
        _ => None,
    }
}

fn validation_errors(failure: &Failure) -> Option<NormalizedError> {
    match failure {
        Failure::Rejected(Rejection::Body(_)) => {
            NormalizedError::bad_request("Malformed request body")
        }
        Failure::Rejected(Rejection::Query(_)) => {
            NormalizedError::bad_request("Malformed query string")
        }
        Failure::User(
            UserError::InvalidUserId(_) | UserError::InvalidEmail(_) | UserError::InvalidPassword(_),
        )
        | Failure::Category(
            CategoryError::InvalidCategoryId(_) | CategoryError::InvalidCategoryName(_),
        )
        | Failure::Product(
            ProductError::InvalidProductId(_)
            | ProductError::InvalidProductName(_)
            | ProductError::InvalidPrice(_)
            | ProductError::InvalidCategoryId(_),
        )
        | Failure::Purchase(
            PurchaseError::InvalidPurchaseId(_)
            | PurchaseError::InvalidProductId(_)
            | PurchaseError::InvalidQuantity(_)
            | PurchaseError::InvalidRating(_)
            | PurchaseError::TotalOverflow,
        ) => NormalizedError::bad_request(failure.to_string()),
        _ => None,
    }
}

/// Recover a precise message from a generic storage failure by looking at
/// the entity and column it was raised for.
fn constraint_violations(failure: &Failure) -> Option<NormalizedError> {
    match failure.repository_error()? {
        RepositoryError::UniqueViolation { field, .. } if field == "email" => {
            NormalizedError::bad_request("E-mail already in use")
        }
        RepositoryError::UniqueViolation {
            entity: Entity::Product,
            field,
        } if field == "name" || field == "url_name" => {
            NormalizedError::bad_request("Product name already in use")
        }
        RepositoryError::UniqueViolation {
            entity: Entity::Category,
            field,
        } if field == "name" => NormalizedError::bad_request("Category name already in use"),
        RepositoryError::ForeignKeyViolation {
            entity: Entity::Category,
            field,
        } if field == "category_id" => NormalizedError::bad_request("Category still has products"),
        RepositoryError::ForeignKeyViolation {
            entity: Entity::Product,
            field,
        } if field == "category_id" => NormalizedError::bad_request("Category does not exist"),
        RepositoryError::ForeignKeyViolation {
            entity: Entity::Purchase,
            field,
        } if field == "product_id" => NormalizedError::not_found(Entity::Product),
        RepositoryError::ForeignKeyViolation {
            entity: Entity::Purchase,
            field,
        } if field == "buyer_id" => NormalizedError::not_found(Entity::User),
        RepositoryError::RecordNotFound(entity) => NormalizedError::not_found(*entity),
        _ => None,
    }
}

impl From<Failure> for NormalizedError {
    fn from(failure: Failure) -> Self {
        normalize(failure).unwrap_or_else(|unrecognized| {
            tracing::error!(error = %unrecognized, "Unrecognized failure reached the HTTP boundary");
            NormalizedError::internal()
        })
    }
}

impl From<AuthError> for NormalizedError {
    fn from(err: AuthError) -> Self {
        Failure::from(err).into()
    }
}

impl From<UserError> for NormalizedError {
    fn from(err: UserError) -> Self {
        Failure::from(err).into()
    }
}

impl From<CategoryError> for NormalizedError {
    fn from(err: CategoryError) -> Self {
        Failure::from(err).into()
    }
}

impl From<ProductError> for NormalizedError {
    fn from(err: ProductError) -> Self {
        Failure::from(err).into()
    }
}

impl From<PurchaseError> for NormalizedError {
    fn from(err: PurchaseError) -> Self {
        Failure::from(err).into()
    }
}

impl From<Denial> for NormalizedError {
    fn from(denial: Denial) -> Self {
        Failure::from(denial).into()
    }
}

impl From<JsonRejection> for NormalizedError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Request body rejected");
        Failure::from(Rejection::from(rejection)).into()
    }
}

impl From<QueryRejection> for NormalizedError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Query string rejected");
        Failure::from(Rejection::from(rejection)).into()
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::json;
    use serde_json::Value;

    use super::*;
    use crate::domain::category::models::CategoryId;
    use crate::domain::purchase::models::PurchaseId;

    fn normalized(failure: impl Into<Failure>) -> NormalizedError {
        normalize(failure.into()).expect("failure should be recognized")
    }

    #[test]
    fn test_email_unique_violation_is_bad_request() {
        let err = UserError::Repository(RepositoryError::unique(Entity::User, "email"));

        assert_eq!(
            normalized(err),
            NormalizedError::new(ErrorKind::BadRequest, "E-mail already in use")
        );
    }

    #[test]
    fn test_product_name_and_url_name_collisions() {
        for field in ["name", "url_name"] {
            let err = ProductError::Repository(RepositoryError::unique(Entity::Product, field));
            assert_eq!(normalized(err).message, "Product name already in use");
        }
    }

    #[test]
    fn test_unmatched_constraint_propagates_unchanged() {
        let err = PurchaseError::Repository(RepositoryError::unique(Entity::Purchase, "id"));

        let unrecognized = normalize(err.into()).unwrap_err();
        assert!(matches!(
            unrecognized,
            Failure::Purchase(PurchaseError::Repository(RepositoryError::UniqueViolation { .. }))
        ));
    }

    #[test]
    fn test_unrecognized_failure_becomes_opaque_internal() {
        let err = UserError::Repository(RepositoryError::Database(
            "connection reset by peer".to_string(),
        ));

        let response: NormalizedError = err.into();
        assert_eq!(response.kind, ErrorKind::Internal);
        assert_eq!(response.message, "Internal server error");
    }

    #[test]
    fn test_token_errors_are_unauthorized() {
        for err in [
            JwtError::Expired,
            JwtError::NotYetValid,
            JwtError::InvalidSignature,
            JwtError::Malformed("bad base64".to_string()),
        ] {
            assert_eq!(
                normalized(err),
                NormalizedError::new(ErrorKind::Unauthorized, "Invalid authorization token")
            );
        }
    }

    #[test]
    fn test_token_issuance_failures_are_not_token_errors() {
        let err = JwtError::EncodingFailed("key rejected".to_string());
        assert!(normalize(err.into()).is_err());
    }

    #[test]
    fn test_guard_denials() {
        assert_eq!(normalized(Denial::MissingToken).kind, ErrorKind::Unauthorized);
        assert_eq!(
            normalized(Denial::InvalidToken(JwtError::Expired)).message,
            "Invalid authorization token"
        );
        assert_eq!(
            normalized(Denial::Forbidden),
            NormalizedError::new(ErrorKind::Forbidden, "Admin access required")
        );
    }

    #[test]
    fn test_business_rules() {
        assert_eq!(
            normalized(AuthError::InvalidCredentials),
            NormalizedError::new(ErrorKind::Unauthorized, "Invalid credentials")
        );
        assert_eq!(
            normalized(PurchaseError::NotOwner(PurchaseId::new())),
            NormalizedError::new(ErrorKind::BadRequest, "Not the owner of this purchase")
        );
        assert_eq!(
            normalized(ProductError::UnknownCategory(CategoryId::new())).message,
            "Category does not exist"
        );
        assert_eq!(
            normalized(CategoryError::NotFound(CategoryId::new())),
            NormalizedError::new(ErrorKind::NotFound, "Category not found")
        );
    }

    #[test]
    fn test_missing_record_maps_to_not_found() {
        let err = CategoryError::Repository(RepositoryError::RecordNotFound(Entity::Category));
        assert_eq!(normalized(err).kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_purchase_for_vanished_buyer_is_not_found() {
        let err =
            PurchaseError::Repository(RepositoryError::foreign_key(Entity::Purchase, "buyer_id"));

        assert_eq!(
            normalized(err),
            NormalizedError::new(ErrorKind::NotFound, "User not found")
        );
    }

    #[test]
    fn test_category_in_use_on_delete() {
        let err = CategoryError::Repository(RepositoryError::foreign_key(
            Entity::Category,
            "category_id",
        ));
        assert_eq!(normalized(err).message, "Category still has products");
    }

    #[test]
    fn test_validation_message_is_kept() {
        let err = UserError::from(
            crate::domain::user::models::EmailAddress::new("not-an-email").unwrap_err(),
        );

        let normalized = normalized(err);
        assert_eq!(normalized.kind, ErrorKind::BadRequest);
        assert!(normalized.message.starts_with("Invalid email"));
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let err = UserError::Repository(RepositoryError::unique(Entity::User, "email"));

        let response = NormalizedError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            json!({ "statusCode": 400, "message": "E-mail already in use" })
        );
    }
}
