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
use crate::domain::product::models::ProductId;
use crate::domain::purchase::errors::PurchaseError;
use crate::domain::purchase::models::CreatePurchaseCommand;
use crate::domain::purchase::models::Purchase;
use crate::domain::purchase::models::PurchaseId;
use crate::domain::purchase::models::Quantity;
use crate::domain::purchase::models::Rating;
use crate::domain::purchase::models::Review;
use crate::domain::purchase::ports::PurchaseServicePort;
use crate::inbound::http::errors::NormalizedError;
use crate::inbound::http::router::AppState;

pub async fn create_purchase(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(body): Json<CreatePurchaseRequest>,
) -> Result<ApiSuccess<PurchaseResponseData>, NormalizedError> {
    let purchase = state
        .purchase_service
        .create_purchase(actor.user_id, body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&purchase).into()))
}

pub async fn list_my_purchases(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> Result<ApiSuccess<Vec<PurchaseResponseData>>, NormalizedError> {
    let purchases = state
        .purchase_service
        .list_purchases_for(&actor.user_id)
        .await?;
    Ok(ApiSuccess::ok(purchases.iter().map(Into::into).collect()))
}

pub async fn list_purchases(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PurchaseResponseData>>, NormalizedError> {
    let purchases = state.purchase_service.list_all_purchases().await?;
    Ok(ApiSuccess::ok(purchases.iter().map(Into::into).collect()))
}

pub async fn get_purchase(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(purchase_id): Path<String>,
) -> Result<ApiSuccess<PurchaseResponseData>, NormalizedError> {
    let id = parse_id(&purchase_id)?;
    let purchase = state.purchase_service.get_purchase(&actor, &id).await?;
    Ok(ApiSuccess::ok((&purchase).into()))
}

pub async fn review_purchase(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(purchase_id): Path<String>,
    Json(body): Json<ReviewRequest>,
) -> Result<ApiSuccess<PurchaseResponseData>, NormalizedError> {
    let id = parse_id(&purchase_id)?;
    let purchase = state
        .purchase_service
        .review_purchase(&actor, &id, body.try_into_review()?)
        .await?;
    Ok(ApiSuccess::ok((&purchase).into()))
}

pub async fn delete_purchase(
    State(state): State<AppState>,
    Path(purchase_id): Path<String>,
) -> Result<StatusCode, NormalizedError> {
    let id = parse_id(&purchase_id)?;
    state.purchase_service.delete_purchase(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<PurchaseId, PurchaseError> {
    Ok(PurchaseId::from_string(raw)?)
}

/// HTTP request body for buying a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    product_id: String,
    quantity: i64,
}

impl CreatePurchaseRequest {
    fn try_into_command(self) -> Result<CreatePurchaseCommand, PurchaseError> {
        Ok(CreatePurchaseCommand {
            product_id: ProductId::from_string(&self.product_id)?,
            quantity: Quantity::new(self.quantity)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReviewRequest {
    rating: i64,
    comment: Option<String>,
}

impl ReviewRequest {
    fn try_into_review(self) -> Result<Review, PurchaseError> {
        Ok(Review {
            rating: Rating::new(self.rating)?,
            comment: self.comment,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewData {
    pub rating: u8,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponseData {
    pub id: String,
    pub buyer_id: String,
    pub product_id: String,
    pub quantity: u32,
    pub total_price_cents: i64,
    pub review: Option<ReviewData>,
    pub created_at: DateTime<Utc>,
}

impl From<&Purchase> for PurchaseResponseData {
    fn from(purchase: &Purchase) -> Self {
        Self {
            id: purchase.id.to_string(),
            buyer_id: purchase.buyer_id.to_string(),
            product_id: purchase.product_id.to_string(),
            quantity: purchase.quantity.get(),
            total_price_cents: purchase.total_price.cents(),
            review: purchase.review.as_ref().map(|review| ReviewData {
                rating: review.rating.get(),
                comment: review.comment.clone(),
            }),
            created_at: purchase.created_at,
        }
    }
}
