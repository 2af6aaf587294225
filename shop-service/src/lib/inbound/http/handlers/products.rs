use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Json;
use super::Query;
use crate::domain::category::models::CategoryId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::models::UrlName;
use crate::domain::product::ports::ProductServicePort;
use crate::inbound::http::errors::NormalizedError;
use crate::inbound::http::router::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, NormalizedError> {
    let product = state
        .product_service
        .create_product(body.try_into_command()?)
        .await?;

    Ok(ApiSuccess::new(StatusCode::CREATED, (&product).into()))
}

pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<ApiSuccess<Vec<ProductResponseData>>, NormalizedError> {
    let category_id = query
        .category_id
        .as_deref()
        .map(CategoryId::from_string)
        .transpose()
        .map_err(ProductError::from)?;

    let products = state.product_service.list_products(category_id).await?;
    Ok(ApiSuccess::ok(products.iter().map(Into::into).collect()))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<ApiSuccess<ProductResponseData>, NormalizedError> {
    let id = ProductId::from_string(&product_id).map_err(ProductError::from)?;
    let product = state.product_service.get_product(&id).await?;
    Ok(ApiSuccess::ok((&product).into()))
}

pub async fn get_product_by_url_name(
    State(state): State<AppState>,
    Path(url_name): Path<String>,
) -> Result<ApiSuccess<ProductResponseData>, NormalizedError> {
    let product = state
        .product_service
        .get_product_by_url_name(&UrlName::from_raw(&url_name))
        .await?;
    Ok(ApiSuccess::ok((&product).into()))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<ApiSuccess<ProductResponseData>, NormalizedError> {
    let id = ProductId::from_string(&product_id).map_err(ProductError::from)?;
    let product = state
        .product_service
        .update_product(&id, body.try_into_command()?)
        .await?;
    Ok(ApiSuccess::ok((&product).into()))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode, NormalizedError> {
    let id = ProductId::from_string(&product_id).map_err(ProductError::from)?;
    state.product_service.delete_product(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
    category_id: Option<String>,
}

/// HTTP request body for adding a product (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    name: String,
    #[serde(default)]
    description: String,
    price_cents: i64,
    category_id: Option<String>,
}

impl CreateProductRequest {
    fn try_into_command(self) -> Result<CreateProductCommand, ProductError> {
        Ok(CreateProductCommand {
            name: ProductName::new(&self.name)?,
            description: self.description,
            price: Price::from_cents(self.price_cents)?,
            category_id: self
                .category_id
                .as_deref()
                .map(CategoryId::from_string)
                .transpose()?,
        })
    }
}

/// HTTP request body for a partial product update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    name: Option<String>,
    description: Option<String>,
    price_cents: Option<i64>,
    category_id: Option<String>,
}

impl UpdateProductRequest {
    fn try_into_command(self) -> Result<UpdateProductCommand, ProductError> {
        Ok(UpdateProductCommand {
            name: self.name.as_deref().map(ProductName::new).transpose()?,
            description: self.description,
            price: self.price_cents.map(Price::from_cents).transpose()?,
            category_id: self
                .category_id
                .as_deref()
                .map(CategoryId::from_string)
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponseData {
    pub id: String,
    pub name: String,
    pub url_name: String,
    pub description: String,
    pub price_cents: i64,
    pub category_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Product> for ProductResponseData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.as_str().to_string(),
            url_name: product.url_name.as_str().to_string(),
            description: product.description.clone(),
            price_cents: product.price.cents(),
            category_id: product.category_id.map(|id| id.to_string()),
            created_at: product.created_at,
        }
    }
}
