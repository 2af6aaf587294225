use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiSuccess;
use super::Json;
use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::ports::CategoryServicePort;
use crate::inbound::http::errors::NormalizedError;
use crate::inbound::http::router::AppState;

pub async fn create_category(
    State(state): State<AppState>,
    Json(body): Json<CategoryRequest>,
) -> Result<ApiSuccess<CategoryResponseData>, NormalizedError> {
    let name = CategoryName::new(&body.name).map_err(CategoryError::from)?;
    let category = state.category_service.create_category(name).await?;
    Ok(ApiSuccess::new(StatusCode::CREATED, (&category).into()))
}

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<CategoryResponseData>>, NormalizedError> {
    let categories = state.category_service.list_categories().await?;
    Ok(ApiSuccess::ok(categories.iter().map(Into::into).collect()))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<ApiSuccess<CategoryResponseData>, NormalizedError> {
    let id = parse_id(&category_id)?;
    let category = state.category_service.get_category(&id).await?;
    Ok(ApiSuccess::ok((&category).into()))
}

pub async fn rename_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
    Json(body): Json<CategoryRequest>,
) -> Result<ApiSuccess<CategoryResponseData>, NormalizedError> {
    let id = parse_id(&category_id)?;
    let name = CategoryName::new(&body.name).map_err(CategoryError::from)?;
    let category = state.category_service.rename_category(&id, name).await?;
    Ok(ApiSuccess::ok((&category).into()))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<StatusCode, NormalizedError> {
    let id = parse_id(&category_id)?;
    state.category_service.delete_category(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<CategoryId, CategoryError> {
    Ok(CategoryId::from_string(raw)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRequest {
    name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseData {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Category> for CategoryResponseData {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.as_str().to_string(),
            created_at: category.created_at,
        }
    }
}
