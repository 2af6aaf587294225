use thiserror::Error;

use crate::domain::category::errors::CategoryIdError;
use crate::domain::category::models::CategoryId;
use crate::domain::errors::RepositoryError;
use crate::domain::product::models::ProductId;

/// Error type for ProductId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for ProductName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProductNameError {
    #[error("Product name is empty")]
    Empty,

    #[error("Product name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Product name must contain at least one letter or digit")]
    NoUrlCharacters,
}

/// Error type for Price validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price cannot be negative: {0}")]
    Negative(i64),
}

/// Top-level error type for all product-related operations
#[derive(Debug, Clone, Error)]
pub enum ProductError {
    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid product name: {0}")]
    InvalidProductName(#[from] ProductNameError),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),

    #[error("Invalid category ID: {0}")]
    InvalidCategoryId(#[from] CategoryIdError),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Product not found with url name: {0}")]
    NotFoundByUrlName(String),

    #[error("Product name already in use: {0}")]
    NameInUse(String),

    #[error("Category does not exist: {0}")]
    UnknownCategory(CategoryId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
