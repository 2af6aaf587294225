use thiserror::Error;

use crate::domain::category::models::CategoryId;
use crate::domain::errors::RepositoryError;

/// Error type for CategoryId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for CategoryName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CategoryNameError {
    #[error("Category name is empty")]
    Empty,

    #[error("Category name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error type for all category-related operations
#[derive(Debug, Clone, Error)]
pub enum CategoryError {
    #[error("Invalid category ID: {0}")]
    InvalidCategoryId(#[from] CategoryIdError),

    #[error("Invalid category name: {0}")]
    InvalidCategoryName(#[from] CategoryNameError),

    #[error("Category not found: {0}")]
    NotFound(CategoryId),

    #[error("Category name already in use: {0}")]
    NameInUse(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
