use thiserror::Error;

use crate::domain::errors::RepositoryError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::models::ProductId;
use crate::domain::purchase::models::PurchaseId;

/// Error type for PurchaseId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PurchaseIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error type for Quantity validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Quantity out of range: expected {min} to {max}, got {actual}")]
    OutOfRange { min: u32, max: u32, actual: i64 },
}

/// Error type for Rating validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RatingError {
    #[error("Rating out of range: expected 1 to 5, got {0}")]
    OutOfRange(i64),
}

/// Top-level error type for all purchase-related operations
#[derive(Debug, Clone, Error)]
pub enum PurchaseError {
    #[error("Invalid purchase ID: {0}")]
    InvalidPurchaseId(#[from] PurchaseIdError),

    #[error("Invalid product ID: {0}")]
    InvalidProductId(#[from] ProductIdError),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(#[from] QuantityError),

    #[error("Invalid rating: {0}")]
    InvalidRating(#[from] RatingError),

    #[error("Order total is too large")]
    TotalOverflow,

    #[error("Purchase not found: {0}")]
    NotFound(PurchaseId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Not the owner of purchase {0}")]
    NotOwner(PurchaseId),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
