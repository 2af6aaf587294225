use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::purchase::errors::PurchaseIdError;
use crate::domain::purchase::errors::QuantityError;
use crate::domain::purchase::errors::RatingError;
use crate::domain::user::models::UserId;

/// Purchase unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PurchaseId(pub Uuid);

impl PurchaseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PurchaseIdError> {
        Uuid::parse_str(s)
            .map(PurchaseId)
            .map_err(|e| PurchaseIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PurchaseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PurchaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Number of units bought in one purchase, 1 to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    const MIN: u32 = 1;
    const MAX: u32 = 100;

    pub fn new(quantity: i64) -> Result<Self, QuantityError> {
        if quantity < i64::from(Self::MIN) || quantity > i64::from(Self::MAX) {
            return Err(QuantityError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: quantity,
            });
        }
        Ok(Self(quantity as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// Review score from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub fn new(rating: i64) -> Result<Self, RatingError> {
        match rating {
            1..=5 => Ok(Self(rating as u8)),
            other => Err(RatingError::OutOfRange(other)),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }
}

/// Buyer's review attached to a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub rating: Rating,
    pub comment: Option<String>,
}

/// Record of a user buying a product.
#[derive(Debug, Clone)]
pub struct Purchase {
    pub id: PurchaseId,
    pub buyer_id: UserId,
    pub product_id: ProductId,
    pub quantity: Quantity,
    pub total_price: Price,
    pub review: Option<Review>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CreatePurchaseCommand {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(Quantity::new(0).is_err());
        assert_eq!(Quantity::new(1).unwrap().get(), 1);
        assert_eq!(Quantity::new(100).unwrap().get(), 100);
        assert!(Quantity::new(101).is_err());
        assert!(Quantity::new(-5).is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::new(0), Err(RatingError::OutOfRange(0)));
        assert_eq!(Rating::new(5).unwrap().get(), 5);
        assert_eq!(Rating::new(6), Err(RatingError::OutOfRange(6)));
    }
}
