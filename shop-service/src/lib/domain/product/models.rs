use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::category::models::CategoryId;
use crate::domain::product::errors::PriceError;
use crate::domain::product::errors::ProductIdError;
use crate::domain::product::errors::ProductNameError;

/// Product unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub Uuid);

impl ProductId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a product ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ProductIdError> {
        Uuid::parse_str(s)
            .map(ProductId)
            .map_err(|e| ProductIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ProductId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Product display name.
///
/// Trimmed, 1 to 100 characters, and must yield a non-empty [`UrlName`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    const MAX_LENGTH: usize = 100;

    pub fn new(name: &str) -> Result<Self, ProductNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            return Err(ProductNameError::Empty);
        }
        if length > Self::MAX_LENGTH {
            return Err(ProductNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !trimmed.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(ProductNameError::NoUrlCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL-safe slug of this name.
    pub fn url_name(&self) -> UrlName {
        UrlName::from_name(self)
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Slug used in product URLs: lowercase ASCII letters and digits, with
/// every other run of characters collapsed into a single `-`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UrlName(String);

impl UrlName {
    fn from_name(name: &ProductName) -> Self {
        let mut slug = String::with_capacity(name.as_str().len());
        let mut pending_dash = false;
        for c in name.as_str().chars() {
            if c.is_ascii_alphanumeric() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                pending_dash = false;
                slug.push(c.to_ascii_lowercase());
            } else {
                pending_dash = true;
            }
        }
        Self(slug)
    }

    /// Wrap an already stored or requested slug.
    pub fn from_raw(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UrlName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unit price in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(i64);

impl Price {
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        if cents < 0 {
            Err(PriceError::Negative(cents))
        } else {
            Ok(Self(cents))
        }
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    /// `self * quantity`, or `None` on overflow.
    pub fn times(&self, quantity: u32) -> Option<Price> {
        self.0.checked_mul(i64::from(quantity)).map(Price)
    }
}

#[derive(Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub url_name: UrlName,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CreateProductCommand {
    pub name: ProductName,
    pub description: String,
    pub price: Price,
    pub category_id: Option<CategoryId>,
}

/// Partial product update; `None` leaves a field unchanged.
#[derive(Debug, Default)]
pub struct UpdateProductCommand {
    pub name: Option<ProductName>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub category_id: Option<CategoryId>,
}
