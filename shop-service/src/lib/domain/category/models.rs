use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::category::errors::CategoryIdError;
use crate::domain::category::errors::CategoryNameError;

/// Category unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategoryId(pub Uuid);

impl CategoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a category ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, CategoryIdError> {
        Uuid::parse_str(s)
            .map(CategoryId)
            .map_err(|e| CategoryIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Category display name, trimmed, 1 to 50 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    const MAX_LENGTH: usize = 50;

    pub fn new(name: &str) -> Result<Self, CategoryNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();
        if length == 0 {
            Err(CategoryNameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(CategoryNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: CategoryName,
    pub created_at: DateTime<Utc>,
}
