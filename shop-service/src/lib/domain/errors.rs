use std::fmt;

use thiserror::Error;

/// Aggregate a persistence failure was raised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    User,
    Category,
    Product,
    Purchase,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::User => "user",
            Entity::Category => "category",
            Entity::Product => "product",
            Entity::Purchase => "purchase",
        };
        f.write_str(name)
    }
}

/// Storage-agnostic failure reported by repository adapters.
///
/// Constraint violations carry the entity being written and the column the
/// constraint guards, so callers can recover a precise message from them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Unique constraint violated on {entity}.{field}")]
    UniqueViolation { entity: Entity, field: String },

    #[error("Foreign key constraint violated on {entity}.{field}")]
    ForeignKeyViolation { entity: Entity, field: String },

    #[error("{0} record not found")]
    RecordNotFound(Entity),

    #[error("Database error: {0}")]
    Database(String),
}

impl RepositoryError {
    pub fn unique(entity: Entity, field: impl Into<String>) -> Self {
        Self::UniqueViolation {
            entity,
            field: field.into(),
        }
    }

    pub fn foreign_key(entity: Entity, field: impl Into<String>) -> Self {
        Self::ForeignKeyViolation {
            entity,
            field: field.into(),
        }
    }
}
