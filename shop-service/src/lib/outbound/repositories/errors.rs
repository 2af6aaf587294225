use crate::domain::errors::Entity;
use crate::domain::errors::RepositoryError;

const TABLES: [&str; 4] = ["users", "categories", "products", "purchases"];

/// Translate a sqlx failure into a storage-agnostic repository error.
///
/// Constraint violations keep the column named by the violated constraint,
/// following PostgreSQL's default `<table>_<column>_key` and
/// `<table>_<column>_fkey` naming.
pub fn map_sqlx_error(err: sqlx::Error, entity: Entity) -> RepositoryError {
    if let sqlx::Error::RowNotFound = err {
        return RepositoryError::RecordNotFound(entity);
    }

    if let Some(db_err) = err.as_database_error() {
        let field = db_err
            .constraint()
            .and_then(constraint_field)
            .unwrap_or("unknown");

        if db_err.is_unique_violation() {
            return RepositoryError::unique(entity, field);
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::foreign_key(entity, field);
        }
    }

    RepositoryError::Database(err.to_string())
}

/// Stored row that no longer satisfies the domain rules.
pub fn corrupt_row(entity: Entity, detail: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Database(format!("Corrupt {} row: {}", entity, detail))
}

fn constraint_field(constraint: &str) -> Option<&str> {
    let stem = constraint
        .strip_suffix("_fkey")
        .or_else(|| constraint.strip_suffix("_pkey"))
        .or_else(|| constraint.strip_suffix("_key"))?;

    let table = TABLES.iter().find(|table| stem.starts_with(*table))?;
    match &stem[table.len()..] {
        "" => Some("id"),
        rest => rest.strip_prefix('_'),
    }
}
