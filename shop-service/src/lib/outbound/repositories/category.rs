use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::corrupt_row;
use super::errors::map_sqlx_error;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::category::ports::CategoryRepository;
use crate::domain::errors::Entity;
use crate::domain::errors::RepositoryError;

pub struct PostgresCategoryRepository {
    pool: PgPool,
}

impl PostgresCategoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CategoryRow> for Category {
    type Error = RepositoryError;

    fn try_from(row: CategoryRow) -> Result<Self, Self::Error> {
        Ok(Category {
            id: CategoryId(row.id),
            name: CategoryName::new(&row.name).map_err(|e| corrupt_row(Entity::Category, e))?,
            created_at: row.created_at,
        })
    }
}

fn db_error(err: sqlx::Error) -> RepositoryError {
    map_sqlx_error(err, Entity::Category)
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn create(&self, category: Category) -> Result<Category, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, created_at)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(category.id.0)
        .bind(category.name.as_str())
        .bind(category.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(category)
    }

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Category::try_from)
        .transpose()
    }

    async fn find_by_name(&self, name: &CategoryName) -> Result<Option<Category>, RepositoryError> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            WHERE name = $1
            "#,
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Category::try_from)
        .transpose()
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError> {
        sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, created_at
            FROM categories
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Category::try_from)
        .collect()
    }

    async fn update(&self, category: Category) -> Result<Category, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE categories
            SET name = $2
            WHERE id = $1
            "#,
        )
        .bind(category.id.0)
        .bind(category.name.as_str())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Category));
        }

        Ok(category)
    }

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM categories
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Category));
        }

        Ok(())
    }
}
