use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::corrupt_row;
use super::errors::map_sqlx_error;
use crate::domain::category::models::CategoryId;
use crate::domain::errors::Entity;
use crate::domain::errors::RepositoryError;
use crate::domain::product::models::Price;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductName;
use crate::domain::product::models::UrlName;
use crate::domain::product::ports::ProductRepository;

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    url_name: String,
    description: String,
    price_cents: i64,
    category_id: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Product {
            id: ProductId(row.id),
            name: ProductName::new(&row.name).map_err(|e| corrupt_row(Entity::Product, e))?,
            url_name: UrlName::from_raw(&row.url_name),
            description: row.description,
            price: Price::from_cents(row.price_cents)
                .map_err(|e| corrupt_row(Entity::Product, e))?,
            category_id: row.category_id.map(CategoryId),
            created_at: row.created_at,
        })
    }
}

fn db_error(err: sqlx::Error) -> RepositoryError {
    map_sqlx_error(err, Entity::Product)
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: Product) -> Result<Product, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, url_name, description, price_cents, category_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.url_name.as_str())
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.category_id.map(|id| id.0))
        .bind(product.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(product)
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, url_name, description, price_cents, category_id, created_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Product::try_from)
        .transpose()
    }

    async fn find_by_url_name(
        &self,
        url_name: &UrlName,
    ) -> Result<Option<Product>, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, url_name, description, price_cents, category_id, created_at
            FROM products
            WHERE url_name = $1
            "#,
        )
        .bind(url_name.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Product::try_from)
        .transpose()
    }

    async fn list(&self, category_id: Option<CategoryId>) -> Result<Vec<Product>, RepositoryError> {
        sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, url_name, description, price_cents, category_id, created_at
            FROM products
            WHERE $1::uuid IS NULL OR category_id = $1
            ORDER BY name
            "#,
        )
        .bind(category_id.map(|id| id.0))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Product::try_from)
        .collect()
    }

    async fn update(&self, product: Product) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, url_name = $3, description = $4, price_cents = $5, category_id = $6
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(product.name.as_str())
        .bind(product.url_name.as_str())
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.category_id.map(|id| id.0))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Product));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Product));
        }

        Ok(())
    }
}
