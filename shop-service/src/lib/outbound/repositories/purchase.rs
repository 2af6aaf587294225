use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::errors::corrupt_row;
use super::errors::map_sqlx_error;
use crate::domain::errors::Entity;
use crate::domain::errors::RepositoryError;
use crate::domain::product::models::Price;
use crate::domain::product::models::ProductId;
use crate::domain::purchase::models::Purchase;
use crate::domain::purchase::models::PurchaseId;
use crate::domain::purchase::models::Quantity;
use crate::domain::purchase::models::Rating;
use crate::domain::purchase::models::Review;
use crate::domain::purchase::ports::PurchaseRepository;
use crate::domain::user::models::UserId;

pub struct PostgresPurchaseRepository {
    pool: PgPool,
}

impl PostgresPurchaseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PurchaseRow {
    id: Uuid,
    buyer_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    total_price_cents: i64,
    review_rating: Option<i16>,
    review_comment: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = RepositoryError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let corrupt = |e: &dyn std::fmt::Display| corrupt_row(Entity::Purchase, e);

        let review = match row.review_rating {
            Some(rating) => Some(Review {
                rating: Rating::new(i64::from(rating)).map_err(|e| corrupt(&e))?,
                comment: row.review_comment,
            }),
            None => None,
        };

        Ok(Purchase {
            id: PurchaseId(row.id),
            buyer_id: UserId(row.buyer_id),
            product_id: ProductId(row.product_id),
            quantity: Quantity::new(i64::from(row.quantity)).map_err(|e| corrupt(&e))?,
            total_price: Price::from_cents(row.total_price_cents).map_err(|e| corrupt(&e))?,
            review,
            created_at: row.created_at,
        })
    }
}

fn db_error(err: sqlx::Error) -> RepositoryError {
    map_sqlx_error(err, Entity::Purchase)
}

#[async_trait]
impl PurchaseRepository for PostgresPurchaseRepository {
    async fn create(&self, purchase: Purchase) -> Result<Purchase, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO purchases (id, buyer_id, product_id, quantity, total_price_cents,
                                   review_rating, review_comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(purchase.id.0)
        .bind(purchase.buyer_id.0)
        .bind(purchase.product_id.0)
        .bind(purchase.quantity.get() as i32)
        .bind(purchase.total_price.cents())
        .bind(purchase.review.as_ref().map(|r| i16::from(r.rating.get())))
        .bind(purchase.review.as_ref().and_then(|r| r.comment.clone()))
        .bind(purchase.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(purchase)
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, RepositoryError> {
        sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, buyer_id, product_id, quantity, total_price_cents,
                   review_rating, review_comment, created_at
            FROM purchases
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?
        .map(Purchase::try_from)
        .transpose()
    }

    async fn list_by_buyer(&self, buyer: &UserId) -> Result<Vec<Purchase>, RepositoryError> {
        sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, buyer_id, product_id, quantity, total_price_cents,
                   review_rating, review_comment, created_at
            FROM purchases
            WHERE buyer_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(buyer.0)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Purchase::try_from)
        .collect()
    }

    async fn list_all(&self) -> Result<Vec<Purchase>, RepositoryError> {
        sqlx::query_as::<_, PurchaseRow>(
            r#"
            SELECT id, buyer_id, product_id, quantity, total_price_cents,
                   review_rating, review_comment, created_at
            FROM purchases
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?
        .into_iter()
        .map(Purchase::try_from)
        .collect()
    }

    async fn update(&self, purchase: Purchase) -> Result<Purchase, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE purchases
            SET quantity = $2, total_price_cents = $3, review_rating = $4, review_comment = $5
            WHERE id = $1
            "#,
        )
        .bind(purchase.id.0)
        .bind(purchase.quantity.get() as i32)
        .bind(purchase.total_price.cents())
        .bind(purchase.review.as_ref().map(|r| i16::from(r.rating.get())))
        .bind(purchase.review.as_ref().and_then(|r| r.comment.clone()))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Purchase));
        }

        Ok(purchase)
    }

    async fn delete(&self, id: &PurchaseId) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM purchases
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::RecordNotFound(Entity::Purchase));
        }

        Ok(())
    }
}
