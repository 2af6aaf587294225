use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::PurchaseError;
use super::models::CreatePurchaseCommand;
use super::models::Purchase;
use super::models::PurchaseId;
use super::models::Review;
use super::ports::PurchaseRepository;
use super::ports::PurchaseServicePort;
use crate::domain::auth::models::Actor;
use crate::domain::product::ports::ProductRepository;
use crate::domain::user::models::UserId;

/// Purchase service.
///
/// Prices a purchase from the catalog at creation time and enforces that
/// only the buyer (or an admin, for reads) can touch a purchase.
pub struct PurchaseService<PUR, PR>
where
    PUR: PurchaseRepository,
    PR: ProductRepository,
{
    purchase_repository: Arc<PUR>,
    product_repository: Arc<PR>,
}

impl<PUR, PR> PurchaseService<PUR, PR>
where
    PUR: PurchaseRepository,
    PR: ProductRepository,
{
    pub fn new(purchase_repository: Arc<PUR>, product_repository: Arc<PR>) -> Self {
        Self {
            purchase_repository,
            product_repository,
        }
    }

    async fn find(&self, id: &PurchaseId) -> Result<Purchase, PurchaseError> {
        self.purchase_repository
            .find_by_id(id)
            .await?
            .ok_or(PurchaseError::NotFound(*id))
    }
}

#[async_trait]
impl<PUR, PR> PurchaseServicePort for PurchaseService<PUR, PR>
where
    PUR: PurchaseRepository,
    PR: ProductRepository,
{
    async fn create_purchase(
        &self,
        buyer: UserId,
        command: CreatePurchaseCommand,
    ) -> Result<Purchase, PurchaseError> {
        let product = self
            .product_repository
            .find_by_id(&command.product_id)
            .await?
            .ok_or(PurchaseError::ProductNotFound(command.product_id))?;

        let total_price = product
            .price
            .times(command.quantity.get())
            .ok_or(PurchaseError::TotalOverflow)?;

        let purchase = Purchase {
            id: PurchaseId::new(),
            buyer_id: buyer,
            product_id: product.id,
            quantity: command.quantity,
            total_price,
            review: None,
            created_at: Utc::now(),
        };

        let created = self.purchase_repository.create(purchase).await?;
        tracing::info!(
            purchase_id = %created.id,
            buyer_id = %created.buyer_id,
            product_id = %created.product_id,
            total_cents = created.total_price.cents(),
            "Purchase recorded"
        );
        Ok(created)
    }

    async fn list_purchases_for(&self, buyer: &UserId) -> Result<Vec<Purchase>, PurchaseError> {
        Ok(self.purchase_repository.list_by_buyer(buyer).await?)
    }

    async fn list_all_purchases(&self) -> Result<Vec<Purchase>, PurchaseError> {
        Ok(self.purchase_repository.list_all().await?)
    }

    async fn get_purchase(
        &self,
        actor: &Actor,
        id: &PurchaseId,
    ) -> Result<Purchase, PurchaseError> {
        let purchase = self.find(id).await?;
        if purchase.buyer_id != actor.user_id && !actor.is_admin() {
            return Err(PurchaseError::NotOwner(*id));
        }
        Ok(purchase)
    }

    async fn review_purchase(
        &self,
        actor: &Actor,
        id: &PurchaseId,
        review: Review,
    ) -> Result<Purchase, PurchaseError> {
        let mut purchase = self.find(id).await?;
        if purchase.buyer_id != actor.user_id {
            return Err(PurchaseError::NotOwner(*id));
        }

        purchase.review = Some(review);
        Ok(self.purchase_repository.update(purchase).await?)
    }

    async fn delete_purchase(&self, id: &PurchaseId) -> Result<(), PurchaseError> {
        self.purchase_repository.delete(id).await?;
        tracing::info!(purchase_id = %id, "Purchase deleted");
        Ok(())
    }
}
