use async_trait::async_trait;

use crate::domain::auth::models::Actor;
use crate::domain::errors::RepositoryError;
use crate::domain::purchase::errors::PurchaseError;
use crate::domain::purchase::models::CreatePurchaseCommand;
use crate::domain::purchase::models::Purchase;
use crate::domain::purchase::models::PurchaseId;
use crate::domain::purchase::models::Review;
use crate::domain::user::models::UserId;

/// Port for purchase record operations.
#[async_trait]
pub trait PurchaseServicePort: Send + Sync + 'static {
    /// Record a purchase for `buyer`, pricing it from the current catalog.
    ///
    /// # Errors
    /// * `ProductNotFound` - Product does not exist
    /// * `TotalOverflow` - Price times quantity does not fit
    async fn create_purchase(
        &self,
        buyer: UserId,
        command: CreatePurchaseCommand,
    ) -> Result<Purchase, PurchaseError>;

    /// Purchases made by `buyer`, newest first.
    async fn list_purchases_for(&self, buyer: &UserId) -> Result<Vec<Purchase>, PurchaseError>;

    /// Every purchase, newest first.
    async fn list_all_purchases(&self) -> Result<Vec<Purchase>, PurchaseError>;

    /// Fetch a purchase visible to `actor` (its buyer or an admin).
    ///
    /// # Errors
    /// * `NotFound` - Purchase does not exist
    /// * `NotOwner` - Actor is neither the buyer nor an admin
    async fn get_purchase(&self, actor: &Actor, id: &PurchaseId)
        -> Result<Purchase, PurchaseError>;

    /// Attach or replace the buyer's review.
    ///
    /// # Errors
    /// * `NotFound` - Purchase does not exist
    /// * `NotOwner` - Actor did not make this purchase
    async fn review_purchase(
        &self,
        actor: &Actor,
        id: &PurchaseId,
        review: Review,
    ) -> Result<Purchase, PurchaseError>;

    /// # Errors
    /// * `Repository(RecordNotFound)` - Purchase does not exist
    async fn delete_purchase(&self, id: &PurchaseId) -> Result<(), PurchaseError>;
}

/// Persistence operations for purchase records.
#[async_trait]
pub trait PurchaseRepository: Send + Sync + 'static {
    /// # Errors
    /// * `ForeignKeyViolation { field: "product_id" | "buyer_id" }`
    async fn create(&self, purchase: Purchase) -> Result<Purchase, RepositoryError>;

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, RepositoryError>;

    async fn list_by_buyer(&self, buyer: &UserId) -> Result<Vec<Purchase>, RepositoryError>;

    async fn list_all(&self) -> Result<Vec<Purchase>, RepositoryError>;

    async fn update(&self, purchase: Purchase) -> Result<Purchase, RepositoryError>;

    async fn delete(&self, id: &PurchaseId) -> Result<(), RepositoryError>;
}
