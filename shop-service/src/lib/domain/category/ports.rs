use async_trait::async_trait;

use crate::domain::category::errors::CategoryError;
use crate::domain::category::models::Category;
use crate::domain::category::models::CategoryId;
use crate::domain::category::models::CategoryName;
use crate::domain::errors::RepositoryError;

/// Port for category domain service operations.
#[async_trait]
pub trait CategoryServicePort: Send + Sync + 'static {
    /// Create a category.
    ///
    /// # Errors
    /// * `NameInUse` - Another category has this name
    async fn create_category(&self, name: CategoryName) -> Result<Category, CategoryError>;

    /// # Errors
    /// * `NotFound` - Category does not exist
    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError>;

    async fn list_categories(&self) -> Result<Vec<Category>, CategoryError>;

    /// # Errors
    /// * `NotFound` - Category does not exist
    /// * `NameInUse` - Another category has this name
    async fn rename_category(
        &self,
        id: &CategoryId,
        name: CategoryName,
    ) -> Result<Category, CategoryError>;

    /// # Errors
    /// * `Repository(RecordNotFound)` - Category does not exist
    /// * `Repository(ForeignKeyViolation)` - Products still reference it
    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError>;
}

/// Persistence operations for category aggregate.
#[async_trait]
pub trait CategoryRepository: Send + Sync + 'static {
    async fn create(&self, category: Category) -> Result<Category, RepositoryError>;

    async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError>;

    async fn find_by_name(&self, name: &CategoryName)
        -> Result<Option<Category>, RepositoryError>;

    /// All categories ordered by name.
    async fn list_all(&self) -> Result<Vec<Category>, RepositoryError>;

    async fn update(&self, category: Category) -> Result<Category, RepositoryError>;

    async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError>;
}
