use async_trait::async_trait;

use crate::domain::category::models::CategoryId;
use crate::domain::errors::RepositoryError;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::CreateProductCommand;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::UpdateProductCommand;
use crate::domain::product::models::UrlName;

/// Port for product catalog operations.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Add a product to the catalog.
    ///
    /// # Errors
    /// * `NameInUse` - Name or derived url name already taken
    /// * `UnknownCategory` - Referenced category does not exist
    async fn create_product(&self, command: CreateProductCommand)
        -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFoundByUrlName` - No product has this url name
    async fn get_product_by_url_name(&self, url_name: &UrlName) -> Result<Product, ProductError>;

    /// List the catalog, optionally restricted to one category.
    async fn list_products(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `NameInUse` - New name collides with another product
    /// * `UnknownCategory` - New category does not exist
    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `Repository(RecordNotFound)` - Product does not exist
    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError>;
}

/// Persistence operations for product aggregate.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// # Errors
    /// * `UniqueViolation { field: "name" | "url_name" }`
    /// * `ForeignKeyViolation { field: "category_id" }`
    async fn create(&self, product: Product) -> Result<Product, RepositoryError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn find_by_url_name(&self, url_name: &UrlName)
        -> Result<Option<Product>, RepositoryError>;

    /// Products ordered by name, optionally filtered by category.
    async fn list(&self, category_id: Option<CategoryId>)
        -> Result<Vec<Product>, RepositoryError>;

    async fn update(&self, product: Product) -> Result<Product, RepositoryError>;

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
}
