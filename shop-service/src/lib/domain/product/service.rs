use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::ProductError;
use super::models::CreateProductCommand;
use super::models::Product;
use super::models::ProductId;
use super::models::ProductName;
use super::models::UpdateProductCommand;
use super::models::UrlName;
use super::ports::ProductRepository;
use super::ports::ProductServicePort;
use crate::domain::category::models::CategoryId;
use crate::domain::category::ports::CategoryRepository;

/// Catalog service. Generic over both repositories for testability.
pub struct ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    product_repository: Arc<PR>,
    category_repository: Arc<CR>,
}

impl<PR, CR> ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    pub fn new(product_repository: Arc<PR>, category_repository: Arc<CR>) -> Self {
        Self {
            product_repository,
            category_repository,
        }
    }

    async fn ensure_category_exists(&self, id: CategoryId) -> Result<(), ProductError> {
        match self.category_repository.find_by_id(&id).await? {
            Some(_) => Ok(()),
            None => Err(ProductError::UnknownCategory(id)),
        }
    }

    /// Two names that slug to the same url name collide.
    async fn ensure_name_free(
        &self,
        name: &ProductName,
        owner: Option<ProductId>,
    ) -> Result<UrlName, ProductError> {
        let url_name = name.url_name();
        match self.product_repository.find_by_url_name(&url_name).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(ProductError::NameInUse(name.to_string()))
            }
            _ => Ok(url_name),
        }
    }
}

#[async_trait]
impl<PR, CR> ProductServicePort for ProductService<PR, CR>
where
    PR: ProductRepository,
    CR: CategoryRepository,
{
    async fn create_product(
        &self,
        command: CreateProductCommand,
    ) -> Result<Product, ProductError> {
        if let Some(category_id) = command.category_id {
            self.ensure_category_exists(category_id).await?;
        }
        let url_name = self.ensure_name_free(&command.name, None).await?;

        let product = Product {
            id: ProductId::new(),
            name: command.name,
            url_name,
            description: command.description,
            price: command.price,
            category_id: command.category_id,
            created_at: Utc::now(),
        };

        let created = self.product_repository.create(product).await?;
        tracing::info!(product_id = %created.id, url_name = %created.url_name, "Product created");
        Ok(created)
    }

    async fn get_product(&self, id: &ProductId) -> Result<Product, ProductError> {
        self.product_repository
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(*id))
    }

    async fn get_product_by_url_name(&self, url_name: &UrlName) -> Result<Product, ProductError> {
        self.product_repository
            .find_by_url_name(url_name)
            .await?
            .ok_or_else(|| ProductError::NotFoundByUrlName(url_name.to_string()))
    }

    async fn list_products(
        &self,
        category_id: Option<CategoryId>,
    ) -> Result<Vec<Product>, ProductError> {
        Ok(self.product_repository.list(category_id).await?)
    }

    async fn update_product(
        &self,
        id: &ProductId,
        command: UpdateProductCommand,
    ) -> Result<Product, ProductError> {
        let mut product = self.get_product(id).await?;

        if let Some(name) = command.name {
            product.url_name = self.ensure_name_free(&name, Some(product.id)).await?;
            product.name = name;
        }

        if let Some(description) = command.description {
            product.description = description;
        }

        if let Some(price) = command.price {
            product.price = price;
        }

        if let Some(category_id) = command.category_id {
            self.ensure_category_exists(category_id).await?;
            product.category_id = Some(category_id);
        }

        Ok(self.product_repository.update(product).await?)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ProductError> {
        self.product_repository.delete(id).await?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::category::models::Category;
    use crate::domain::category::models::CategoryName;
    use crate::domain::errors::RepositoryError;
    use crate::domain::product::models::Price;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: Product) -> Result<Product, RepositoryError>;
            async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError>;
            async fn find_by_url_name(&self, url_name: &UrlName) -> Result<Option<Product>, RepositoryError>;
            async fn list(&self, category_id: Option<CategoryId>) -> Result<Vec<Product>, RepositoryError>;
            async fn update(&self, product: Product) -> Result<Product, RepositoryError>;
            async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;
        }
    }

    mock! {
        pub TestCategoryRepository {}

        #[async_trait]
        impl CategoryRepository for TestCategoryRepository {
            async fn create(&self, category: Category) -> Result<Category, RepositoryError>;
            async fn find_by_id(&self, id: &CategoryId) -> Result<Option<Category>, RepositoryError>;
            async fn find_by_name(&self, name: &CategoryName) -> Result<Option<Category>, RepositoryError>;
            async fn list_all(&self) -> Result<Vec<Category>, RepositoryError>;
            async fn update(&self, category: Category) -> Result<Category, RepositoryError>;
            async fn delete(&self, id: &CategoryId) -> Result<(), RepositoryError>;
        }
    }

    fn product(name: &str) -> Product {
        let name = ProductName::new(name).unwrap();
        Product {
            id: ProductId::new(),
            url_name: name.url_name(),
            name,
            description: "A product".to_string(),
            price: Price::from_cents(1000).unwrap(),
            category_id: None,
            created_at: Utc::now(),
        }
    }

    fn command(name: &str, category_id: Option<CategoryId>) -> CreateProductCommand {
        CreateProductCommand {
            name: ProductName::new(name).unwrap(),
            description: "Lightweight trainers".to_string(),
            price: Price::from_cents(4999).unwrap(),
            category_id,
        }
    }

    #[tokio::test]
    async fn test_create_product_derives_url_name() {
        let mut products = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();

        products
            .expect_find_by_url_name()
            .withf(|url| url.as_str() == "running-shoes")
            .times(1)
            .returning(|_| Ok(None));
        products
            .expect_create()
            .withf(|p| p.url_name.as_str() == "running-shoes" && p.price.cents() == 4999)
            .times(1)
            .returning(|p| Ok(p));

        let service = ProductService::new(Arc::new(products), Arc::new(categories));

        let created = service
            .create_product(command("Running Shoes", None))
            .await
            .unwrap();
        assert_eq!(created.name.as_str(), "Running Shoes");
    }

    #[tokio::test]
    async fn test_create_product_name_in_use() {
        let mut products = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();

        products
            .expect_find_by_url_name()
            .times(1)
            .returning(|_| Ok(Some(product("running shoes"))));
        products.expect_create().times(0);

        let service = ProductService::new(Arc::new(products), Arc::new(categories));

        let result = service.create_product(command("Running Shoes", None)).await;
        assert!(matches!(result, Err(ProductError::NameInUse(_))));
    }

    #[tokio::test]
    async fn test_create_product_unknown_category() {
        let mut products = MockTestProductRepository::new();
        let mut categories = MockTestCategoryRepository::new();

        categories
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        products.expect_create().times(0);

        let service = ProductService::new(Arc::new(products), Arc::new(categories));

        let result = service
            .create_product(command("Running Shoes", Some(CategoryId::new())))
            .await;
        assert!(matches!(result, Err(ProductError::UnknownCategory(_))));
    }

    #[tokio::test]
    async fn test_update_product_renames_and_reslugs() {
        let mut products = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();

        let existing = product("Old Name");
        let id = existing.id;
        products
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        products
            .expect_find_by_url_name()
            .times(1)
            .returning(|_| Ok(None));
        products
            .expect_update()
            .withf(|p| p.url_name.as_str() == "new-name" && p.price.cents() == 250)
            .times(1)
            .returning(|p| Ok(p));

        let service = ProductService::new(Arc::new(products), Arc::new(categories));

        let command = UpdateProductCommand {
            name: Some(ProductName::new("New Name").unwrap()),
            price: Some(Price::from_cents(250).unwrap()),
            ..Default::default()
        };
        let updated = service.update_product(&id, command).await.unwrap();
        assert_eq!(updated.name.as_str(), "New Name");
    }

    #[tokio::test]
    async fn test_get_product_by_url_name_not_found() {
        let mut products = MockTestProductRepository::new();
        let categories = MockTestCategoryRepository::new();

        products
            .expect_find_by_url_name()
            .times(1)
            .returning(|_| Ok(None));

        let service = ProductService::new(Arc::new(products), Arc::new(categories));

        let result = service
            .get_product_by_url_name(&UrlName::from_raw("missing"))
            .await;
        assert!(matches!(result, Err(ProductError::NotFoundByUrlName(_))));
    }
}
