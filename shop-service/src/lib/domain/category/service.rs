use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use super::errors::CategoryError;
use super::models::Category;
use super::models::CategoryId;
use super::models::CategoryName;
use super::ports::CategoryRepository;
use super::ports::CategoryServicePort;

/// Concrete implementation of CategoryServicePort.
pub struct CategoryService<CR>
where
    CR: CategoryRepository,
{
    category_repository: Arc<CR>,
}

impl<CR> CategoryService<CR>
where
    CR: CategoryRepository,
{
    pub fn new(category_repository: Arc<CR>) -> Self {
        Self {
            category_repository,
        }
    }

    async fn ensure_name_free(
        &self,
        name: &CategoryName,
        owner: Option<CategoryId>,
    ) -> Result<(), CategoryError> {
        match self.category_repository.find_by_name(name).await? {
            Some(existing) if Some(existing.id) != owner => {
                Err(CategoryError::NameInUse(name.to_string()))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl<CR> CategoryServicePort for CategoryService<CR>
where
    CR: CategoryRepository,
{
    async fn create_category(&self, name: CategoryName) -> Result<Category, CategoryError> {
        self.ensure_name_free(&name, None).await?;

        let category = Category {
            id: CategoryId::new(),
            name,
            created_at: Utc::now(),
        };

        Ok(self.category_repository.create(category).await?)
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Category, CategoryError> {
        self.category_repository
            .find_by_id(id)
            .await?
            .ok_or(CategoryError::NotFound(*id))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, CategoryError> {
        Ok(self.category_repository.list_all().await?)
    }

    async fn rename_category(
        &self,
        id: &CategoryId,
        name: CategoryName,
    ) -> Result<Category, CategoryError> {
        let mut category = self.get_category(id).await?;
        self.ensure_name_free(&name, Some(category.id)).await?;

        category.name = name;
        Ok(self.category_repository.update(category).await?)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), CategoryError> {
        self.category_repository.delete(id).await?;
        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
