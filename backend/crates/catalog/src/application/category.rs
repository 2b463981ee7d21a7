//! Category Use Cases

use std::sync::Arc;

use kernel::id::CategoryId;
use platform::validation;

use crate::application::config::description_or_placeholder;
use crate::domain::entity::{Category, CategorySummary, NewCategory};
use crate::domain::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};

// ============================================================================
// Add
// ============================================================================

pub struct AddCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub parent_id: Option<i32>,
}

pub struct AddCategoryOutput {
    pub category_id: CategoryId,
    /// Stored (lower-cased) name
    pub name: String,
}

/// Add category use case
///
/// Names are compared and stored lower-cased. The parent is not pre-checked:
/// the foreign key and the self-parent CHECK decide.
pub struct AddCategoryUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> AddCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: AddCategoryInput) -> CatalogResult<AddCategoryOutput> {
        let name = input
            .name
            .filter(|n| validation::is_non_empty_string(n))
            .ok_or_else(|| {
                CatalogError::InvalidInput("Category name must not be empty.".to_string())
            })?
            .to_lowercase();

        if self.repo.exists_by_name(&name).await? {
            return Err(CatalogError::Conflict(format!(
                "Category \"{name}\" already exists."
            )));
        }

        let category_id = self
            .repo
            .create(&NewCategory {
                name: name.clone(),
                description: description_or_placeholder(input.description),
                parent_id: input.parent_id.map(CategoryId::new),
            })
            .await?;

        tracing::info!(category_id = %category_id, name = %name, "Category created");

        Ok(AddCategoryOutput { category_id, name })
    }
}

// ============================================================================
// List
// ============================================================================

pub struct ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> ListCategoriesUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Category>> {
        self.repo.list().await
    }

    pub async fn summaries(&self) -> CatalogResult<Vec<CategorySummary>> {
        self.repo.list_summaries().await
    }
}

// ============================================================================
// Delete
// ============================================================================

/// Delete category use case; children go with the parent
pub struct DeleteCategoryUseCase<R>
where
    R: CategoryRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteCategoryUseCase<R>
where
    R: CategoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: Option<i32>) -> CatalogResult<()> {
        let id = id
            .map(CategoryId::new)
            .filter(CategoryId::is_positive)
            .ok_or_else(|| {
                CatalogError::InvalidInput("A valid category id is required.".to_string())
            })?;

        if !self.repo.delete(id).await? {
            return Err(CatalogError::NotFound(format!("Category {id} not found.")));
        }

        tracing::info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
