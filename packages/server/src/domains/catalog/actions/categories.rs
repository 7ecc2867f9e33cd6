//! Category management actions

use tracing::info;

use crate::common::{AppError, CategoryId};
use crate::domains::catalog::models::Category;
use crate::kernel::ServerDeps;

/// Add a category. Names are unique.
pub async fn add_category(
    name: &str,
    description: &str,
    deps: &ServerDeps,
) -> Result<Category, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::InvalidArgument(
            "category name must not be empty".to_string(),
        ));
    }

    if Category::find_by_name(name, &deps.db_pool).await?.is_some() {
        return Err(AppError::Conflict("Category"));
    }

    let category = Category::create(name, description, &deps.db_pool).await?;
    info!(category_id = %category.id, name = %category.name, "Category added");

    Ok(category)
}

/// Partial update of a category.
pub async fn update_category(
    id: CategoryId,
    name: Option<&str>,
    description: Option<&str>,
    deps: &ServerDeps,
) -> Result<Category, AppError> {
    if Category::find_by_id(id, &deps.db_pool).await?.is_none() {
        return Err(AppError::NotFound("Category"));
    }

    if let Some(new_name) = name {
        if let Some(existing) = Category::find_by_name(new_name, &deps.db_pool).await? {
            if existing.id != id {
                return Err(AppError::Conflict("Category"));
            }
        }
    }

    Ok(Category::update(id, name, description, &deps.db_pool).await?)
}

/// Delete a category by name.
pub async fn delete_category(name: &str, deps: &ServerDeps) -> Result<(), AppError> {
    let removed = Category::delete_by_name(name, &deps.db_pool).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Category"));
    }

    info!(name = %name, "Category deleted");
    Ok(())
}

/// All categories. An empty store is an empty list, not an error.
pub async fn list_categories(deps: &ServerDeps) -> Result<Vec<Category>, AppError> {
    Ok(Category::find_all(&deps.db_pool).await?)
}
