//! Product management actions

use rust_decimal::Decimal;
use tracing::info;

use crate::common::{AppError, ProductId, UserId};
use crate::domains::catalog::models::{Category, InventoryChange, InventoryLog, Product};
use crate::kernel::ServerDeps;

pub struct NewProduct<'a> {
    pub name: &'a str,
    pub category_name: &'a str,
    pub description: &'a str,
    pub price: Decimal,
    pub unit: &'a str,
    pub stock: i32,
    pub image_url: Option<&'a str>,
}

pub struct ProductChanges<'a> {
    pub name: Option<&'a str>,
    pub description: Option<&'a str>,
    pub price: Option<Decimal>,
    pub unit: Option<&'a str>,
    pub category_name: Option<&'a str>,
    pub image_url: Option<&'a str>,
}

/// Add a product under an existing category. Product names are unique.
pub async fn add_product(new: NewProduct<'_>, deps: &ServerDeps) -> Result<Product, AppError> {
    if new.price < Decimal::ZERO || new.stock < 0 {
        return Err(AppError::InvalidArgument(
            "price and stock must not be negative".to_string(),
        ));
    }

    let category = Category::find_by_name(new.category_name, &deps.db_pool)
        .await?
        .ok_or(AppError::NotFound("Category"))?;

    if Product::find_by_name(new.name, &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Product"));
    }

    let product = Product::create(
        new.name,
        new.description,
        new.price,
        new.unit,
        new.stock,
        category.id,
        new.image_url,
        &deps.db_pool,
    )
    .await?;

    info!(product_id = %product.id, name = %product.name, stock = product.stock, "Product added");
    Ok(product)
}

/// Partial update of a product.
pub async fn update_product(
    id: ProductId,
    changes: ProductChanges<'_>,
    deps: &ServerDeps,
) -> Result<Product, AppError> {
    if Product::find_by_id(id, &deps.db_pool).await?.is_none() {
        return Err(AppError::NotFound("Product"));
    }

    if let Some(new_name) = changes.name {
        if let Some(existing) = Product::find_by_name(new_name, &deps.db_pool).await? {
            if existing.id != id {
                return Err(AppError::Conflict("Product"));
            }
        }
    }

    let category_id = match changes.category_name {
        Some(category_name) => Some(
            Category::find_by_name(category_name, &deps.db_pool)
                .await?
                .ok_or(AppError::NotFound("Category"))?
                .id,
        ),
        None => None,
    };

    Ok(Product::update(
        id,
        changes.name,
        changes.description,
        changes.price,
        changes.unit,
        category_id,
        changes.image_url,
        &deps.db_pool,
    )
    .await?)
}

/// Overwrite a product's stock with an absolute value and log the movement.
pub async fn update_stock(
    product_name: &str,
    new_stock: i32,
    recorded_by: UserId,
    deps: &ServerDeps,
) -> Result<Product, AppError> {
    if new_stock < 0 {
        return Err(AppError::InvalidArgument(
            "stock must not be negative".to_string(),
        ));
    }

    let mut tx = deps.db_pool.begin().await?;

    let product = Product::find_by_name(product_name, &mut *tx)
        .await?
        .ok_or(AppError::NotFound("Product"))?;

    let updated = Product::set_stock(product.id, new_stock, &mut *tx).await?;

    // Audit the difference rather than the absolute value.
    let delta = new_stock - product.stock;
    if delta != 0 {
        let change = if delta > 0 {
            InventoryChange::Added
        } else {
            InventoryChange::Removed
        };
        InventoryLog::record(product.id, change, delta.abs(), Some(recorded_by), &mut *tx).await?;
    }

    tx.commit().await?;

    info!(
        product_id = %updated.id,
        stock = updated.stock,
        "Stock overwritten"
    );
    Ok(updated)
}

/// Delete a product by id.
pub async fn delete_product(id: ProductId, deps: &ServerDeps) -> Result<(), AppError> {
    let removed = Product::delete(id, &deps.db_pool).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Product"));
    }

    info!(product_id = %id, "Product deleted");
    Ok(())
}

/// All products. An empty store is an empty list, not an error.
pub async fn list_products(deps: &ServerDeps) -> Result<Vec<Product>, AppError> {
    Ok(Product::find_all(&deps.db_pool).await?)
}
