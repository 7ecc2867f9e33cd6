use axum::{
    extract::{Path, State},
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{AppError, CategoryId, ProductId};
use crate::domains::catalog::actions;
use crate::domains::catalog::data::{CategoryData, ProductData};
use crate::server::app::AppState;
use crate::server::middleware::Identity;
use crate::server::routes::MessageResponse;

// ============================================================================
// Public catalog
// ============================================================================

/// GET /products — the storefront listing. No auth required.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductData>>, AppError> {
    let products = actions::list_products(&state.deps).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Category admin
// ============================================================================

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// POST /admin/categories
pub async fn add_category(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let category =
        actions::add_category(&request.name, &request.description, &state.deps).await?;
    Ok(Json(category.into()))
}

#[derive(Deserialize)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// PATCH /admin/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<CategoryId>,
    Json(request): Json<UpdateCategoryRequest>,
) -> Result<Json<CategoryData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let category = actions::update_category(
        id,
        request.name.as_deref(),
        request.description.as_deref(),
        &state.deps,
    )
    .await?;
    Ok(Json(category.into()))
}

/// DELETE /admin/categories/{name}
pub async fn delete_category(
    State(state): State<AppState>,
    identity: Identity,
    Path(name): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    actions::delete_category(&name, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Category deleted successfully".to_string(),
    }))
}

/// GET /admin/categories
pub async fn list_categories(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<CategoryData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let categories = actions::list_categories(&state.deps).await?;
    Ok(Json(categories.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Product admin
// ============================================================================

#[derive(Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub category_name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub stock: i32,
    pub image_url: Option<String>,
}

/// POST /admin/products
pub async fn add_product(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<CreateProductRequest>,
) -> Result<Json<ProductData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let product = actions::add_product(
        actions::NewProduct {
            name: &request.name,
            category_name: &request.category_name,
            description: &request.description,
            price: request.price,
            unit: &request.unit,
            stock: request.stock,
            image_url: request.image_url.as_deref(),
        },
        &state.deps,
    )
    .await?;
    Ok(Json(product.into()))
}

#[derive(Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub unit: Option<String>,
    pub category_name: Option<String>,
    pub image_url: Option<String>,
}

/// PATCH /admin/products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<ProductId>,
    Json(request): Json<UpdateProductRequest>,
) -> Result<Json<ProductData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let product = actions::update_product(
        id,
        actions::ProductChanges {
            name: request.name.as_deref(),
            description: request.description.as_deref(),
            price: request.price,
            unit: request.unit.as_deref(),
            category_name: request.category_name.as_deref(),
            image_url: request.image_url.as_deref(),
        },
        &state.deps,
    )
    .await?;
    Ok(Json(product.into()))
}

/// DELETE /admin/products/{id}
pub async fn delete_product(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    actions::delete_product(id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// GET /admin/products
pub async fn list_products_admin(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<ProductData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let products = actions::list_products(&state.deps).await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct UpdateStockRequest {
    pub product_name: String,
    pub new_stock: i32,
}

/// PUT /admin/products/stock — absolute stock overwrite.
pub async fn update_stock(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<UpdateStockRequest>,
) -> Result<Json<ProductData>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageCatalog)
        .check()?;

    let product = actions::update_stock(
        &request.product_name,
        request.new_stock,
        identity.user_id,
        &state.deps,
    )
    .await?;
    Ok(Json(product.into()))
}
