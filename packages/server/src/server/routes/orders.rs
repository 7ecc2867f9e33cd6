use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::common::auth::{Actor, AdminCapability};
use crate::common::{AppError, OrderId};
use crate::domains::orders::actions;
use crate::domains::orders::data::{OrderData, OrderHistoryData, OrderReceipt};
use crate::server::app::AppState;
use crate::server::middleware::Identity;
use crate::server::routes::MessageResponse;

// ============================================================================
// Customer orders
// ============================================================================

#[derive(Deserialize)]
pub struct PlaceOrderRequest {
    pub product_name: String,
    pub quantity: i32,
}

/// POST /my-orders — place an order against live stock.
pub async fn place_order(
    State(state): State<AppState>,
    identity: Identity,
    Json(request): Json<PlaceOrderRequest>,
) -> Result<Json<OrderReceipt>, AppError> {
    let receipt = actions::place_order(
        identity.user_id,
        &request.product_name,
        request.quantity,
        &state.deps,
    )
    .await?;

    Ok(Json(receipt))
}

#[derive(Deserialize)]
pub struct OrdersQuery {
    pub category: Option<String>,
}

/// GET /my-orders — the caller's active orders, optionally filtered by
/// category name.
pub async fn list_my_orders(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<OrdersQuery>,
) -> Result<Json<Vec<OrderData>>, AppError> {
    let orders =
        actions::list_my_orders(identity.user_id, query.category.as_deref(), &state.deps).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /my-orders/{id}/status — move an order through its lifecycle.
/// "delivered" archives the order.
pub async fn update_order_status(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let status = actions::update_order_status(
        identity.user_id,
        identity.role,
        id,
        &request.status,
        &state.deps,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: format!("Order status updated to '{status}' successfully"),
    }))
}

/// DELETE /my-orders/{id}
pub async fn delete_my_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
) -> Result<Json<MessageResponse>, AppError> {
    actions::delete_my_order(identity.user_id, id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: "Order deleted successfully".to_string(),
    }))
}

// ============================================================================
// Admin orders
// ============================================================================

/// GET /admin/orders
pub async fn list_all_orders(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<OrderData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageOrders)
        .check()?;

    let orders = actions::list_all_orders(&state.deps).await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// GET /admin/orders/history — the delivered-order archive.
pub async fn list_order_history(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<OrderHistoryData>>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageOrders)
        .check()?;

    let entries = actions::list_order_history(&state.deps).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// DELETE /admin/orders/{id}
pub async fn delete_order(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<OrderId>,
) -> Result<Json<MessageResponse>, AppError> {
    Actor::new(identity.user_id, identity.role)
        .can(AdminCapability::ManageOrders)
        .check()?;

    actions::delete_order(id, &state.deps).await?;
    Ok(Json(MessageResponse {
        message: format!("Order '{id}' deleted successfully"),
    }))
}
