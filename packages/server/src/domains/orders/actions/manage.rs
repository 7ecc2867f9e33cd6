//! Order listing, status transitions, and deletion.

use tracing::info;

use crate::common::{AppError, OrderId, Role, UserId};
use crate::domains::orders::models::{Order, OrderHistory, OrderStatus};
use crate::kernel::ServerDeps;

/// Update an order's status.
///
/// Customers may only touch their own orders; admins may touch any. A
/// transition to `delivered` moves the row into the archive (copy + delete,
/// one transaction) — delivered orders disappear from the active store.
pub async fn update_order_status(
    caller_id: UserId,
    caller_role: Role,
    order_id: OrderId,
    new_status: &str,
    deps: &ServerDeps,
) -> Result<OrderStatus, AppError> {
    let status: OrderStatus = new_status.parse().map_err(|_| {
        AppError::InvalidArgument(format!("invalid order status '{new_status}'"))
    })?;

    let mut tx = deps.db_pool.begin().await?;

    let order = Order::find_by_id(order_id, &mut *tx)
        .await?
        .filter(|o| caller_role.is_admin() || o.customer_id == caller_id)
        .ok_or(AppError::NotFound("Order"))?;

    if status == OrderStatus::Delivered {
        OrderHistory::archive(&order, &mut *tx).await?;
        Order::delete(order.id, &mut *tx).await?;
    } else {
        Order::set_status(order.id, status, &mut *tx).await?;
    }

    tx.commit().await?;

    info!(order_id = %order_id, status = %status, "Order status updated");
    Ok(status)
}

/// A customer's own orders, optionally filtered by category name. Empty
/// result is an empty list.
pub async fn list_my_orders(
    customer_id: UserId,
    category: Option<&str>,
    deps: &ServerDeps,
) -> Result<Vec<Order>, AppError> {
    Ok(Order::find_by_customer(customer_id, category, &deps.db_pool).await?)
}

/// Delete one of the caller's own orders.
pub async fn delete_my_order(
    customer_id: UserId,
    order_id: OrderId,
    deps: &ServerDeps,
) -> Result<(), AppError> {
    let removed = Order::delete_for_customer(order_id, customer_id, &deps.db_pool).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Order"));
    }

    info!(order_id = %order_id, "Order deleted by customer");
    Ok(())
}

/// All active orders (admin listing).
pub async fn list_all_orders(deps: &ServerDeps) -> Result<Vec<Order>, AppError> {
    Ok(Order::find_all(&deps.db_pool).await?)
}

/// Delete any order (admin).
pub async fn delete_order(order_id: OrderId, deps: &ServerDeps) -> Result<(), AppError> {
    let removed = Order::delete(order_id, &deps.db_pool).await?;
    if removed == 0 {
        return Err(AppError::NotFound("Order"));
    }

    info!(order_id = %order_id, "Order deleted by admin");
    Ok(())
}

/// The delivered-order archive (admin listing).
pub async fn list_order_history(deps: &ServerDeps) -> Result<Vec<OrderHistory>, AppError> {
    Ok(OrderHistory::find_all(&deps.db_pool).await?)
}
