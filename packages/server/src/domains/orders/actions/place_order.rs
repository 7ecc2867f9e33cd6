//! Order placement.
//!
//! Stock check, decrement, and order insert run in one transaction; the
//! decrement itself is a single conditional UPDATE, so two concurrent orders
//! for the last unit cannot both succeed.

use rust_decimal::Decimal;
use tracing::info;

use crate::common::{AppError, UserId};
use crate::domains::catalog::models::{InventoryChange, InventoryLog, Product};
use crate::domains::orders::data::OrderReceipt;
use crate::domains::orders::models::{Order, OrderStatus};
use crate::kernel::ServerDeps;

pub async fn place_order(
    customer_id: UserId,
    product_name: &str,
    quantity: i32,
    deps: &ServerDeps,
) -> Result<OrderReceipt, AppError> {
    let (receipt, _) = place_order_with_status(
        customer_id,
        product_name,
        quantity,
        OrderStatus::Pending,
        deps,
    )
    .await?;

    Ok(receipt)
}

/// Shared placement path for plain orders and subscription orders. Returns
/// the receipt plus the open transaction's order id for callers that need to
/// link further rows to it.
pub(in crate::domains) async fn place_order_in_tx(
    customer_id: UserId,
    product_name: &str,
    quantity: i32,
    status: OrderStatus,
    tx: &mut sqlx::PgConnection,
) -> Result<(OrderReceipt, Order), AppError> {
    if quantity < 1 {
        return Err(AppError::InvalidArgument(
            "quantity must be at least 1".to_string(),
        ));
    }

    let product = Product::find_by_name(product_name, &mut *tx)
        .await?
        .filter(|p| p.active)
        .ok_or(AppError::NotFound("Product"))?;

    let updated = Product::decrement_stock(product.id, quantity, &mut *tx)
        .await?
        .ok_or(AppError::InsufficientStock)?;

    // Price is copied into the order at placement time.
    let total = product.price * Decimal::from(quantity);

    let order = Order::insert(customer_id, product.id, quantity, total, status, &mut *tx).await?;

    InventoryLog::record(
        product.id,
        InventoryChange::Sold,
        quantity,
        Some(customer_id),
        &mut *tx,
    )
    .await?;

    let receipt = OrderReceipt {
        order_id: order.id,
        product_name: updated.name.clone(),
        quantity,
        total_amount: total,
        remaining_stock: updated.stock,
        status,
    };

    Ok((receipt, order))
}

async fn place_order_with_status(
    customer_id: UserId,
    product_name: &str,
    quantity: i32,
    status: OrderStatus,
    deps: &ServerDeps,
) -> Result<(OrderReceipt, Order), AppError> {
    let mut tx = deps.db_pool.begin().await?;

    let placed = place_order_in_tx(customer_id, product_name, quantity, status, &mut tx).await?;

    tx.commit().await?;

    info!(
        order_id = %placed.1.id,
        customer_id = %customer_id,
        total = %placed.0.total_amount,
        remaining_stock = placed.0.remaining_stock,
        "Order placed"
    );

    Ok(placed)
}
