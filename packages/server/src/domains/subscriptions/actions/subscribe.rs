//! Subscription creation.
//!
//! Mirrors order placement but anchors a subscription row to the created
//! order. The duplicate check runs before any stock is touched, inside the
//! same transaction, so a rejected duplicate leaves no orphan order and no
//! stock decrement behind.

use chrono::NaiveDate;
use tracing::info;

use crate::common::{AppError, UserId};
use crate::domains::catalog::models::Product;
use crate::domains::orders::actions::place_order_in_tx;
use crate::domains::orders::models::OrderStatus;
use crate::domains::subscriptions::data::SubscriptionReceipt;
use crate::domains::subscriptions::models::Subscription;
use crate::kernel::ServerDeps;

pub async fn subscribe(
    customer_id: UserId,
    product_name: &str,
    quantity_per_cycle: i32,
    starts_on: NaiveDate,
    ends_on: NaiveDate,
    deps: &ServerDeps,
) -> Result<SubscriptionReceipt, AppError> {
    if quantity_per_cycle < 1 {
        return Err(AppError::InvalidArgument(
            "quantity per cycle must be at least 1".to_string(),
        ));
    }
    if ends_on < starts_on {
        return Err(AppError::InvalidArgument(
            "end date must not be before start date".to_string(),
        ));
    }

    let mut tx = deps.db_pool.begin().await?;

    let product = Product::find_by_name(product_name, &mut *tx)
        .await?
        .filter(|p| p.active)
        .ok_or(AppError::NotFound("Product"))?;

    // Duplicate check first: nothing below runs for an already-subscribed
    // (customer, product) pair.
    if Subscription::find_active(customer_id, product.id, &mut *tx)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Subscription"));
    }

    let (receipt, order) = place_order_in_tx(
        customer_id,
        product_name,
        quantity_per_cycle,
        OrderStatus::Subscribed,
        &mut tx,
    )
    .await?;

    let subscription = Subscription::insert(
        customer_id,
        order.id,
        product.id,
        quantity_per_cycle,
        starts_on,
        ends_on,
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        subscription_id = %subscription.id,
        order_id = %order.id,
        customer_id = %customer_id,
        "Subscription created"
    );

    Ok(SubscriptionReceipt {
        subscription: subscription.into(),
        order_id: order.id,
        total_amount: receipt.total_amount,
        remaining_stock: receipt.remaining_stock,
    })
}
