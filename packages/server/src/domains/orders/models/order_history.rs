use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use crate::common::{OrderId, ProductId, UserId};
use crate::domains::orders::models::{Order, OrderStatus, PaymentStatus};

/// Archived order. Rows land here when an order is delivered and are never
/// moved back; the id is the original order id.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct OrderHistory {
    pub id: OrderId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub delivered_at: DateTime<Utc>,
}

impl OrderHistory {
    /// Copy an order into the archive with status marked delivered.
    pub async fn archive(order: &Order, executor: impl PgExecutor<'_>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO order_history
                 (id, customer_id, product_id, quantity, total_amount, status,
                  payment_status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(order.id)
        .bind(order.customer_id)
        .bind(order.product_id)
        .bind(order.quantity)
        .bind(order.total_amount)
        .bind(OrderStatus::Delivered)
        .bind(order.payment_status)
        .bind(order.created_at)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: OrderId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM order_history WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All archived orders, most recently delivered first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM order_history ORDER BY delivered_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
