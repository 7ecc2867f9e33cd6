use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{OrderId, ProductId, UserId};

/// Order lifecycle states. Closed set; transitions are direct writes, except
/// `Delivered` which archives the row (see the actions layer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    OutForDelivery,
    Delivered,
    Cancelled,
    Subscribed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::OutForDelivery => "out_for_delivery",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Subscribed => "subscribed",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ();

    /// Case-insensitive; accepts both "out for delivery" and
    /// "out_for_delivery".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(' ', "_").as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "out_for_delivery" => Ok(OrderStatus::OutForDelivery),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "subscribed" => Ok(OrderStatus::Subscribed),
            _ => Err(()),
        }
    }
}

/// Payment state, tracked alongside the order but not driven by any payment
/// integration here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "payment_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// Order model - SQL persistence layer
///
/// `total_amount` is the price at placement time multiplied by quantity;
/// later price changes do not rewrite past orders.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: UserId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Insert a new order. Runs on any executor so placement can stay inside
    /// its transaction.
    pub async fn insert(
        customer_id: UserId,
        product_id: ProductId,
        quantity: i32,
        total_amount: Decimal,
        status: OrderStatus,
        executor: impl PgExecutor<'_>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO orders (customer_id, product_id, quantity, total_amount, status)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING *",
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .bind(total_amount)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: OrderId, executor: impl PgExecutor<'_>) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// A customer's active orders, optionally narrowed to one category name.
    pub async fn find_by_customer(
        customer_id: UserId,
        category: Option<&str>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT o.*
             FROM orders o
             JOIN products p ON p.id = o.product_id
             JOIN categories c ON c.id = p.category_id
             WHERE o.customer_id = $1
               AND ($2::text IS NULL OR c.name = $2)
             ORDER BY o.created_at DESC",
        )
        .bind(customer_id)
        .bind(category)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All active orders, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM orders ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn set_status(
        id: OrderId,
        status: OrderStatus,
        executor: impl PgExecutor<'_>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Delete an order owned by a specific customer. Returns rows removed.
    pub async fn delete_for_customer(
        id: OrderId,
        customer_id: UserId,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1 AND customer_id = $2")
            .bind(id)
            .bind(customer_id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Delete any order (admin). Returns rows removed.
    pub async fn delete(id: OrderId, executor: impl PgExecutor<'_>) -> Result<u64> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parses_closed_set_only() {
        assert_eq!("pending".parse::<OrderStatus>(), Ok(OrderStatus::Pending));
        assert_eq!("Delivered".parse::<OrderStatus>(), Ok(OrderStatus::Delivered));
        assert_eq!(
            "Out for Delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            "out_for_delivery".parse::<OrderStatus>(),
            Ok(OrderStatus::OutForDelivery)
        );
        assert_eq!("SUBSCRIBED".parse::<OrderStatus>(), Ok(OrderStatus::Subscribed));
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_status_display_roundtrip() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::OutForDelivery,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Subscribed,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }
    }
}
