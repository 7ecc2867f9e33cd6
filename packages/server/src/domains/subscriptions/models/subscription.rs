use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{OrderId, ProductId, SubscriptionId, UserId};

/// Subscription lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "subscription_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Cancelled,
}

/// Subscription model - SQL persistence layer
///
/// Every subscription is anchored to the order that created it. A partial
/// unique index keeps (customer, product) to at most one active row.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub customer_id: UserId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity_per_cycle: i32,
    pub starts_on: NaiveDate,
    pub ends_on: NaiveDate,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    /// The active subscription for (customer, product), if one exists. Takes
    /// any executor so the duplicate check can run inside the subscribe
    /// transaction before any stock is touched.
    pub async fn find_active(
        customer_id: UserId,
        product_id: ProductId,
        executor: impl PgExecutor<'_>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM subscriptions
             WHERE customer_id = $1 AND product_id = $2 AND status = 'active'",
        )
        .bind(customer_id)
        .bind(product_id)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn insert(
        customer_id: UserId,
        order_id: OrderId,
        product_id: ProductId,
        quantity_per_cycle: i32,
        starts_on: NaiveDate,
        ends_on: NaiveDate,
        executor: impl PgExecutor<'_>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO subscriptions
                 (customer_id, order_id, product_id, quantity_per_cycle, starts_on, ends_on)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING *",
        )
        .bind(customer_id)
        .bind(order_id)
        .bind(product_id)
        .bind(quantity_per_cycle)
        .bind(starts_on)
        .bind(ends_on)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// A customer's subscriptions, newest first
    pub async fn find_by_customer(customer_id: UserId, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM subscriptions WHERE customer_id = $1 ORDER BY created_at DESC",
        )
        .bind(customer_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// All subscriptions, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM subscriptions ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Cancel one of a customer's active subscriptions. Returns rows changed.
    pub async fn cancel_for_customer(
        id: SubscriptionId,
        customer_id: UserId,
        pool: &PgPool,
    ) -> Result<u64> {
        let result = sqlx::query(
            "UPDATE subscriptions
             SET status = 'cancelled', updated_at = now()
             WHERE id = $1 AND customer_id = $2 AND status = 'active'",
        )
        .bind(id)
        .bind(customer_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}
