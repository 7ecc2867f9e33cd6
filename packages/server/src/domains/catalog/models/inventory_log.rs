use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;

use crate::common::entity_ids::Id;
use crate::common::{ProductId, UserId};

/// Why a product's stock changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "inventory_change", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InventoryChange {
    Added,
    Removed,
    Sold,
    Returned,
}

pub struct InventoryLogEntity;

pub type InventoryLogId = Id<InventoryLogEntity>;

/// Append-only audit trail of stock movements.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct InventoryLog {
    pub id: InventoryLogId,
    pub product_id: ProductId,
    pub change_type: InventoryChange,
    pub quantity: i32,
    pub recorded_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
}

impl InventoryLog {
    /// Record a stock movement. Runs on any executor so order placement can
    /// log inside its transaction.
    pub async fn record(
        product_id: ProductId,
        change_type: InventoryChange,
        quantity: i32,
        recorded_by: Option<UserId>,
        executor: impl PgExecutor<'_>,
    ) -> Result<()> {
        sqlx::query(
            "INSERT INTO inventory_logs (product_id, change_type, quantity, recorded_by)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(product_id)
        .bind(change_type)
        .bind(quantity)
        .bind(recorded_by)
        .execute(executor)
        .await?;

        Ok(())
    }
}
