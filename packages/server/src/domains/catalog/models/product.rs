use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgExecutor, PgPool};

use crate::common::{CategoryId, ProductId};

/// Product model - SQL persistence layer
///
/// `stock` only ever changes through an absolute admin overwrite or the
/// conditional decrement below; the CHECK constraint backs the non-negative
/// invariant at the store level.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub unit: String,
    pub stock: i32,
    pub category_id: CategoryId,
    pub image_url: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub async fn find_by_id(id: ProductId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find product by name. Takes any executor so it can run inside the
    /// order transaction.
    pub async fn find_by_name(
        name: &str,
        executor: impl PgExecutor<'_>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products WHERE name = $1")
            .bind(name)
            .fetch_optional(executor)
            .await
            .map_err(Into::into)
    }

    /// All products, oldest first (stable listing order)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM products ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        name: &str,
        description: &str,
        price: Decimal,
        unit: &str,
        stock: i32,
        category_id: CategoryId,
        image_url: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO products (name, description, price, unit, stock, category_id, image_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(unit)
        .bind(stock)
        .bind(category_id)
        .bind(image_url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Partial update; absent fields keep their current value.
    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        id: ProductId,
        name: Option<&str>,
        description: Option<&str>,
        price: Option<Decimal>,
        unit: Option<&str>,
        category_id: Option<CategoryId>,
        image_url: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE products
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 price = COALESCE($4, price),
                 unit = COALESCE($5, unit),
                 category_id = COALESCE($6, category_id),
                 image_url = COALESCE($7, image_url),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(unit)
        .bind(category_id)
        .bind(image_url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Overwrite the absolute stock value (not a delta).
    pub async fn set_stock(
        id: ProductId,
        new_stock: i32,
        executor: impl PgExecutor<'_>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE products SET stock = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_stock)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Atomically decrement stock if enough remains.
    ///
    /// Check and write are one statement, so concurrent orders against the
    /// same product cannot both pass the check and oversell. Returns the
    /// updated product, or None when stock was insufficient (row untouched).
    pub async fn decrement_stock(
        id: ProductId,
        quantity: i32,
        executor: impl PgExecutor<'_>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE products
             SET stock = stock - $2, updated_at = now()
             WHERE id = $1
               AND stock >= $2
             RETURNING *",
        )
        .bind(id)
        .bind(quantity)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// Delete by id. Returns the number of rows removed.
    pub async fn delete(id: ProductId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
