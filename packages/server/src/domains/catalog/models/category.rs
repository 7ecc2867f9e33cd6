use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::CategoryId;

/// Category model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub async fn find_by_id(id: CategoryId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// All categories, oldest first (stable listing order)
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM categories ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(name: &str, description: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO categories (name, description)
             VALUES ($1, $2)
             RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Partial update; absent fields keep their current value.
    pub async fn update(
        id: CategoryId,
        name: Option<&str>,
        description: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE categories
             SET name = COALESCE($2, name),
                 description = COALESCE($3, description),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete by name. Returns the number of rows removed.
    pub async fn delete_by_name(name: &str, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE name = $1")
            .bind(name)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
