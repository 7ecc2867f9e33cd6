use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::OfferId;

/// Promotional offer: an uploaded image plus a caption.
#[derive(sqlx::FromRow, Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    pub filename: String,
    pub caption: String,
    /// Public path the stored image is served from.
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl Offer {
    pub async fn insert(
        filename: &str,
        caption: &str,
        url: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO offers (filename, caption, url)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(filename)
        .bind(caption)
        .bind(url)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// All offers, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM offers ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }
}
