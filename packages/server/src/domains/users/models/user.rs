use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{Role, UserId};

/// User model - SQL persistence layer
///
/// One row per identity regardless of role. The contact column (phone or
/// email) is unique; the OTP columns hold at most one outstanding code.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub contact: String,
    pub name: String,
    pub role: Role,

    // Outstanding one-time code, if any
    pub otp_code: Option<String>,
    pub otp_expires_at: Option<DateTime<Utc>>,
    pub verified: bool,

    pub address: Option<String>,
    pub active: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Find user by id
    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find user by contact (phone or email)
    pub async fn find_by_contact(contact: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE contact = $1")
            .bind(contact)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a new user
    pub async fn create(contact: &str, name: &str, role: Role, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "INSERT INTO users (contact, name, role)
             VALUES ($1, $2, $3)
             RETURNING *",
        )
        .bind(contact)
        .bind(name)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Store a freshly issued one-time code on the user row
    pub async fn store_otp(
        id: UserId,
        code: &str,
        expires_at: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<()> {
        sqlx::query(
            "UPDATE users
             SET otp_code = $2, otp_expires_at = $3, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .bind(code)
        .bind(expires_at)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Consume the outstanding code and mark the user verified.
    ///
    /// One statement, so a successful verification can never leave the code
    /// behind for replay.
    pub async fn consume_otp_and_verify(id: UserId, pool: &PgPool) -> Result<()> {
        sqlx::query(
            "UPDATE users
             SET otp_code = NULL, otp_expires_at = NULL, verified = true, updated_at = now()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// All users, newest first
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Users holding a given role
    pub async fn find_by_role(role: Role, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM users WHERE role = $1 ORDER BY created_at DESC",
        )
        .bind(role)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Update profile fields that were provided; untouched fields keep their
    /// current value.
    pub async fn update_profile(
        id: UserId,
        name: Option<&str>,
        address: Option<&str>,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE users
             SET name = COALESCE($2, name),
                 address = COALESCE($3, address),
                 updated_at = now()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(address)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}
