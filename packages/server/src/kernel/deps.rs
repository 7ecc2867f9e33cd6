//! Server dependencies for handlers (using traits for testability)
//!
//! This module provides the central dependency container constructed once at
//! process start and injected into every handler through the router state.
//! Nothing here is reachable as ambient module-level state.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use twilio::TwilioService;

use crate::domains::auth::JwtService;
use crate::kernel::OtpSender;

// =============================================================================
// OtpSender implementations
// =============================================================================

/// Delivers OTP codes as SMS through the Twilio Messages API.
pub struct TwilioOtpSender(pub Arc<TwilioService>);

impl TwilioOtpSender {
    pub fn new(service: Arc<TwilioService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl OtpSender for TwilioOtpSender {
    async fn send_code(&self, contact: &str, code: &str) -> Result<()> {
        let body = format!("Your Milkrun verification code is {code}. It expires in 5 minutes.");
        self.0
            .send_sms(contact, &body)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

/// Logs OTP codes instead of sending them. Default in development and tests.
pub struct ConsoleOtpSender;

#[async_trait]
impl OtpSender for ConsoleOtpSender {
    async fn send_code(&self, contact: &str, code: &str) -> Result<()> {
        tracing::info!(contact = %contact, code = %code, "OTP code (console delivery)");
        Ok(())
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers.
#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// JWT service for token creation and verification
    pub jwt_service: Arc<JwtService>,
    /// Out-of-band delivery channel for one-time codes
    pub otp_sender: Arc<dyn OtpSender>,
    /// Contacts provisioned as admins on first login
    pub admin_contacts: Vec<String>,
    /// Directory uploaded offer images are stored in and served from
    pub upload_dir: PathBuf,
}

impl ServerDeps {
    pub fn new(
        db_pool: PgPool,
        jwt_service: Arc<JwtService>,
        otp_sender: Arc<dyn OtpSender>,
        admin_contacts: Vec<String>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            db_pool,
            jwt_service,
            otp_sender,
            admin_contacts,
            upload_dir,
        }
    }

    /// Whether a contact is in the configured admin list.
    pub fn is_admin_contact(&self, contact: &str) -> bool {
        self.admin_contacts.iter().any(|c| c == contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_sender_always_succeeds() {
        let sender = ConsoleOtpSender;
        assert!(sender.send_code("+15550001111", "123456").await.is_ok());
    }
}
