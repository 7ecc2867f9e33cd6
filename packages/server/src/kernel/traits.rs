// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. The OTP code
// itself is generated and validated by the auth domain; senders only move
// the code out-of-band.

use anyhow::Result;
use async_trait::async_trait;

// =============================================================================
// OTP delivery trait (Infrastructure - SMS / console)
// =============================================================================

#[async_trait]
pub trait OtpSender: Send + Sync {
    /// Deliver a one-time code to a contact (phone number or email).
    async fn send_code(&self, contact: &str, code: &str) -> Result<()>;
}
