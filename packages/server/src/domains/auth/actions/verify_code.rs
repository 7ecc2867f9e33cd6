//! Verify-code action

use tracing::info;

use crate::common::{AppError, Role, UserId};
use crate::domains::auth::otp;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Result of a successful verification: the session token plus the identity
/// it was issued for.
#[derive(Debug)]
pub struct VerifiedSession {
    pub token: String,
    pub user_id: UserId,
    pub role: Role,
}

/// Verify a presented code and issue a session token.
///
/// Exactly one comparison against the stored code; any mismatch, unknown
/// contact, or lapsed expiry fails the same way. On success the code is
/// cleared and the user marked verified before the token is issued, so a
/// second attempt with the same code fails.
pub async fn verify_code(
    contact: &str,
    code: &str,
    deps: &ServerDeps,
) -> Result<VerifiedSession, AppError> {
    let user = User::find_by_contact(contact, &deps.db_pool)
        .await?
        .ok_or(AppError::InvalidCredential)?;

    let now = chrono::Utc::now();
    if !otp::code_is_valid(user.otp_code.as_deref(), user.otp_expires_at, code, now) {
        return Err(AppError::InvalidCredential);
    }

    User::consume_otp_and_verify(user.id, &deps.db_pool).await?;

    let token = deps
        .jwt_service
        .create_token(user.id, user.contact.clone(), user.role)?;

    info!(user_id = %user.id, role = %user.role, "OTP verified, session issued");

    Ok(VerifiedSession {
        token,
        user_id: user.id,
        role: user.role,
    })
}
