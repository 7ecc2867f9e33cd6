//! Request-code action

use tracing::{error, info};

use crate::common::{AppError, Role};
use crate::domains::auth::{otp, Contact};
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// Issue a one-time code for a contact and deliver it out-of-band.
///
/// Unknown contacts are registered on the spot with the customer role
/// (contacts on the configured admin list get the admin role). The response
/// is the same either way, so the endpoint does not reveal whether a contact
/// was already registered.
pub async fn request_code(contact: &str, deps: &ServerDeps) -> Result<(), AppError> {
    let contact = Contact::parse(contact)?;

    let user = match User::find_by_contact(contact.as_str(), &deps.db_pool).await? {
        Some(user) => user,
        None => {
            let role = if deps.is_admin_contact(contact.as_str()) {
                Role::Admin
            } else {
                Role::Customer
            };

            let user = User::create(contact.as_str(), "", role, &deps.db_pool).await?;
            info!(user_id = %user.id, role = %role, "Registered new user on first code request");
            user
        }
    };

    let code = otp::generate_code();
    let expires_at = otp::expiry_from_now();
    User::store_otp(user.id, &code, expires_at, &deps.db_pool).await?;

    deps.otp_sender
        .send_code(contact.as_str(), &code)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to deliver OTP");
            AppError::Internal(e)
        })?;

    info!(user_id = %user.id, "OTP issued");
    Ok(())
}
