//! User management actions: admin listings, staff pre-registration, and
//! self-service profile updates.

use tracing::info;

use crate::common::{AppError, Role, UserId};
use crate::domains::auth::Contact;
use crate::domains::users::models::User;
use crate::kernel::ServerDeps;

/// All users (admin listing). Empty store yields an empty list.
pub async fn list_users(deps: &ServerDeps) -> Result<Vec<User>, AppError> {
    Ok(User::find_all(&deps.db_pool).await?)
}

/// Users filtered by role name. Unknown role names are rejected rather than
/// silently matching nothing.
pub async fn list_users_by_role(role_name: &str, deps: &ServerDeps) -> Result<Vec<User>, AppError> {
    let role: Role = role_name
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("unknown role '{role_name}'")))?;

    Ok(User::find_by_role(role, &deps.db_pool).await?)
}

/// Admin pre-registers a supplier or delivery account. The new user still
/// logs in through the normal OTP flow with the registered contact.
pub async fn add_staff_user(
    name: &str,
    contact: &str,
    role_name: &str,
    deps: &ServerDeps,
) -> Result<User, AppError> {
    let role: Role = role_name
        .parse()
        .map_err(|_| AppError::InvalidArgument(format!("unknown role '{role_name}'")))?;

    if !matches!(role, Role::Supplier | Role::Delivery) {
        return Err(AppError::InvalidArgument(
            "only supplier and delivery users can be added here".to_string(),
        ));
    }

    let contact = Contact::parse(contact)?;

    if User::find_by_contact(contact.as_str(), &deps.db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User"));
    }

    let user = User::create(contact.as_str(), name, role, &deps.db_pool).await?;
    info!(user_id = %user.id, role = %role, "Staff user added");

    Ok(user)
}

/// Update the caller's own profile. At least one field must be provided.
pub async fn update_profile(
    user_id: UserId,
    name: Option<&str>,
    address: Option<&str>,
    deps: &ServerDeps,
) -> Result<User, AppError> {
    if name.is_none() && address.is_none() {
        return Err(AppError::InvalidArgument("no fields to update".to_string()));
    }

    Ok(User::update_profile(user_id, name, address, &deps.db_pool).await?)
}
