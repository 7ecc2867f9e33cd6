use super::AdminCapability;
use crate::common::entity_ids::UserId;
use crate::common::error::AppError;
use crate::common::types::Role;

/// Entry point for authorization checks
///
/// Usage:
/// ```ignore
/// Actor::new(identity.user_id, identity.role)
///     .can(AdminCapability::ManageCatalog)
///     .check()?;
/// ```
pub struct Actor {
    actor_id: UserId,
    role: Role,
}

impl Actor {
    /// Create a new actor for authorization checks
    ///
    /// # Arguments
    /// * `actor_id` - The user id of the caller
    /// * `role` - Role resolved from the verified token during session resolution
    pub fn new(actor_id: UserId, role: Role) -> Self {
        Self { actor_id, role }
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: AdminCapability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor_id: self.actor_id,
            role: self.role,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor_id: UserId,
    role: Role,
    capability: AdminCapability,
}

impl CapabilityBuilder {
    /// Perform the authorization check.
    ///
    /// The role comes from the signed token and was resolved against the
    /// users table during session resolution, so the check itself is a pure
    /// comparison.
    pub fn check(self) -> Result<(), AppError> {
        if !self.role.is_admin() {
            tracing::debug!(
                actor_id = %self.actor_id,
                capability = ?self.capability,
                "Permission denied"
            );
            return Err(AppError::PermissionDenied(self.capability.describe()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_check() {
        let actor_id = UserId::from_i64(1);
        let result = Actor::new(actor_id, Role::Admin)
            .can(AdminCapability::ManageCatalog)
            .check();

        assert!(result.is_ok());
    }

    #[test]
    fn test_non_admin_rejected() {
        for role in [Role::Customer, Role::Supplier, Role::Delivery] {
            let actor_id = UserId::from_i64(2);
            let result = Actor::new(actor_id, role)
                .can(AdminCapability::ManageOrders)
                .check();

            assert!(matches!(result, Err(AppError::PermissionDenied(_))));
        }
    }
}
