/// Authorization module
///
/// Provides a fluent API for authorization checks in handler code:
///
/// ```ignore
/// use crate::common::auth::{Actor, AdminCapability};
///
/// // In a handler, after session resolution:
/// Actor::new(identity.user_id, identity.role)
///     .can(AdminCapability::ManageCatalog)
///     .check()?;
/// ```
///
/// This keeps role checks next to the operation being gated instead of
/// scattered string comparisons.
mod builder;
mod capability;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::AdminCapability;
