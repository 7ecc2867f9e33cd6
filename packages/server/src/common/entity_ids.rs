//! Typed ID definitions for all domain entities.
//!
//! One alias per entity, so id usage is checked at compile time across the
//! application.

// Re-export the core Id type
pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for User entities (customers, suppliers, delivery, admins).
pub struct User;

/// Marker type for Category entities.
pub struct Category;

/// Marker type for Product entities.
pub struct Product;

/// Marker type for Order entities.
pub struct Order;

/// Marker type for Subscription entities.
pub struct Subscription;

/// Marker type for Offer entities (promotional uploads).
pub struct Offer;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for User entities.
pub type UserId = Id<User>;

/// Typed ID for Category entities.
pub type CategoryId = Id<Category>;

/// Typed ID for Product entities.
pub type ProductId = Id<Product>;

/// Typed ID for Order entities.
pub type OrderId = Id<Order>;

/// Typed ID for Subscription entities.
pub type SubscriptionId = Id<Subscription>;

/// Typed ID for Offer entities.
pub type OfferId = Id<Offer>;
