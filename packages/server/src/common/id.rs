//! Typed id wrappers for compile-time type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around the database's
//! sequence-allocated `i64` keys that prevents accidentally mixing up
//! different id types (e.g., passing a `ProductId` where an `OrderId` was
//! expected).
//!
//! # Example
//!
//! ```rust
//! use server_core::common::id::Id;
//!
//! // Define entity marker types
//! pub struct Product;
//! pub struct Order;
//!
//! // Create type aliases
//! pub type ProductId = Id<Product>;
//! pub type OrderId = Id<Order>;
//!
//! // These are now incompatible types:
//! let product_id = ProductId::from_i64(1);
//! let order_id = OrderId::from_i64(1);
//!
//! // This would be a compile error:
//! // let wrong: OrderId = product_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

/// A typed wrapper around an `i64` row id.
///
/// The type parameter `T` is the entity marker type this id belongs to.
/// Ids are allocated by the database sequence; there is deliberately no
/// constructor that invents fresh values on the Rust side.
#[repr(transparent)]
pub struct Id<T>(i64, PhantomData<fn() -> T>);

impl<T> Id<T> {
    /// Wraps a raw row id loaded from the database or deserialized input.
    #[inline]
    pub fn from_i64(id: i64) -> Self {
        Self(id, PhantomData)
    }

    /// Returns the raw row id.
    #[inline]
    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Parses an id from a string (path parameters, external input).
    #[inline]
    pub fn parse(s: &str) -> Result<Self, ParseIntError> {
        Ok(Self(s.parse()?, PhantomData))
    }
}

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<i64> for Id<T> {
    #[inline]
    fn from(id: i64) -> Self {
        Self::from_i64(id)
    }
}

impl<T> From<Id<T>> for i64 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_i64)
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i64 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i64 as Type<Postgres>>::compatible(ty)
    }
}

impl<T> PgHasArrayType for Id<T> {
    fn array_type_info() -> PgTypeInfo {
        <i64 as PgHasArrayType>::array_type_info()
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i64 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <i64 as Decode<Postgres>>::decode(value).map(Self::from_i64)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct User;

    type UserId = Id<User>;

    #[test]
    fn test_parse_and_display_roundtrip() {
        let id = UserId::from_i64(42);
        let s = id.to_string();
        let parsed = UserId::parse(&s).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(UserId::parse("not-a-number").is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let id = UserId::from_i64(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_hash_map_key() {
        use std::collections::HashMap;
        let mut map: HashMap<UserId, &str> = HashMap::new();
        let id = UserId::from_i64(1);
        map.insert(id, "test");
        assert_eq!(map.get(&id), Some(&"test"));
    }

    #[test]
    fn test_ordering_follows_sequence() {
        let id1 = UserId::from_i64(1);
        let id2 = UserId::from_i64(2);
        assert!(id1 < id2);
    }

    #[test]
    fn test_debug_includes_type_name() {
        let id = UserId::from_i64(3);
        let debug = format!("{:?}", id);
        assert!(debug.contains("User"));
    }
}
