use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User role. Fixed seed set, mirrored by the `user_role` Postgres enum.
///
/// Roles are a closed enumeration: free-form role strings from the outside
/// world are parsed through `FromStr` and rejected if unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
    Supplier,
    Delivery,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
            Role::Supplier => "supplier",
            Role::Delivery => "delivery",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "customer" => Ok(Role::Customer),
            "supplier" => Ok(Role::Supplier),
            "delivery" => Ok(Role::Delivery),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_parse_from_closed_set_only() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("Customer".parse::<Role>(), Ok(Role::Customer));
        assert_eq!("SUPPLIER".parse::<Role>(), Ok(Role::Supplier));
        assert_eq!("delivery".parse::<Role>(), Ok(Role::Delivery));
        assert!("superuser".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for role in [Role::Admin, Role::Customer, Role::Supplier, Role::Delivery] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }
}
