use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{Role, UserId};
use crate::domains::users::models::User;

/// Public API representation of a user (for JSON responses).
///
/// Never exposes the OTP columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub id: UserId,
    pub contact: String,
    pub name: String,
    pub role: Role,
    pub verified: bool,
    pub address: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserData {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            contact: user.contact,
            name: user.name,
            role: user.role,
            verified: user.verified,
            address: user.address,
            active: user.active,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_never_leaks_otp() {
        let user = User {
            id: UserId::from_i64(1),
            contact: "+15550001111".to_string(),
            name: "Asha".to_string(),
            role: Role::Customer,
            otp_code: Some("123456".to_string()),
            otp_expires_at: Some(Utc::now()),
            verified: false,
            address: None,
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_string(&UserData::from(user)).unwrap();
        assert!(!json.contains("123456"));
        assert!(!json.contains("otp"));
    }
}
