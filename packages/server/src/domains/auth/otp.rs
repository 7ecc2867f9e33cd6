//! One-time code generation and expiry rules.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

/// Codes expire five minutes after issuance.
pub const OTP_TTL_MINUTES: i64 = 5;

/// Generate a 6-digit numeric code.
pub fn generate_code() -> String {
    let code: u32 = rand::thread_rng().gen_range(100_000..=999_999);
    code.to_string()
}

/// Expiry timestamp for a code issued now.
pub fn expiry_from_now() -> DateTime<Utc> {
    Utc::now() + Duration::minutes(OTP_TTL_MINUTES)
}

/// Whether a stored code matches the presented one and is still inside its
/// window. A missing stored code (already consumed or never issued) never
/// matches.
pub fn code_is_valid(
    stored: Option<&str>,
    expires_at: Option<DateTime<Utc>>,
    presented: &str,
    now: DateTime<Utc>,
) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(expiry)) => code == presented && now <= expiry,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert_ne!(code.chars().next(), Some('0'));
        }
    }

    #[test]
    fn test_exact_code_before_expiry_is_valid() {
        let now = Utc::now();
        let expiry = now + Duration::minutes(1);
        assert!(code_is_valid(Some("123456"), Some(expiry), "123456", now));
    }

    #[test]
    fn test_wrong_code_is_invalid() {
        let now = Utc::now();
        let expiry = now + Duration::minutes(1);
        assert!(!code_is_valid(Some("123456"), Some(expiry), "654321", now));
    }

    #[test]
    fn test_code_after_expiry_is_invalid() {
        let now = Utc::now();
        let expiry = now - Duration::seconds(1);
        assert!(!code_is_valid(Some("123456"), Some(expiry), "123456", now));
    }

    #[test]
    fn test_cleared_code_never_matches() {
        let now = Utc::now();
        assert!(!code_is_valid(None, None, "123456", now));
        assert!(!code_is_valid(None, Some(now + Duration::minutes(1)), "123456", now));
    }
}
