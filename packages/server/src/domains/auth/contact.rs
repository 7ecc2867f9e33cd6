//! Contact validation.
//!
//! A contact is either a phone number (optionally +-prefixed, at least ten
//! digits) or an email address. Users are unique on the contact string.

use crate::common::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
}

/// A validated contact string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    value: String,
    kind: ContactKind,
}

impl Contact {
    /// Validate a raw contact.
    ///
    /// Accepts either a phone number with optional country code
    /// (e.g., +1234567890) or an email address (e.g., user@example.com).
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        let value = raw.trim().to_string();

        if looks_like_email(&value) {
            return Ok(Self {
                value,
                kind: ContactKind::Email,
            });
        }

        if looks_like_phone(&value) {
            return Ok(Self {
                value,
                kind: ContactKind::Phone,
            });
        }

        Err(AppError::InvalidArgument(
            "contact must be a phone number with country code or an email address".to_string(),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn kind(&self) -> ContactKind {
        self.kind
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

fn looks_like_email(value: &str) -> bool {
    // Shape check only: local part, one '@', dotted domain.
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

fn looks_like_phone(value: &str) -> bool {
    let digits = value.strip_prefix('+').unwrap_or(value);
    digits.len() >= 10 && digits.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_contacts() {
        assert_eq!(
            Contact::parse("+12345678901").unwrap().kind(),
            ContactKind::Phone
        );
        assert_eq!(
            Contact::parse("8148530305").unwrap().kind(),
            ContactKind::Phone
        );
    }

    #[test]
    fn test_email_contacts() {
        assert_eq!(
            Contact::parse("user@example.com").unwrap().kind(),
            ContactKind::Email
        );
    }

    #[test]
    fn test_rejects_malformed_contacts() {
        assert!(Contact::parse("12345").is_err());
        assert!(Contact::parse("not-a-contact").is_err());
        assert!(Contact::parse("@example.com").is_err());
        assert!(Contact::parse("user@nodot").is_err());
        assert!(Contact::parse("").is_err());
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            Contact::parse("  user@example.com ").unwrap().as_str(),
            "user@example.com"
        );
    }
}
