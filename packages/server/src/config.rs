use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Origins allowed by CORS. Empty means localhost development defaults.
    pub allowed_origins: Vec<String>,
    /// Contacts (phones or emails) that are provisioned as admins on first login.
    pub admin_contacts: Vec<String>,
    pub upload_dir: String,
    /// Twilio credentials; when absent, OTP codes go to the log instead.
    pub twilio: Option<TwilioConfig>,
}

#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let twilio = match (
            env::var("TWILIO_ACCOUNT_SID").ok(),
            env::var("TWILIO_AUTH_TOKEN").ok(),
            env::var("TWILIO_FROM_NUMBER").ok(),
        ) {
            (Some(account_sid), Some(auth_token), Some(from_number)) => Some(TwilioConfig {
                account_sid,
                auth_token,
                from_number,
            }),
            _ => None,
        };

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "milkrun".to_string()),
            allowed_origins: split_list(env::var("ALLOWED_ORIGINS").ok()),
            admin_contacts: split_list(env::var("ADMIN_CONTACTS").ok()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            twilio,
        })
    }
}

fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(
            split_list(Some("a, b ,c".to_string())),
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert!(split_list(Some(" , ".to_string())).is_empty());
        assert!(split_list(None).is_empty());
    }
}
