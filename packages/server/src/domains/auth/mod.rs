//! Auth domain: one-time codes, contact validation, and session tokens.

pub mod actions;
mod contact;
pub mod jwt;
pub mod otp;

pub use contact::{Contact, ContactKind};
pub use jwt::{Claims, JwtService};
