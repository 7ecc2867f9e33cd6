//! Infrastructure layer: the dependency container and the traits behind
//! which external services sit.

pub mod deps;
pub mod traits;

pub use deps::{ConsoleOtpSender, ServerDeps, TwilioOtpSender};
pub use traits::OtpSender;
