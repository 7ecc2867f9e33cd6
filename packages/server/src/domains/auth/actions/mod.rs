//! Auth domain actions - business logic functions
//!
//! Route handlers call these directly; every branch maps onto the error
//! taxonomy rather than panicking or partially succeeding.

mod request_code;
mod verify_code;

pub use request_code::request_code;
pub use verify_code::{verify_code, VerifiedSession};
