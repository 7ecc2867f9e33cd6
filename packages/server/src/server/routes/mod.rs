//! Route handlers, grouped by concern. Handlers stay thin: deserialize,
//! resolve identity, call the domain action, serialize.

pub mod auth;
pub mod catalog;
pub mod health;
pub mod offers;
pub mod orders;
pub mod subscriptions;
pub mod users;

use serde::{Deserialize, Serialize};

/// Plain acknowledgement body used by endpoints without richer data.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
