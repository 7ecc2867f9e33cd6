//! Domain modules. Each carries its own models (sqlx persistence), data
//! (API representations), and actions (business logic called by routes).

pub mod auth;
pub mod catalog;
pub mod offers;
pub mod orders;
pub mod subscriptions;
pub mod users;
