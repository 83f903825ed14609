//! Domain layer for the Bistro menu service.
//!
//! Holds the entity models, the store traits the HTTP layer talks to, and
//! the access rules for the nested comment resource. Nothing in here knows
//! about HTTP or a concrete database.

pub mod comment_access;
pub mod error;
pub mod models;
pub mod roles;
pub mod store;
pub mod types;
