//! Entity models and request DTOs.
//!
//! Models serialize straight to the JSON payloads the API returns. Create
//! DTOs mirror what clients may send; update DTOs are all-optional and are
//! merged into the stored row field by field.

pub mod dish;
pub mod promotion;
pub mod user;

use serde::Serialize;

/// Result of a bulk delete (`DELETE /dishes`, `DELETE /promotions`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeleteSummary {
    pub deleted_count: u64,
}
