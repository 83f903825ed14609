//! Promotion entity and DTOs.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, Timestamp};

/// A standalone promotional offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promotion {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub label: String,
    /// Price in minor currency units (cents).
    pub price: i64,
    pub featured: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a promotion.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePromotion {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub price: i64,
    #[serde(default)]
    pub featured: bool,
}

/// DTO for updating a promotion. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePromotion {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub label: Option<String>,
    pub price: Option<i64>,
    pub featured: Option<bool>,
}
