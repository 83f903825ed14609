//! Repository layer.
//!
//! Each `*Repo` is a zero-sized namespace of async query functions that
//! return raw `sqlx::Error`s. Each `Pg*Store` wraps a pool and exposes the
//! repo through the matching `bistro_core::store` trait, classifying errors
//! on the way out.

pub mod dish_repo;
pub mod promotion_repo;
pub mod user_repo;

pub use dish_repo::{DishRepo, PgDishStore};
pub use promotion_repo::{PgPromotionStore, PromotionRepo};
pub use user_repo::{PgUserStore, UserRepo};
