use std::sync::Arc;

use bistro_core::store::{DishStore, PromotionStore, UserStore};
use bistro_db::{DbPool, PgDishStore, PgPromotionStore, PgUserStore};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Handlers only see the store traits, never the pool, so tests can swap in
/// other implementations.
#[derive(Clone)]
pub struct AppState {
    pub dishes: Arc<dyn DishStore>,
    pub promotions: Arc<dyn PromotionStore>,
    pub users: Arc<dyn UserStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Wire every store to the same Postgres pool.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            dishes: Arc::new(PgDishStore::new(pool.clone())),
            promotions: Arc::new(PgPromotionStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool)),
            config: Arc::new(config),
        }
    }
}
