//! Route definitions for `/users`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET    /          -> list (admin only)
/// POST   /signup    -> signup
/// POST   /login     -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/signup", post(users::signup))
        .route("/login", post(users::login))
}
