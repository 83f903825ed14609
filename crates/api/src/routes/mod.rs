pub mod dishes;
pub mod health;
pub mod promotions;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// ```text
/// /dishes                                   GET, POST*, PUT(403)*, DELETE*   (* admin)
/// /dishes/{dish_id}                         GET, POST(403)*, PUT*, DELETE*   (* admin)
/// /dishes/{dish_id}/comments                GET, POST+, PUT(403)+, DELETE+   (+ auth)
/// /dishes/{dish_id}/comments/{comment_id}   GET, POST(403)+, PUT+, DELETE+   (+ auth, owner for PUT/DELETE)
///
/// /promotions                               GET, POST+, PUT(403)+, DELETE+
/// /promotions/{promotion_id}                GET, POST(403)+, PUT+, DELETE+
///
/// /users                                    GET (admin)
/// /users/signup                             POST
/// /users/login                              POST
/// ```
///
/// `OPTIONS` never reaches these routes: the CORS layer in
/// [`build_app_router`](crate::router::build_app_router) answers it.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/dishes", dishes::router())
        .nest("/promotions", promotions::router())
        .nest("/users", users::router())
}
