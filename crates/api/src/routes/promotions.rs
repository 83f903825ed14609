//! Route definitions for `/promotions`.

use axum::routing::get;
use axum::Router;

use crate::handlers::promotions;
use crate::state::AppState;

/// Routes mounted at `/promotions`.
///
/// ```text
/// GET    /                  -> list
/// POST   /                  -> create
/// PUT    /                  -> reject_put
/// DELETE /                  -> delete_all
/// GET    /{promotion_id}    -> get_by_id
/// POST   /{promotion_id}    -> reject_post
/// PUT    /{promotion_id}    -> update
/// DELETE /{promotion_id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(promotions::list)
                .post(promotions::create)
                .put(promotions::reject_put)
                .delete(promotions::delete_all),
        )
        .route(
            "/{promotion_id}",
            get(promotions::get_by_id)
                .post(promotions::reject_post)
                .put(promotions::update)
                .delete(promotions::delete),
        )
}
