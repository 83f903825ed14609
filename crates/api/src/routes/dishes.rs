//! Route definitions for `/dishes` and its nested comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::{comments, dishes};
use crate::state::AppState;

/// Routes mounted at `/dishes`.
///
/// ```text
/// GET    /                                  -> dishes::list
/// POST   /                                  -> dishes::create
/// PUT    /                                  -> dishes::reject_put
/// DELETE /                                  -> dishes::delete_all
/// GET    /{dish_id}                         -> dishes::get_by_id
/// POST   /{dish_id}                         -> dishes::reject_post
/// PUT    /{dish_id}                         -> dishes::update
/// DELETE /{dish_id}                         -> dishes::delete
///
/// GET    /{dish_id}/comments                -> comments::list
/// POST   /{dish_id}/comments                -> comments::create
/// PUT    /{dish_id}/comments                -> comments::reject_put
/// DELETE /{dish_id}/comments                -> comments::delete_all
/// GET    /{dish_id}/comments/{comment_id}   -> comments::get_by_id
/// POST   /{dish_id}/comments/{comment_id}   -> comments::reject_post
/// PUT    /{dish_id}/comments/{comment_id}   -> comments::update
/// DELETE /{dish_id}/comments/{comment_id}   -> comments::delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(dishes::list)
                .post(dishes::create)
                .put(dishes::reject_put)
                .delete(dishes::delete_all),
        )
        .route(
            "/{dish_id}",
            get(dishes::get_by_id)
                .post(dishes::reject_post)
                .put(dishes::update)
                .delete(dishes::delete),
        )
        .route(
            "/{dish_id}/comments",
            get(comments::list)
                .post(comments::create)
                .put(comments::reject_put)
                .delete(comments::delete_all),
        )
        .route(
            "/{dish_id}/comments/{comment_id}",
            get(comments::get_by_id)
                .post(comments::reject_post)
                .put(comments::update)
                .delete(comments::delete),
        )
}
