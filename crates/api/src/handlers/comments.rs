//! Handlers for the comments nested under a dish.
//!
//! `/dishes/{dish_id}/comments[/{comment_id}]`
//!
//! Single-comment endpoints go through
//! [`CommentLookup`](bistro_core::comment_access::CommentLookup), which
//! checks dish existence, then comment existence, then (for writes)
//! ownership, in that order.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::comment_access::{require_dish, CommentAction, CommentLookup};
use bistro_core::models::dish::{Comment, CreateComment, Dish, UpdateComment};
use bistro_core::types::DbId;

use super::dishes::dish_not_found;
use super::unsupported;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

/// GET /dishes/{dish_id}/comments
pub async fn list(
    State(state): State<AppState>,
    AppPath(dish_id): AppPath<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    let dish = require_dish(state.dishes.find_by_id(dish_id).await?, dish_id)?;
    Ok(Json(dish.comments))
}

/// POST /dishes/{dish_id}/comments
///
/// The author is always the caller; an `author` key in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(dish_id): AppPath<DbId>,
    AppJson(input): AppJson<CreateComment>,
) -> AppResult<Json<Dish>> {
    require_dish(state.dishes.find_by_id(dish_id).await?, dish_id)?;

    let comment = input.authored_by(user.user_id);
    let dish = state
        .dishes
        .add_comment(dish_id, &comment)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    tracing::info!(dish_id, author_id = user.user_id, "Comment added");
    Ok(Json(dish))
}

/// PUT /dishes/{dish_id}/comments
pub async fn reject_put(
    RequireAuth(_): RequireAuth,
    AppPath(dish_id): AppPath<DbId>,
) -> (StatusCode, String) {
    unsupported("PUT", &format!("/dishes/{dish_id}/comments"))
}

/// DELETE /dishes/{dish_id}/comments
///
/// Removes every comment on the dish, whoever wrote it. The dish stays.
pub async fn delete_all(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(dish_id): AppPath<DbId>,
) -> AppResult<Json<Dish>> {
    require_dish(state.dishes.find_by_id(dish_id).await?, dish_id)?;

    let dish = state
        .dishes
        .clear_comments(dish_id)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    tracing::info!(dish_id, user_id = user.user_id, "All comments removed");
    Ok(Json(dish))
}

/// GET /dishes/{dish_id}/comments/{comment_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath((dish_id, comment_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<Comment>> {
    let dish = state.dishes.find_by_id(dish_id).await?;
    let comment =
        CommentLookup::new(dish.as_ref(), dish_id, comment_id, CommentAction::Read).resolve()?;
    Ok(Json(comment.clone()))
}

/// POST /dishes/{dish_id}/comments/{comment_id}
pub async fn reject_post(
    RequireAuth(_): RequireAuth,
    AppPath((dish_id, comment_id)): AppPath<(DbId, DbId)>,
) -> (StatusCode, String) {
    unsupported("POST", &format!("/dishes/{dish_id}/comments/{comment_id}"))
}

/// PUT /dishes/{dish_id}/comments/{comment_id}
///
/// Owner only. Overwrites `rating` and/or `comment` when present.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath((dish_id, comment_id)): AppPath<(DbId, DbId)>,
    AppJson(input): AppJson<UpdateComment>,
) -> AppResult<Json<Dish>> {
    authorize_modify(&state, dish_id, comment_id, user.user_id).await?;

    let dish = state
        .dishes
        .update_comment(dish_id, comment_id, &input)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    Ok(Json(dish))
}

/// DELETE /dishes/{dish_id}/comments/{comment_id}
///
/// Owner only.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath((dish_id, comment_id)): AppPath<(DbId, DbId)>,
) -> AppResult<Json<Dish>> {
    authorize_modify(&state, dish_id, comment_id, user.user_id).await?;

    let dish = state
        .dishes
        .delete_comment(dish_id, comment_id)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    tracing::info!(dish_id, comment_id, user_id = user.user_id, "Comment removed");
    Ok(Json(dish))
}

/// Run the full rule list for a write by `caller`.
async fn authorize_modify(
    state: &AppState,
    dish_id: DbId,
    comment_id: DbId,
    caller: DbId,
) -> AppResult<()> {
    let dish = state.dishes.find_by_id(dish_id).await?;
    CommentLookup::new(
        dish.as_ref(),
        dish_id,
        comment_id,
        CommentAction::Modify { caller },
    )
    .resolve()?;
    Ok(())
}
