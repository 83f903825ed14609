//! Handlers for `/promotions` and `/promotions/{promotion_id}`.
//!
//! Writes need an authenticated caller but no particular role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::error::CoreError;
use bistro_core::models::promotion::{CreatePromotion, Promotion, UpdatePromotion};
use bistro_core::models::DeleteSummary;
use bistro_core::types::DbId;

use super::unsupported;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

fn promotion_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Promotion",
        id,
    })
}

/// GET /promotions
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Promotion>>> {
    let promotions = state.promotions.list().await?;
    Ok(Json(promotions))
}

/// POST /promotions
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(input): AppJson<CreatePromotion>,
) -> AppResult<Json<Promotion>> {
    let promotion = state.promotions.create(&input).await?;
    tracing::info!(
        promotion_id = promotion.id,
        name = %promotion.name,
        user_id = user.user_id,
        "Promotion created"
    );
    Ok(Json(promotion))
}

/// PUT /promotions
pub async fn reject_put(RequireAuth(_): RequireAuth) -> (StatusCode, String) {
    unsupported("PUT", "/promotions")
}

/// DELETE /promotions
pub async fn delete_all(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> AppResult<Json<DeleteSummary>> {
    let summary = state.promotions.delete_all().await?;
    tracing::info!(
        deleted = summary.deleted_count,
        user_id = user.user_id,
        "All promotions deleted"
    );
    Ok(Json(summary))
}

/// GET /promotions/{promotion_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(promotion_id): AppPath<DbId>,
) -> AppResult<Json<Promotion>> {
    let promotion = state
        .promotions
        .find_by_id(promotion_id)
        .await?
        .ok_or_else(|| promotion_not_found(promotion_id))?;
    Ok(Json(promotion))
}

/// POST /promotions/{promotion_id}
pub async fn reject_post(
    RequireAuth(_): RequireAuth,
    AppPath(promotion_id): AppPath<DbId>,
) -> (StatusCode, String) {
    unsupported("POST", &format!("/promotions/{promotion_id}"))
}

/// PUT /promotions/{promotion_id}
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_): RequireAuth,
    AppPath(promotion_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePromotion>,
) -> AppResult<Json<Promotion>> {
    let promotion = state
        .promotions
        .update(promotion_id, &input)
        .await?
        .ok_or_else(|| promotion_not_found(promotion_id))?;
    Ok(Json(promotion))
}

/// DELETE /promotions/{promotion_id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(promotion_id): AppPath<DbId>,
) -> AppResult<Json<Promotion>> {
    let promotion = state
        .promotions
        .delete(promotion_id)
        .await?
        .ok_or_else(|| promotion_not_found(promotion_id))?;
    tracing::info!(promotion_id, user_id = user.user_id, "Promotion deleted");
    Ok(Json(promotion))
}
