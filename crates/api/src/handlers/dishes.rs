//! Handlers for `/dishes` and `/dishes/{dish_id}`.
//!
//! Every write requires the `admin` role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::error::CoreError;
use bistro_core::models::dish::{CreateDish, Dish, UpdateDish};
use bistro_core::models::DeleteSummary;
use bistro_core::types::DbId;

use super::unsupported;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

pub(crate) fn dish_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Dish", id })
}

/// GET /dishes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Dish>>> {
    let dishes = state.dishes.list().await?;
    Ok(Json(dishes))
}

/// POST /dishes
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppJson(input): AppJson<CreateDish>,
) -> AppResult<Json<Dish>> {
    let dish = state.dishes.create(&input).await?;
    tracing::info!(dish_id = dish.id, name = %dish.name, admin_id = admin.user_id, "Dish created");
    Ok(Json(dish))
}

/// PUT /dishes
pub async fn reject_put(RequireAdmin(_): RequireAdmin) -> (StatusCode, String) {
    unsupported("PUT", "/dishes")
}

/// DELETE /dishes
pub async fn delete_all(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<DeleteSummary>> {
    let summary = state.dishes.delete_all().await?;
    tracing::info!(
        deleted = summary.deleted_count,
        admin_id = admin.user_id,
        "All dishes deleted"
    );
    Ok(Json(summary))
}

/// GET /dishes/{dish_id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(dish_id): AppPath<DbId>,
) -> AppResult<Json<Dish>> {
    let dish = state
        .dishes
        .find_by_id(dish_id)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    Ok(Json(dish))
}

/// POST /dishes/{dish_id}
pub async fn reject_post(
    RequireAdmin(_): RequireAdmin,
    AppPath(dish_id): AppPath<DbId>,
) -> (StatusCode, String) {
    unsupported("POST", &format!("/dishes/{dish_id}"))
}

/// PUT /dishes/{dish_id}
///
/// Merges the fields present in the body into the stored dish.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    AppPath(dish_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateDish>,
) -> AppResult<Json<Dish>> {
    let dish = state
        .dishes
        .update(dish_id, &input)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    Ok(Json(dish))
}

/// DELETE /dishes/{dish_id}
///
/// Returns the removed dish. A second delete of the same id is a 404.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    AppPath(dish_id): AppPath<DbId>,
) -> AppResult<Json<Dish>> {
    let dish = state
        .dishes
        .delete(dish_id)
        .await?
        .ok_or_else(|| dish_not_found(dish_id))?;
    tracing::info!(dish_id, admin_id = admin.user_id, "Dish deleted");
    Ok(Json(dish))
}
