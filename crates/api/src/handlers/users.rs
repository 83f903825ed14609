//! Handlers for the `/users` resource (sign-up, login, listing).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use bistro_core::error::CoreError;
use bistro_core::models::user::{NewUser, SignupRequest, User};
use bistro_core::roles::role_for;
use bistro_core::store::UserStore;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, verify_password};
use crate::config::AdminCredentials;
use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Unauthorized(
        "Invalid username or password".into(),
    ))
}

/// POST /users/signup
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<User>)> {
    input
        .validate()
        .map_err(|e| CoreError::Validation(e.to_string()))?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = state
        .users
        .create(&NewUser {
            username: input.username,
            password_hash,
            firstname: input.firstname,
            lastname: input.lastname,
            admin: false,
        })
        .await?;
    tracing::info!(user_id = user.id, username = %user.username, "User registered");
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /users/login
pub async fn login(
    State(state): State<AppState>,
    AppJson(input): AppJson<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .users
        .find_by_username(&input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        tracing::warn!(username = %input.username, "Failed login attempt");
        return Err(invalid_credentials());
    }

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(user.id, role_for(user.admin), jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(LoginResponse {
        access_token,
        expires_in: jwt.access_token_expiry_mins * 60,
        user,
    }))
}

/// GET /users
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
) -> AppResult<Json<Vec<User>>> {
    let users = state.users.list().await?;
    Ok(Json(users))
}

/// Create the configured admin account unless a user with that name exists.
///
/// Returns `true` if an account was created.
pub async fn bootstrap_admin(users: &dyn UserStore, creds: &AdminCredentials) -> AppResult<bool> {
    if users.find_by_username(&creds.username).await?.is_some() {
        return Ok(false);
    }

    let password_hash = hash_password(&creds.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let admin = users
        .create(&NewUser {
            username: creds.username.clone(),
            password_hash,
            firstname: String::new(),
            lastname: String::new(),
            admin: true,
        })
        .await?;
    tracing::info!(user_id = admin.id, username = %admin.username, "Admin account created");
    Ok(true)
}
