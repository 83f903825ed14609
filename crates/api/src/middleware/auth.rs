//! Bearer-token identity for the menu API.
//!
//! Reads are public; every write on `/dishes`, `/promotions` and the
//! comment routes goes through [`AuthUser`] before any path or body
//! extraction happens.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use bistro_core::error::CoreError;
use bistro_core::roles::{ROLE_ADMIN, ROLE_USER};
use bistro_core::types::DbId;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

const INVALID_TOKEN: &str = "Invalid or expired token";

/// The caller behind a valid access token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// Id of the `users` row the token was issued for.
    pub user_id: DbId,
    /// `"admin"` or `"user"`.
    pub role: String,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, CoreError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| CoreError::Unauthorized("Missing Authorization header".into()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            )
        })
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        let claims = validate_token(token, &state.config.jwt)
            .map_err(|_| CoreError::Unauthorized(INVALID_TOKEN.into()))?;

        // Tokens are only ever minted with one of the two known roles.
        if claims.role != ROLE_ADMIN && claims.role != ROLE_USER {
            tracing::warn!(user_id = claims.sub, role = %claims.role, "Token with unknown role");
            return Err(CoreError::Unauthorized(INVALID_TOKEN.into()).into());
        }

        Ok(AuthUser {
            user_id: claims.sub,
            role: claims.role,
        })
    }
}
