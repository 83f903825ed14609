//! Request handlers, one module per resource.
//!
//! Handlers talk to the store traits on [`AppState`](crate::state::AppState)
//! and map failures through [`AppError`](crate::error::AppError). Auth
//! extractors always come before [`AppPath`](crate::extract::AppPath) and
//! [`AppJson`](crate::extract::AppJson) so identity is checked first.

pub mod comments;
pub mod dishes;
pub mod promotions;
pub mod users;

use axum::http::StatusCode;

/// Static rejection for a verb a resource does not support.
///
/// Written directly as a 403 `text/plain` response rather than going
/// through [`AppError`](crate::error::AppError).
pub(crate) fn unsupported(method: &str, path: &str) -> (StatusCode, String) {
    (
        StatusCode::FORBIDDEN,
        format!("{method} operation not supported on {path}"),
    )
}
