//! `Json` and `Path` extractors whose rejections render through [`AppError`].
//!
//! axum's own extractors answer malformed bodies and unparsable ids with a
//! `text/plain` response. These wrappers keep every error on the
//! `{message, status, code}` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
