use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` with rejections rendered as `{"error": ...}` 400s.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
