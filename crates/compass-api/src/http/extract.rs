//! Extractors whose rejections use the uniform error body.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;

use super::error::AppError;

/// `axum::Json` with rejections mapped to a 400 [`AppError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// `axum::extract::Query` with rejections mapped to a 400 [`AppError`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
