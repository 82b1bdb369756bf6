//! Account handlers delegating to the hosted identity provider.
//!
//! Endpoints:
//! - POST /auth/signup
//! - POST /auth/signin
//! - POST /auth/signout  (bearer token in `Authorization`)

use axum::extract::State;
use axum::http::{header, HeaderMap};
use axum::Json;
use serde_json::{json, Value};

use compass_types::auth::{SignInRequest, SignUpRequest};
use compass_types::error::AuthError;

use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::state::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignUpRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state.auth_service.sign_up(&request).await?;

    if outcome.needs_confirmation() {
        return Ok(Json(json!({
            "success": true,
            "message": "Signup successful. Please check your email to confirm your account.",
            "user": outcome.user,
        })));
    }
    Ok(Json(json!({
        "success": true,
        "user": outcome.user,
        "session": outcome.session,
    })))
}

pub async fn sign_in(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SignInRequest>,
) -> Result<Json<Value>, AppError> {
    let outcome = state
        .auth_service
        .sign_in(&request)
        .await
        .map_err(|e| match e {
            AuthError::Rejected { message, .. } => AppError::Unauthorized(message),
            other => AppError::Auth(other),
        })?;

    Ok(Json(json!({
        "success": true,
        "user": outcome.user,
        "session": outcome.session,
    })))
}

pub async fn sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    state.auth_service.sign_out(bearer_token(&headers)).await?;
    Ok(Json(json!({ "success": true, "message": "Signed out successfully" })))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer ").or_else(|| v.strip_prefix("bearer ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(bearer_token(&headers), Some("abc.def"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert_eq!(bearer_token(&headers), None);
    }
}
