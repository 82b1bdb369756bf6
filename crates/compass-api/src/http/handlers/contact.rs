//! POST /contact - Deliver a contact form submission by email.

use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use compass_core::contact::service::validate;
use compass_types::contact::ContactForm;

use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::state::AppState;

pub async fn send_contact(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ContactForm>,
) -> Result<Json<Value>, AppError> {
    validate(&form)?;
    let service = state
        .contact_service
        .as_ref()
        .ok_or_else(|| AppError::Internal("Email service not configured".to_string()))?;

    let receipt = service.submit(&form).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Email sent successfully",
        "emailId": receipt.id,
    })))
}
