//! Application error type mapping to HTTP status codes and the error body.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use compass_types::error::{AuthError, ChatError, ContactError, HistoryError, QuizError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    History(HistoryError),
    Chat(ChatError),
    Quiz(QuizError),
    Contact(ContactError),
    Auth(AuthError),
    /// Credentials rejected.
    Unauthorized(String),
    /// Malformed or missing request input.
    Validation(String),
    /// Generic internal error.
    Internal(String),
}

impl From<HistoryError> for AppError {
    fn from(e: HistoryError) -> Self {
        AppError::History(e)
    }
}

impl From<ChatError> for AppError {
    fn from(e: ChatError) -> Self {
        AppError::Chat(e)
    }
}

impl From<QuizError> for AppError {
    fn from(e: QuizError) -> Self {
        AppError::Quiz(e)
    }
}

impl From<ContactError> for AppError {
    fn from(e: ContactError) -> Self {
        AppError::Contact(e)
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl AppError {
    /// Status code and client-facing message. Backend details stay in the logs.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::History(HistoryError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::History(HistoryError::UserNotFound) => {
                (StatusCode::NOT_FOUND, "User not found".to_string())
            }
            AppError::History(HistoryError::ConversationNotFound) => {
                (StatusCode::NOT_FOUND, "Conversation not found".to_string())
            }
            AppError::History(HistoryError::Storage(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to access chat history".to_string(),
            ),
            AppError::Chat(ChatError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Chat(ChatError::Busy) => (StatusCode::CONFLICT, ChatError::Busy.to_string()),
            AppError::Chat(ChatError::Llm(e)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to process chat request: {e}"),
            ),
            AppError::Quiz(QuizError::InvalidAnswers(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Quiz(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to analyze quiz results: {e}"),
            ),
            AppError::Contact(ContactError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::Contact(ContactError::Delivery(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to send email".to_string(),
            ),
            AppError::Auth(AuthError::InvalidInput(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Auth(AuthError::Rejected { status, message }) => {
                let status = StatusCode::from_u16(*status)
                    .ok()
                    .filter(StatusCode::is_client_error)
                    .unwrap_or(StatusCode::BAD_REQUEST);
                (status, message.clone())
            }
            AppError::Auth(AuthError::NotConfigured) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Authentication service not configured".to_string(),
            ),
            AppError::Auth(AuthError::Provider(_)) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            tracing::error!(status = %status, error = ?self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(json!({ "success": false, "error": message }))).into_response()
    }
}
