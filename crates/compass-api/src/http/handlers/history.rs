//! Chat history handlers.
//!
//! Endpoints:
//! - GET    /history?sessionId=S                     - List conversations
//! - POST   /history                                 - Save a conversation
//! - DELETE /history?sessionId=S[&conversationId=C]  - Delete one or all

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use compass_core::history::service::DeleteScope;
use compass_types::history::{ConversationId, SessionId};
use compass_types::llm::Message;

use crate::http::error::AppError;
use crate::http::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub session_id: Option<String>,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveHistoryRequest {
    pub session_id: Option<String>,
    pub messages: Option<Vec<Message>>,
    pub title: Option<String>,
}

fn session_from(raw: Option<&str>) -> Result<SessionId, AppError> {
    Ok(SessionId::parse(raw.unwrap_or_default())?)
}

/// GET /history - All conversations for the session, newest update first.
pub async fn get_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let session_id = session_from(query.session_id.as_deref())?;
    let history = state.history_service.load_history(&session_id).await?;
    Ok(Json(json!({ "history": history })))
}

/// POST /history - Save the posted messages as a new conversation.
pub async fn save_history(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SaveHistoryRequest>,
) -> Result<Json<Value>, AppError> {
    let (Some(raw_session), Some(messages)) = (body.session_id.as_deref(), body.messages) else {
        return Err(AppError::Validation(
            "Session ID and messages required".to_string(),
        ));
    };
    let session_id = session_from(Some(raw_session))?;

    let conversation = state
        .history_service
        .save_conversation(&session_id, &messages, body.title.as_deref())
        .await?;

    Ok(Json(json!({ "success": true, "conversation": conversation })))
}

/// DELETE /history - Delete one conversation (scoped to the session) or all.
pub async fn delete_history(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let session_id = session_from(query.session_id.as_deref())?;

    let scope = match query.conversation_id.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        Some(raw) => DeleteScope::One(
            raw.parse::<ConversationId>()
                .map_err(|_| AppError::Validation(format!("Invalid conversation ID: {raw}")))?,
        ),
        None => DeleteScope::All,
    };

    let deleted = state.history_service.delete_history(&session_id, scope).await?;
    Ok(Json(json!({ "success": true, "deleted": deleted })))
}
