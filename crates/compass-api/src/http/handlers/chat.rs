//! Streaming advisor chat.
//!
//! POST /chat with `{ messages }`. The reply is streamed as a plain-text body,
//! one chunk per model token batch. A provider failure before the first event
//! is a 500 JSON error; a failure mid-stream ends the body early. No retry is
//! attempted.

use axum::body::Body;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures_util::{stream, StreamExt, TryStreamExt};
use serde::Deserialize;

use compass_core::chat::advisor::text_deltas;
use compass_types::error::ChatError;
use compass_types::llm::Message;

use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

pub async fn chat(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ChatRequest>,
) -> Result<Response, AppError> {
    let request = state.advisor.build_request(&body.messages)?;
    let provider = state.llm().map_err(|e| AppError::Internal(e.to_string()))?;

    tracing::debug!(
        provider = provider.name(),
        message_count = request.messages.len(),
        "Streaming chat reply"
    );

    let mut events = provider.stream(request);
    let first = match events.next().await {
        Some(Err(e)) => {
            tracing::error!(error = %e, "Chat request failed upstream");
            return Err(ChatError::Llm(e).into());
        }
        first => first,
    };

    let chunks = text_deltas(stream::iter(first).chain(events))
        .inspect_err(|e| tracing::error!(error = %e, "Chat stream failed"));

    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        Body::from_stream(chunks),
    )
        .into_response())
}
