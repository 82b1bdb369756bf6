//! Quiz catalog and analysis handlers.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use compass_core::quiz::catalog::{total_questions, QUIZ_SECTIONS};
use compass_types::quiz::{CareerAnalysis, QuizAnswers};

use crate::http::error::AppError;
use crate::http::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct QuizAnalysisRequest {
    #[serde(default)]
    pub answers: QuizAnswers,
}

/// GET /quiz - The fixed question catalog.
pub async fn get_quiz() -> Json<Value> {
    Json(json!({
        "sections": QUIZ_SECTIONS,
        "totalQuestions": total_questions(),
    }))
}

/// POST /quiz-analysis - Career suggestions for a completed quiz.
pub async fn analyze_quiz(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<QuizAnalysisRequest>,
) -> Result<Json<CareerAnalysis>, AppError> {
    let provider = state.llm().map_err(|e| AppError::Internal(e.to_string()))?;
    let analysis = state.quiz_analyzer.analyze(&provider, &body.answers).await?;
    Ok(Json(analysis))
}
