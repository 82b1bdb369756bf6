use thiserror::Error;

use crate::llm::LlmError;

/// Errors from repository operations (used by trait definitions in compass-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the conversation history flow.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("user not found")]
    UserNotFound,

    #[error("conversation not found")]
    ConversationNotFound,

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors from the client-side session store.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage error: {0}")]
    Storage(String),
}

/// Errors from quiz validation and analysis.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("invalid quiz answers: {0}")]
    InvalidAnswers(String),

    #[error("analysis failed: {0}")]
    Llm(#[from] LlmError),

    #[error("analysis did not match the expected schema: {0}")]
    InvalidAnalysis(String),
}

/// Errors from the chat advisor and the client-side orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("a response is already in progress")]
    Busy,

    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Errors from the contact form mailer.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("email delivery failed: {0}")]
    Delivery(String),
}

/// Errors from the hosted identity provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    /// The provider rejected the request (bad credentials, duplicate account...).
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("identity provider not configured")]
    NotConfigured,

    #[error("identity provider error: {0}")]
    Provider(String),
}
