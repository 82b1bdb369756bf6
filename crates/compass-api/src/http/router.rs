//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin) and request tracing.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Chat history
        .route(
            "/history",
            get(handlers::history::get_history)
                .post(handlers::history::save_history)
                .delete(handlers::history::delete_history),
        )
        // Advisor chat (streamed)
        .route("/chat", post(handlers::chat::chat))
        // Quiz
        .route("/quiz", get(handlers::quiz::get_quiz))
        .route("/quiz-analysis", post(handlers::quiz::analyze_quiz))
        // Career browser
        .route("/careers", get(handlers::careers::list_careers))
        // Contact form
        .route("/contact", post(handlers::contact::send_contact))
        // Accounts
        .route("/auth/signup", post(handlers::auth::sign_up))
        .route("/auth/signin", post(handlers::auth::sign_in))
        .route("/auth/signout", post(handlers::auth::sign_out))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
