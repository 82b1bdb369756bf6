//! HTTP API layer for Career Compass.
//!
//! Axum router with CORS and request tracing. Every failure is returned as
//! `{ "success": false, "error": "..." }`.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod router;
