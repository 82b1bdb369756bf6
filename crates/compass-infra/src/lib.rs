//! Infrastructure layer for Career Compass.
//!
//! Contains implementations of the traits defined in `compass-core`:
//! SQLite history storage, the OpenAI-compatible LLM provider, the Resend
//! email sender, the Supabase identity provider, and the file-backed session
//! store. Also owns config file loading and data directory resolution.

pub mod auth;
pub mod config;
pub mod email;
pub mod llm;
pub mod session;
pub mod sqlite;
