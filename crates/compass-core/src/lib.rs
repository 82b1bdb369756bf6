//! Business logic and port trait definitions for Career Compass.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the services built on them. It
//! depends only on `compass-types` -- never on `compass-infra` or any
//! database/IO crate.

pub mod auth;
pub mod careers;
pub mod chat;
pub mod contact;
pub mod history;
pub mod llm;
pub mod quiz;
pub mod session;
