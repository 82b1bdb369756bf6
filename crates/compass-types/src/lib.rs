//! Shared domain types for Career Compass.
//!
//! This crate contains the core domain types used across the workspace:
//! chat history records, LLM request/response shapes, quiz and career data,
//! contact and account payloads, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror, schemars.

pub mod auth;
pub mod career;
pub mod config;
pub mod contact;
pub mod error;
pub mod history;
pub mod llm;
pub mod quiz;
