//! HTTP handlers, one module per resource.

pub mod auth;
pub mod careers;
pub mod chat;
pub mod contact;
pub mod history;
pub mod quiz;
