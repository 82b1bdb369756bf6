//! Session-scoped chat history: the repository port, title resolution and
//! the persistence service built on top of them.

pub mod repository;
pub mod service;
pub mod title;
