//! Session identifier persistence.

pub mod file;
