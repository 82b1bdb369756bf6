//! Hosted identity provider implementations.

pub mod supabase;
