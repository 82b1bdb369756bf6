//! Account sign-up, sign-in and sign-out delegated to a hosted identity
//! provider.

pub mod provider;
pub mod service;
