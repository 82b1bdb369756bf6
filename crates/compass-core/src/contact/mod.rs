//! Contact form delivery: the email sender port and the mailer service.

pub mod sender;
pub mod service;
