//! Transactional email delivery.

pub mod resend;
