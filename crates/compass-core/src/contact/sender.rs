//! EmailSender trait and its object-safe wrapper.

use std::future::Future;
use std::pin::Pin;

use compass_types::contact::{EmailReceipt, OutgoingEmail};
use compass_types::error::ContactError;

/// Transactional email delivery backend.
///
/// Implementations live in compass-infra (e.g., `ResendSender`).
pub trait EmailSender: Send + Sync {
    fn send(
        &self,
        email: &OutgoingEmail,
    ) -> impl Future<Output = Result<EmailReceipt, ContactError>> + Send;
}

/// Object-safe version of [`EmailSender`] with a boxed future.
pub trait EmailSenderDyn: Send + Sync {
    fn send_boxed<'a>(
        &'a self,
        email: &'a OutgoingEmail,
    ) -> Pin<Box<dyn Future<Output = Result<EmailReceipt, ContactError>> + Send + 'a>>;
}

impl<T: EmailSender> EmailSenderDyn for T {
    fn send_boxed<'a>(
        &'a self,
        email: &'a OutgoingEmail,
    ) -> Pin<Box<dyn Future<Output = Result<EmailReceipt, ContactError>> + Send + 'a>> {
        Box::pin(self.send(email))
    }
}

/// Type-erased email sender, chosen at startup.
pub struct BoxEmailSender {
    inner: Box<dyn EmailSenderDyn>,
}

impl BoxEmailSender {
    pub fn new<T: EmailSender + 'static>(sender: T) -> Self {
        Self {
            inner: Box::new(sender),
        }
    }
}

impl EmailSender for BoxEmailSender {
    fn send(
        &self,
        email: &OutgoingEmail,
    ) -> impl Future<Output = Result<EmailReceipt, ContactError>> + Send {
        async move { self.inner.send_boxed(email).await }
    }
}
