//! Resend implementation of [`EmailSender`].
//!
//! `POST {base_url}/emails` with a bearer API key. The response body carries
//! the id of the accepted email.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use compass_core::contact::sender::EmailSender;
use compass_types::contact::{EmailReceipt, OutgoingEmail};
use compass_types::error::ContactError;

/// Resend API client. The API key is only exposed when building headers.
pub struct ResendSender {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl ResendSender {
    pub fn new(base_url: &str, api_key: SecretString) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

/// Wire shape of a Resend send request.
#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    reply_to: &'a str,
    html: &'a str,
    text: &'a str,
}

impl<'a> From<&'a OutgoingEmail> for SendEmailBody<'a> {
    fn from(email: &'a OutgoingEmail) -> Self {
        Self {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            reply_to: &email.reply_to,
            html: &email.html,
            text: &email.text,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

impl EmailSender for ResendSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<EmailReceipt, ContactError> {
        let response = self
            .client
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&SendEmailBody::from(email))
            .send()
            .await
            .map_err(|e| ContactError::Delivery(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "Resend API error response");
            return Err(ContactError::Delivery(format!("HTTP {status}: {body}")));
        }

        let parsed: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| ContactError::Delivery(format!("failed to parse response: {e}")))?;
        Ok(EmailReceipt { id: parsed.id })
    }
}
