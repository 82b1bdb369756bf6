//! Contact form mailer.
//!
//! Validates a submission, renders HTML and plain-text bodies, and hands the
//! email to an [`EmailSender`]. User-supplied text is HTML-escaped before it
//! is placed in the HTML body.

use chrono::{DateTime, Utc};
use tracing::{error, info};

use compass_types::contact::{ContactForm, EmailReceipt, OutgoingEmail};
use compass_types::error::ContactError;

use super::sender::EmailSender;

/// Sends contact form submissions to a fixed inbox.
pub struct ContactService<S: EmailSender> {
    sender: S,
    from: String,
    to: Vec<String>,
}

impl<S: EmailSender> ContactService<S> {
    pub fn new(sender: S, from: impl Into<String>, to: Vec<String>) -> Self {
        Self {
            sender,
            from: from.into(),
            to,
        }
    }

    /// Validate, render and deliver a submission. Returns the provider's id.
    #[tracing::instrument(name = "send_contact", skip_all)]
    pub async fn submit(&self, form: &ContactForm) -> Result<EmailReceipt, ContactError> {
        validate(form)?;
        if self.to.is_empty() {
            return Err(ContactError::Delivery("no recipient inbox configured".to_string()));
        }

        let email = render(form, &self.from, &self.to, Utc::now());
        match self.sender.send(&email).await {
            Ok(receipt) => {
                info!(email_id = %receipt.id, "Contact email sent");
                Ok(receipt)
            }
            Err(e) => {
                error!(error = %e, "Contact email failed");
                Err(e)
            }
        }
    }
}

/// Every field is required.
pub fn validate(form: &ContactForm) -> Result<(), ContactError> {
    let fields = [
        &form.first_name,
        &form.last_name,
        &form.email,
        &form.subject,
        &form.message,
    ];
    if fields.iter().any(|f| f.trim().is_empty()) {
        return Err(ContactError::InvalidInput("All fields are required".to_string()));
    }
    Ok(())
}

/// Build the outgoing email for a validated form.
pub fn render(
    form: &ContactForm,
    from: &str,
    to: &[String],
    sent_at: DateTime<Utc>,
) -> OutgoingEmail {
    let first = escape_html(form.first_name.trim());
    let last = escape_html(form.last_name.trim());
    let email = escape_html(form.email.trim());
    let subject = escape_html(form.subject.trim());
    let message = escape_html(&form.message).replace('\n', "<br>");
    let timestamp = sent_at.format("%Y-%m-%d %H:%M:%S UTC");

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
  <div style="background: linear-gradient(135deg, #3b82f6, #8b5cf6); padding: 20px; border-radius: 8px 8px 0 0;">
    <h1 style="color: white; margin: 0; font-size: 24px;">New Contact Form Submission</h1>
    <p style="color: #e0e7ff; margin: 5px 0 0 0;">MyCareerCompass</p>
  </div>
  <div style="background: #f8fafc; padding: 20px; border: 1px solid #e2e8f0;">
    <h2 style="color: #1e293b; margin-top: 0;">Contact Information</h2>
    <p><strong>Name:</strong> {first} {last}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Subject:</strong> {subject}</p>
    <h2 style="color: #1e293b;">Message</h2>
    <div style="background: #f1f5f9; padding: 15px; border-left: 4px solid #3b82f6;">{message}</div>
    <p style="color: #1e40af; font-size: 14px;">Reply directly to this email to respond to {first}.</p>
  </div>
  <p style="text-align: center; color: #64748b; font-size: 12px;">Sent from the MyCareerCompass contact form at {timestamp}</p>
</div>"#
    );

    let text = format!(
        "New Contact Form Submission - MyCareerCompass\n\n\
         From: {} {}\n\
         Email: {}\n\
         Subject: {}\n\n\
         Message:\n{}\n\n\
         ---\n\
         Sent from MyCareerCompass\n\
         Timestamp: {timestamp}\n",
        form.first_name.trim(),
        form.last_name.trim(),
        form.email.trim(),
        form.subject.trim(),
        form.message,
    );

    OutgoingEmail {
        from: from.to_string(),
        to: to.to_vec(),
        subject: format!("Contact Form: {}", form.subject.trim()),
        reply_to: form.email.trim().to_string(),
        html,
        text,
    }
}

/// Escape the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<OutgoingEmail>>,
        fail: bool,
    }

    impl EmailSender for RecordingSender {
        fn send(
            &self,
            email: &OutgoingEmail,
        ) -> impl Future<Output = Result<EmailReceipt, ContactError>> + Send {
            self.sent.lock().unwrap().push(email.clone());
            let fail = self.fail;
            async move {
                if fail {
                    Err(ContactError::Delivery("rejected".to_string()))
                } else {
                    Ok(EmailReceipt {
                        id: "email-123".to_string(),
                    })
                }
            }
        }
    }

    fn form() -> ContactForm {
        ContactForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Mentoring".to_string(),
            message: "Line one\nLine <two>".to_string(),
        }
    }

    fn service(fail: bool) -> ContactService<RecordingSender> {
        ContactService::new(
            RecordingSender {
                fail,
                ..Default::default()
            },
            "Compass <noreply@example.com>",
            vec!["inbox@example.com".to_string()],
        )
    }

    #[test]
    fn test_validate_requires_every_field() {
        assert!(validate(&form()).is_ok());
        let mut missing = form();
        missing.subject = "  ".to_string();
        assert!(matches!(validate(&missing), Err(ContactError::InvalidInput(_))));
        assert!(validate(&ContactForm::default()).is_err());
    }

    #[test]
    fn test_render_escapes_and_formats() {
        let to = ["to@example.com".to_string()];
        let email = render(&form(), "from@example.com", &to, Utc::now());
        assert_eq!(email.subject, "Contact Form: Mentoring");
        assert_eq!(email.reply_to, "ada@example.com");
        assert!(email.html.contains("Line one<br>Line &lt;two&gt;"));
        assert!(!email.html.contains("<two>"));
        assert!(email.text.contains("From: Ada Lovelace"));
        assert!(email.text.contains("Line one\nLine <two>"));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[tokio::test]
    async fn test_submit_delivers_and_returns_receipt() {
        let service = service(false);
        let receipt = service.submit(&form()).await.unwrap();
        assert_eq!(receipt.id, "email-123");
        let sent = service.sender.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, vec!["inbox@example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_submit_invalid_form_sends_nothing() {
        let service = service(false);
        let err = service.submit(&ContactForm::default()).await.unwrap_err();
        assert!(matches!(err, ContactError::InvalidInput(_)));
        assert!(service.sender.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_propagates_delivery_failure() {
        let err = service(true).submit(&form()).await.unwrap_err();
        assert!(matches!(err, ContactError::Delivery(_)));
    }
}
