//! SMTP mail transport.
//!
//! Wraps lettre behind a small trait so services depend on an abstraction
//! and tests can substitute a recording fake. Delivery is synchronous from
//! the caller's point of view; there are no retries, any transport failure
//! is surfaced immediately.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use std::time::Duration;

use crate::config::{SmtpConfig, SMTP_TIMEOUT_SECONDS};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Logo embedded into every outgoing HTML email as an inline attachment.
pub const LOGO_PNG: &[u8] = include_bytes!("../../assets/logo.png");

/// Content-id the HTML template references for the inline logo.
pub const LOGO_CONTENT_ID: &str = "logo";

/// A fully prepared outgoing email: recipients validated, body already
/// wrapped in the shared template.
#[derive(Debug, Clone)]
pub struct OutgoingEmail {
    pub to: String,
    pub cc: Vec<String>,
    pub subject: String,
    pub html_body: String,
}

/// Mail transport collaborator.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn deliver(&self, email: OutgoingEmail) -> AppResult<()>;
}

/// lettre-backed SMTP implementation of `MailTransport`.
///
/// Without SMTP_HOST configured the mailer logs messages instead of sending,
/// which keeps development environments self-contained.
pub struct SmtpMailer {
    config: SmtpConfig,
}

impl SmtpMailer {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }

    fn build_transport(&self, host: &str) -> AppResult<SmtpTransport> {
        let mut builder = if self.config.use_tls {
            SmtpTransport::starttls_relay(host)
        } else {
            SmtpTransport::relay(host)
        }
        .map_err(|e| AppError::mail(format!("Failed to create SMTP transport: {}", e)))?
        .port(self.config.port)
        .timeout(Some(Duration::from_secs(SMTP_TIMEOUT_SECONDS)));

        if let (Some(user), Some(pass)) = (&self.config.username, &self.config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(builder.build())
    }

    fn build_message(&self, email: &OutgoingEmail) -> AppResult<Message> {
        let from: Mailbox = format!("{} <{}>", self.config.from_name, self.config.from_email)
            .parse()
            .map_err(|e| AppError::mail(format!("Invalid from address: {}", e)))?;

        let to: Mailbox = email
            .to
            .parse()
            .map_err(|e| AppError::mail(format!("Invalid to address: {}", e)))?;

        let mut builder = Message::builder().from(from).to(to).subject(&email.subject);

        for cc in &email.cc {
            let mailbox: Mailbox = cc
                .parse()
                .map_err(|e| AppError::mail(format!("Invalid cc address: {}", e)))?;
            builder = builder.cc(mailbox);
        }

        // HTML part plus the logo the template references by content-id
        let logo_type: ContentType = "image/png"
            .parse()
            .map_err(|_| AppError::internal("Invalid logo content type"))?;

        let body = MultiPart::related()
            .singlepart(
                SinglePart::builder()
                    .header(ContentType::TEXT_HTML)
                    .body(email.html_body.clone()),
            )
            .singlepart(
                Attachment::new_inline(LOGO_CONTENT_ID.to_string())
                    .body(LOGO_PNG.to_vec(), logo_type),
            );

        builder
            .multipart(body)
            .map_err(|e| AppError::mail(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn deliver(&self, email: OutgoingEmail) -> AppResult<()> {
        let host = match &self.config.host {
            Some(host) => host.clone(),
            None => {
                // Development mode: log the email instead of sending
                tracing::warn!("SMTP not configured - logging email instead of sending");
                tracing::info!(
                    to = %email.to,
                    cc = ?email.cc,
                    subject = %email.subject,
                    "=== EMAIL (not sent) ==="
                );
                return Ok(());
            }
        };

        let message = self.build_message(&email)?;
        let transport = self.build_transport(&host)?;

        // lettre's SmtpTransport is blocking; run the send on the blocking pool
        tokio::task::spawn_blocking(move || {
            transport
                .send(&message)
                .map(|_| ())
                .map_err(|e| AppError::mail(e.to_string()))
        })
        .await
        .map_err(|e| AppError::internal(format!("Mail task join error: {}", e)))??;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}
