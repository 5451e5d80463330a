//! Email dispatch service.
//!
//! Validates recipient syntax, wraps body HTML in the shared layout and
//! hands the result to the mail transport. Transport failures come back as
//! a generic delivery failure carrying the original message; there are no
//! retries.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{MailTransport, OutgoingEmail};
use crate::utils::wrap_html;

/// Permissive recipient syntax check: something before an `@`, anything
/// non-empty after it. Final validation belongs to the mail relay.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@(.+)$").expect("email regex"));

/// True when the address passes the recipient syntax check.
pub fn is_valid_address(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// Email service trait for dependency injection.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a canned test message to a single address.
    async fn send_test_email(&self, address: String) -> AppResult<()>;

    /// Send an HTML email with carbon copies.
    async fn send_with_cc(
        &self,
        to: String,
        cc: Vec<String>,
        subject: String,
        html_body: String,
    ) -> AppResult<()>;
}

/// Concrete implementation of EmailService delegating to a MailTransport.
pub struct EmailDispatcher {
    transport: Arc<dyn MailTransport>,
}

impl EmailDispatcher {
    pub fn new(transport: Arc<dyn MailTransport>) -> Self {
        Self { transport }
    }

    fn validate_address(address: &str) -> AppResult<()> {
        if is_valid_address(address) {
            Ok(())
        } else {
            Err(AppError::validation(format!(
                "Invalid email address: {}",
                address
            )))
        }
    }
}

#[async_trait]
impl EmailService for EmailDispatcher {
    async fn send_test_email(&self, address: String) -> AppResult<()> {
        let address = address.trim().to_string();
        Self::validate_address(&address)?;

        let email = OutgoingEmail {
            to: address,
            cc: Vec::new(),
            subject: "Procurement service test message".to_string(),
            html_body: wrap_html("<p>This is a test message. Delivery is working.</p>"),
        };

        self.transport.deliver(email).await
    }

    async fn send_with_cc(
        &self,
        to: String,
        cc: Vec<String>,
        subject: String,
        html_body: String,
    ) -> AppResult<()> {
        let to = to.trim().to_string();
        Self::validate_address(&to)?;

        let cc: Vec<String> = cc.into_iter().map(|a| a.trim().to_string()).collect();
        for address in &cc {
            Self::validate_address(address)?;
        }

        if subject.trim().is_empty() {
            return Err(AppError::validation("Subject is required"));
        }

        let email = OutgoingEmail {
            to,
            cc,
            subject,
            html_body: wrap_html(&html_body),
        };

        self.transport.deliver(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::is_valid_address;

    #[test]
    fn accepts_plain_addresses() {
        assert!(is_valid_address("user@domain.tld"));
        assert!(is_valid_address("first.last+tag@corp.example"));
    }

    #[test]
    fn rejects_addresses_without_at() {
        assert!(!is_valid_address("userdomain.tld"));
        assert!(!is_valid_address(""));
    }

    #[test]
    fn rejects_empty_local_part() {
        assert!(!is_valid_address("@domain.tld"));
    }
}

#[cfg(test)]
mod dispatcher_tests {
    use super::*;
    use crate::infra::MockMailTransport;

    #[tokio::test]
    async fn rejects_invalid_recipient_before_touching_transport() {
        // No expectations set: any delivery attempt would panic the mock
        let transport = MockMailTransport::new();
        let dispatcher = EmailDispatcher::new(Arc::new(transport));

        let err = dispatcher
            .send_test_email("not-an-address".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn wraps_body_and_forwards_cc_list() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .withf(|email| {
                email.to == "user@example.com"
                    && email.cc == vec!["boss@example.com".to_string()]
                    && email.html_body.contains("<p>Thanks!</p>")
                    && email.html_body.contains("cid:logo")
            })
            .returning(|_| Ok(()));

        let dispatcher = EmailDispatcher::new(Arc::new(transport));
        dispatcher
            .send_with_cc(
                " user@example.com ".to_string(),
                vec!["boss@example.com".to_string()],
                "Survey".to_string(),
                "<p>Thanks!</p>".to_string(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_cc_address_fails_validation() {
        let transport = MockMailTransport::new();
        let dispatcher = EmailDispatcher::new(Arc::new(transport));

        let err = dispatcher
            .send_with_cc(
                "user@example.com".to_string(),
                vec!["no-at-sign".to_string()],
                "Survey".to_string(),
                "<p>Hi</p>".to_string(),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn transport_failure_carries_the_original_message() {
        let mut transport = MockMailTransport::new();
        transport
            .expect_deliver()
            .returning(|_| Err(AppError::mail("connection refused")));

        let dispatcher = EmailDispatcher::new(Arc::new(transport));
        let err = dispatcher
            .send_test_email("user@example.com".to_string())
            .await
            .unwrap_err();

        match err {
            AppError::Mail(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected mail error, got {:?}", other),
        }
    }
}
