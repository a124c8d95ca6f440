//! Verification and password-reset emails.

use askama::Template;
use std::sync::Arc;
use tracing::{error, info};

use crate::infrastructure::email::{EmailError, EmailMessage, EmailSender};

#[derive(Template)]
#[template(path = "email/verify_email.html")]
struct VerifyEmailTemplate<'a> {
    host: &'a str,
    username: &'a str,
    token: &'a str,
}

#[derive(Template)]
#[template(path = "email/reset_password.html")]
struct ResetPasswordTemplate<'a> {
    host: &'a str,
    username: &'a str,
    token: &'a str,
}

/// Renders templated messages and hands them to an [`EmailSender`].
///
/// Delivery runs on a detached task; failures are logged and never reach the
/// request that triggered them.
pub struct EmailService {
    sender: Arc<dyn EmailSender>,
    base_url: String,
}

impl EmailService {
    /// `base_url` is the public origin embedded in links, without a trailing slash.
    pub fn new(sender: Arc<dyn EmailSender>, base_url: impl Into<String>) -> Self {
        Self {
            sender,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn verification_message(
        &self,
        to: &str,
        username: &str,
        token: &str,
    ) -> Result<EmailMessage, EmailError> {
        let html = VerifyEmailTemplate {
            host: &self.base_url,
            username,
            token,
        }
        .render()?;

        Ok(EmailMessage {
            to: to.to_string(),
            subject: "Confirm your email".to_string(),
            html,
        })
    }

    pub fn password_reset_message(
        &self,
        to: &str,
        username: &str,
        token: &str,
    ) -> Result<EmailMessage, EmailError> {
        let html = ResetPasswordTemplate {
            host: &self.base_url,
            username,
            token,
        }
        .render()?;

        Ok(EmailMessage {
            to: to.to_string(),
            subject: "Password reset".to_string(),
            html,
        })
    }

    pub fn send_verification(&self, to: &str, username: &str, token: &str) {
        self.dispatch(self.verification_message(to, username, token));
    }

    pub fn send_password_reset(&self, to: &str, username: &str, token: &str) {
        self.dispatch(self.password_reset_message(to, username, token));
    }

    fn dispatch(&self, message: Result<EmailMessage, EmailError>) {
        let message = match message {
            Ok(m) => m,
            Err(e) => {
                error!(error = %e, "Failed to render email");
                return;
            }
        };

        let sender = Arc::clone(&self.sender);
        tokio::spawn(async move {
            let to = message.to.clone();
            let subject = message.subject.clone();
            match sender.send(message).await {
                Ok(()) => info!(%to, %subject, "Email dispatched"),
                Err(e) => error!(%to, %subject, error = %e, "Failed to send email"),
            }
        });
    }
}
