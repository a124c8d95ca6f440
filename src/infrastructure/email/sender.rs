//! Outbound email abstraction.

use async_trait::async_trait;
use serde::Serialize;

/// Errors raised while delivering an email.
#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("failed to render email template: {0}")]
    Template(#[from] askama::Error),
    #[error("mail provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("mail provider rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// A rendered HTML email ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivers rendered emails.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::HttpEmailSender`] - JSON mail provider API
/// - [`crate::infrastructure::email::LogEmailSender`] - Logs instead of sending
#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError>;
}
