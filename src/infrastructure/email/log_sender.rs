//! Email sender that only logs.

use async_trait::async_trait;
use tracing::info;

use super::sender::{EmailError, EmailMessage, EmailSender};

/// Used when no mail provider is configured.
#[derive(Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        info!(
            to = %message.to,
            subject = %message.subject,
            "Mail provider disabled, email not sent"
        );
        Ok(())
    }
}
