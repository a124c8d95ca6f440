//! Mail provider client over a JSON HTTP API.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use super::sender::{EmailError, EmailMessage, EmailSender};
use crate::config::MailConfig;

#[derive(Serialize)]
struct SendRequest<'a> {
    from: String,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Posts `{from, to, subject, html}` to the provider endpoint.
///
/// Authenticates with `Authorization: Bearer <MAIL_API_TOKEN>` when a token is
/// configured. Any non-2xx status is reported as [`EmailError::Rejected`].
pub struct HttpEmailSender {
    client: reqwest::Client,
    api_url: String,
    from: String,
}

impl HttpEmailSender {
    pub fn new(config: &MailConfig) -> Result<Self, EmailError> {
        let mut headers = HeaderMap::new();
        if let Some(ref token) = config.api_token
            && let Ok(value) = HeaderValue::from_str(&format!("Bearer {}", token))
        {
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            from: format!("{} <{}>", config.from_name, config.from),
        })
    }
}

#[async_trait]
impl EmailSender for HttpEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), EmailError> {
        let request = SendRequest {
            from: self.from.clone(),
            to: &message.to,
            subject: &message.subject,
            html: &message.html,
        };

        let response = self.client.post(&self.api_url).json(&request).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(to = %message.to, status = status.as_u16(), "Mail provider rejected message");
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %message.to, subject = %message.subject, "Email sent");
        Ok(())
    }
}
