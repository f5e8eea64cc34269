use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use tracing::info;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Writes the message to the log instead of delivering it.
#[derive(Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        info!(%to, %subject, %body, "email (log only)");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct WebhookMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Hands the message to an HTTP mail relay as JSON.
#[derive(Clone)]
pub struct WebhookMailer {
    client: reqwest::Client,
    url: String,
    from: String,
}

impl WebhookMailer {
    pub fn new(url: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for WebhookMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let message = WebhookMessage {
            from: &self.from,
            to,
            subject,
            body,
        };
        self.client
            .post(&self.url)
            .json(&message)
            .send()
            .await
            .context("mail relay request")?
            .error_for_status()
            .context("mail relay response")?;
        info!(%to, %subject, "email handed to relay");
        Ok(())
    }
}
