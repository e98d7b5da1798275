//! A generic webhook channel that POSTs the notification as JSON.

use anyhow::bail;

use crate::notify::{Notification, Notifier};
use crate::Result;

pub(super) struct WebhookChannel {
    http: reqwest::Client,
    url: String,
}

impl WebhookChannel {
    pub(super) fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookChannel {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let response = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({
                "title": notification.title,
                "body": notification.body,
                "severity": notification.severity,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("Webhook returned {status}: {body}");
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("webhook ({})", self.url)
    }
}
