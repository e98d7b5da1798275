//! An ntfy-style push channel. The notification body is the POST body; the
//! title, priority and tag ride in headers.

use anyhow::bail;

use crate::notify::{Notification, Notifier, Severity};
use crate::Result;

pub(super) struct NtfyChannel {
    http: reqwest::Client,
    url: String,
}

impl NtfyChannel {
    pub(super) fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for NtfyChannel {
    async fn send(&self, notification: &Notification) -> Result<()> {
        let (priority, tags) = match notification.severity {
            Severity::Warning => ("high", "warning"),
            Severity::Success => ("default", "white_check_mark"),
            Severity::Info => ("default", "information_source"),
        };

        let response = self
            .http
            .post(&self.url)
            .header("Title", notification.title.as_str())
            .header("Priority", priority)
            .header("Tags", tags)
            .body(notification.body.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("ntfy returned {status}: {body}");
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!("ntfy ({})", self.url)
    }
}
