//! Notification delivery.
//!
//! One `Notifier` capability with interchangeable channel implementations
//! selected by configuration. Delivery failure is reported but never
//! invalidates the projection that produced the message.

mod ntfy;
mod webhook;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Result;

/// How urgent a notification is. Channels map this to their own priority
/// or styling scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Warning,
}

serde_plain::derive_display_from_serialize!(Severity);
serde_plain::derive_fromstr_from_deserialize!(Severity);

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(title: impl Into<String>, body: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            severity,
        }
    }
}

/// One configured notification channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChannelConfig {
    /// An ntfy-style push topic, e.g. `https://ntfy.sh/my-topic`.
    Ntfy { url: String },
    /// A generic webhook that accepts a JSON POST.
    Webhook { url: String },
}

/// Delivers a notification to one destination.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<()>;

    /// A short human-readable description for logging.
    fn describe(&self) -> String;
}

/// Fans a notification out to every configured channel.
///
/// Per-channel failures are logged; the broker fails only when no channel
/// accepted the message.
pub struct Broker {
    channels: Vec<Box<dyn Notifier>>,
}

impl Broker {
    pub fn from_config(configs: &[ChannelConfig]) -> Self {
        let channels = configs
            .iter()
            .map(|config| -> Box<dyn Notifier> {
                match config {
                    ChannelConfig::Ntfy { url } => Box::new(ntfy::NtfyChannel::new(url)),
                    ChannelConfig::Webhook { url } => Box::new(webhook::WebhookChannel::new(url)),
                }
            })
            .collect();
        Self { channels }
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    pub async fn send(&self, notification: &Notification) -> Result<()> {
        if self.channels.is_empty() {
            bail!("No notification channels are configured");
        }
        let mut delivered = 0usize;
        for channel in &self.channels {
            match channel.send(notification).await {
                Ok(()) => {
                    debug!("Delivered '{}' via {}", notification.title, channel.describe());
                    delivered += 1;
                }
                Err(e) => {
                    warn!("Failed to deliver via {}: {e:#}", channel.describe());
                }
            }
        }
        if delivered == 0 {
            bail!(
                "All {} notification channels failed for '{}'",
                self.channels.len(),
                notification.title
            );
        }
        Ok(())
    }
}
