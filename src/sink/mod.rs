//! Notification delivery for roster transitions.

mod discord;

use async_trait::async_trait;
use thiserror::Error;

use crate::roster::Transition;

pub use discord::DiscordWebhook;

/// Glyph prefixed to join announcements.
pub const JOIN_GLYPH: &str = ":inbox_tray:";

/// Glyph prefixed to leave announcements.
pub const LEAVE_GLYPH: &str = ":outbox_tray:";

/// Errors from notification delivery.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Webhook request failed: {0}")]
    Request(String),
    #[error("Webhook request timed out")]
    Timeout,
    #[error("Webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
}

/// Destination for announcement messages.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Attempt to deliver one message.
    async fn send(&self, content: &str) -> Result<(), DeliveryError>;
}

/// Sink that only logs messages. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        tracing::info!(message = %content, "Dry run, not delivering");
        Ok(())
    }
}

/// Sink enum for dispatch.
#[derive(Debug, Clone)]
pub enum Sink {
    Discord(DiscordWebhook),
    Log(LogSink),
}

#[async_trait]
impl NotificationSink for Sink {
    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        match self {
            Self::Discord(s) => s.send(content).await,
            Self::Log(s) => s.send(content).await,
        }
    }
}

/// Format the announcement for a transition.
#[must_use]
pub fn format_message(transition: &Transition) -> String {
    let (glyph, entry) = match transition {
        Transition::Joined(entry) => (JOIN_GLYPH, entry),
        Transition::Left(entry) => (LEAVE_GLYPH, entry),
    };
    format!("{glyph} {} ({})", entry.name, entry.id)
}
