//! Discord webhook delivery.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use url::Url;

use super::{DeliveryError, NotificationSink};

/// Connection timeout for webhook requests.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Overall request timeout for webhook requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Webhook request body.
#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    content: &'a str,
}

/// Posts messages to a Discord-compatible webhook.
///
/// Each message is attempted once; there is no retry.
#[derive(Debug, Clone)]
pub struct DiscordWebhook {
    client: Client,
    url: Url,
}

impl DiscordWebhook {
    /// Create a webhook sink for `url`.
    ///
    /// # Errors
    ///
    /// Returns `DeliveryError::Client` if the HTTP client cannot be built.
    pub fn new(url: Url) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(DeliveryError::Client)?;
        Ok(Self { client, url })
    }

    /// Get the webhook URL.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl NotificationSink for DiscordWebhook {
    async fn send(&self, content: &str) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(self.url.clone())
            .header("Content-Type", "application/json")
            .json(&WebhookPayload { content })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DeliveryError::Timeout
                } else {
                    DeliveryError::Request(e.to_string())
                }
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}
