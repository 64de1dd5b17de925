//! Webhook transport: POSTs the notification to a configured URL.
//!
//! Lets merchant backends receive payment notifications without any
//! messaging provider in between.

use tracing::info;

use paylane_types::{NotificationChannel, NotificationRequest};

use crate::orchestrator::{ChannelError, ChannelTransport};

pub struct WebhookChannel {
    client: reqwest::Client,
    target_url: String,
}

impl WebhookChannel {
    pub fn new(target_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            target_url,
        }
    }
}

#[async_trait::async_trait]
impl ChannelTransport for WebhookChannel {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Push
    }

    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError> {
        info!(
            subject = %request.subject,
            "Sending webhook to {}",
            self.target_url
        );

        // TODO: payload signing so receivers can authenticate the sender
        let resp = self
            .client
            .post(&self.target_url)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ChannelError::Delivery(format!("HTTP {}", resp.status())));
        }
        Ok(())
    }
}
