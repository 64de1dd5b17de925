//! Fan-out of one notification across every requested channel.

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, instrument, warn};

use paylane_types::{
    ChannelDelivery, NotificationChannel, NotificationOutcome, NotificationRequest, Notifier,
};

/// A transport-level delivery failure.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// One concrete delivery mechanism behind a [`NotificationChannel`].
#[async_trait::async_trait]
pub trait ChannelTransport: Send + Sync + 'static {
    /// The channel this transport serves.
    fn channel(&self) -> NotificationChannel;

    /// Delivers the notification to its recipient.
    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError>;
}

/// Fans notifications out across registered transports.
///
/// Transports run concurrently and independently: one channel failing
/// neither stops the others nor surfaces as an error. The aggregate
/// outcome reports what reached the recipient.
pub struct NotificationOrchestrator {
    transports: Vec<Arc<dyn ChannelTransport>>,
}

impl NotificationOrchestrator {
    pub fn new() -> Self {
        Self {
            transports: Vec::new(),
        }
    }

    /// Registers a transport. Called once per channel at startup.
    pub fn register(&mut self, transport: Arc<dyn ChannelTransport>) {
        info!("Registered notification channel: {}", transport.channel());
        self.transports.push(transport);
    }

    /// Transports matching the requested channels.
    ///
    /// `All` expands to every registered transport.
    fn resolve(&self, channels: &[NotificationChannel]) -> Vec<Arc<dyn ChannelTransport>> {
        if channels.contains(&NotificationChannel::All) {
            return self.transports.clone();
        }
        self.transports
            .iter()
            .filter(|t| channels.contains(&t.channel()))
            .cloned()
            .collect()
    }
}

impl Default for NotificationOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Notifier for NotificationOrchestrator {
    #[instrument(skip(self, request), fields(recipient = %request.recipient))]
    async fn send(&self, request: NotificationRequest) -> NotificationOutcome {
        let transports = self.resolve(&request.channels);
        if transports.is_empty() {
            warn!("No registered transport matches the requested channels");
            return NotificationOutcome::empty();
        }

        let deliveries = join_all(transports.iter().map(|transport| {
            let request = &request;
            async move {
                match transport.deliver(request).await {
                    Ok(()) => ChannelDelivery {
                        channel: transport.channel(),
                        success: true,
                        detail: None,
                    },
                    Err(e) => {
                        warn!(
                            channel = %transport.channel(),
                            error = %e,
                            "Notification channel failed"
                        );
                        ChannelDelivery {
                            channel: transport.channel(),
                            success: false,
                            detail: Some(e.to_string()),
                        }
                    }
                }
            }
        }))
        .await;

        let outcome = NotificationOutcome::from_deliveries(deliveries);
        if !outcome.delivered {
            warn!("Notification reached no channel at all");
        }
        outcome
    }
}
