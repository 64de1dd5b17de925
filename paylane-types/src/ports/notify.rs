//! Notification port trait.
//!
//! Downstream of the domain: payment events become notification requests,
//! and an implementation fans them out across its channels. Delivery
//! failures are reported in the outcome, never as errors, because a lost
//! notification must not affect a payment.

use serde::{Deserialize, Serialize};

/// A delivery channel a notification can be sent over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationChannel {
    Email,
    Sms,
    Whatsapp,
    Push,
    /// Expands to every registered channel
    All,
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationChannel::Email => write!(f, "EMAIL"),
            NotificationChannel::Sms => write!(f, "SMS"),
            NotificationChannel::Whatsapp => write!(f, "WHATSAPP"),
            NotificationChannel::Push => write!(f, "PUSH"),
            NotificationChannel::All => write!(f, "ALL"),
        }
    }
}

/// One notification to one recipient, over one or more channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRequest {
    /// Email address or phone number
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub channels: Vec<NotificationChannel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Per-channel delivery result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelDelivery {
    pub channel: NotificationChannel,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Aggregate result of a fan-out.
///
/// `delivered` is true when at least one channel succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationOutcome {
    pub delivered: bool,
    pub success_count: usize,
    pub failure_count: usize,
    pub channels: Vec<ChannelDelivery>,
}

impl NotificationOutcome {
    /// Builds the aggregate from per-channel results.
    pub fn from_deliveries(channels: Vec<ChannelDelivery>) -> Self {
        let success_count = channels.iter().filter(|c| c.success).count();
        let failure_count = channels.len() - success_count;
        Self {
            delivered: success_count > 0,
            success_count,
            failure_count,
            channels,
        }
    }

    /// Outcome for a request that reached no channel at all.
    pub fn empty() -> Self {
        Self {
            delivered: false,
            success_count: 0,
            failure_count: 0,
            channels: Vec::new(),
        }
    }
}

/// Port for sending customer notifications.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync + 'static {
    /// Sends the request over its channels and reports per-channel results.
    async fn send(&self, request: NotificationRequest) -> NotificationOutcome;
}
