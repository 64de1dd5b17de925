//! SMS transport.

use tracing::info;

use paylane_types::{NotificationChannel, NotificationRequest};

use crate::orchestrator::{ChannelError, ChannelTransport};

pub struct SmsChannel {
    sender_id: String,
}

impl SmsChannel {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
        }
    }
}

#[async_trait::async_trait]
impl ChannelTransport for SmsChannel {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Sms
    }

    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError> {
        if request.recipient.contains('@') {
            return Err(ChannelError::Delivery(format!(
                "Recipient {} is not a phone number",
                request.recipient
            )));
        }
        info!(
            sender_id = %self.sender_id,
            to = %request.recipient,
            "Would send SMS via provider API"
        );
        Ok(())
    }
}
