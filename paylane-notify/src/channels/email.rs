//! Email transport.

use tracing::info;

use paylane_types::{NotificationChannel, NotificationRequest};

use crate::orchestrator::{ChannelError, ChannelTransport};

pub struct EmailChannel {
    sender: String,
    // In a real deployment this holds an SES/SendGrid client
}

impl EmailChannel {
    pub fn new(sender: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
        }
    }
}

#[async_trait::async_trait]
impl ChannelTransport for EmailChannel {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Email
    }

    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError> {
        if !request.recipient.contains('@') {
            return Err(ChannelError::Delivery(format!(
                "Recipient {} is not an email address",
                request.recipient
            )));
        }
        info!(
            from = %self.sender,
            to = %request.recipient,
            subject = %request.subject,
            "Would send email via provider API"
        );
        Ok(())
    }
}
