//! WhatsApp transport.

use tracing::info;

use paylane_types::{NotificationChannel, NotificationRequest};

use crate::orchestrator::{ChannelError, ChannelTransport};

pub struct WhatsappChannel {
    business_number: String,
}

impl WhatsappChannel {
    pub fn new(business_number: impl Into<String>) -> Self {
        Self {
            business_number: business_number.into(),
        }
    }
}

#[async_trait::async_trait]
impl ChannelTransport for WhatsappChannel {
    fn channel(&self) -> NotificationChannel {
        NotificationChannel::Whatsapp
    }

    async fn deliver(&self, request: &NotificationRequest) -> Result<(), ChannelError> {
        if request.recipient.contains('@') {
            return Err(ChannelError::Delivery(format!(
                "Recipient {} is not a phone number",
                request.recipient
            )));
        }
        info!(
            from = %self.business_number,
            to = %request.recipient,
            "Would send WhatsApp message via provider API"
        );
        Ok(())
    }
}
