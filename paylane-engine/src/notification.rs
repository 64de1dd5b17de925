//! Customer notification handler.
//!
//! Subscribes to payment lifecycle events and turns the customer-facing
//! ones into requests for the injected notifier. Created and Processing
//! are internal milestones and send nothing.

use std::sync::Arc;

use tracing::{debug, info, warn};

use paylane_types::{
    DomainEvent, DomainEventKind, NotificationChannel, NotificationRequest, Notifier,
    PaymentRepository,
};

use crate::dispatch::EventHandler;

pub struct PaymentNotificationHandler<R: PaymentRepository> {
    repo: Arc<R>,
    notifier: Arc<dyn Notifier>,
}

impl<R: PaymentRepository> PaymentNotificationHandler<R> {
    pub fn new(repo: Arc<R>, notifier: Arc<dyn Notifier>) -> Self {
        Self { repo, notifier }
    }

    /// Preferred contact: email first, phone second.
    fn recipient(email: Option<&str>, phone: Option<&str>) -> Option<String> {
        email
            .filter(|e| !e.trim().is_empty())
            .or(phone.filter(|p| !p.trim().is_empty()))
            .map(str::to_string)
    }

    /// Contact fields for the event.
    ///
    /// `Succeeded` trusts the payload snapshot; the other kinds re-fetch
    /// the payment for current contacts and fall back to the payload
    /// when the lookup cannot resolve it.
    async fn contacts(&self, event: &DomainEvent) -> (Option<String>, Option<String>) {
        if matches!(event.kind, DomainEventKind::Succeeded { .. }) {
            return (
                event.customer_email.clone(),
                event.customer_phone.clone(),
            );
        }
        match self.repo.get(event.payment_id).await {
            Ok(Some(payment)) => (payment.customer_email, payment.customer_phone),
            Ok(None) => (
                event.customer_email.clone(),
                event.customer_phone.clone(),
            ),
            Err(e) => {
                warn!(
                    "Contact lookup failed for payment {}: {}",
                    event.payment_id, e
                );
                (
                    event.customer_email.clone(),
                    event.customer_phone.clone(),
                )
            }
        }
    }

    /// Subject and body for the customer-facing kinds.
    fn compose(event: &DomainEvent) -> Option<(String, String)> {
        match &event.kind {
            DomainEventKind::Created | DomainEventKind::Processing => None,
            DomainEventKind::Authorized => Some((
                "Payment authorized".to_string(),
                format!(
                    "Your payment of {} for order {} was authorized and will be captured shortly.",
                    event.amount, event.order_number
                ),
            )),
            DomainEventKind::Succeeded { .. } => Some((
                "Payment confirmed".to_string(),
                format!(
                    "Your payment of {} for order {} was successful.",
                    event.amount, event.order_number
                ),
            )),
            DomainEventKind::Failed { reason } => Some((
                "Payment failed".to_string(),
                match reason {
                    Some(reason) => format!(
                        "Your payment of {} for order {} failed: {}",
                        event.amount, event.order_number, reason
                    ),
                    None => format!(
                        "Your payment of {} for order {} failed.",
                        event.amount, event.order_number
                    ),
                },
            )),
            DomainEventKind::Refunded {
                refund_amount,
                is_partial,
            } => Some((
                if *is_partial {
                    "Payment partially refunded".to_string()
                } else {
                    "Payment refunded".to_string()
                },
                format!(
                    "A refund of {} was issued for order {}.",
                    refund_amount, event.order_number
                ),
            )),
        }
    }
}

#[async_trait::async_trait]
impl<R: PaymentRepository> EventHandler for PaymentNotificationHandler<R> {
    fn name(&self) -> &str {
        "payment-notifications"
    }

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
        let (subject, body) = match Self::compose(event) {
            Some(parts) => parts,
            None => {
                debug!("No customer notification for {}", event.event_type());
                return Ok(());
            }
        };

        let (email, phone) = self.contacts(event).await;
        let recipient = match Self::recipient(email.as_deref(), phone.as_deref()) {
            Some(recipient) => recipient,
            None => {
                info!(
                    "Payment {} has no contact details, skipping {} notification",
                    event.payment_id,
                    event.event_type()
                );
                return Ok(());
            }
        };

        let outcome = self
            .notifier
            .send(NotificationRequest {
                recipient,
                subject,
                body,
                channels: vec![NotificationChannel::All],
                metadata: Some(serde_json::json!({
                    "payment_id": event.payment_id,
                    "order_number": event.order_number,
                    "event_type": event.event_type(),
                })),
            })
            .await;

        if outcome.delivered {
            debug!(
                "Notification for {} on payment {} delivered over {} of {} channels",
                event.event_type(),
                event.payment_id,
                outcome.success_count,
                outcome.channels.len()
            );
        } else {
            warn!(
                "Notification for {} on payment {} reached no channel",
                event.event_type(),
                event.payment_id
            );
        }
        Ok(())
    }
}
