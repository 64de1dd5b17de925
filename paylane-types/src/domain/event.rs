//! Domain events raised by the payment aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;
use super::payment::{PaymentId, PaymentMethod};

/// An event describing something that happened to a payment.
///
/// Events are buffered on the aggregate while an operation runs and
/// drained exactly once after the mutation is persisted. They carry
/// enough of the payment snapshot for downstream handlers to act
/// without a mandatory re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub payment_id: PaymentId,
    pub order_number: String,
    pub method: PaymentMethod,
    /// Full payment amount (refund tranches live on the kind)
    pub amount: Money,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub occurred_at: DateTime<Utc>,
    pub kind: DomainEventKind,
}

/// What happened, with the variant-specific payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEventKind {
    Created,
    Processing,
    Authorized,
    Succeeded {
        external_reference: Option<String>,
    },
    Failed {
        reason: Option<String>,
    },
    Refunded {
        refund_amount: Money,
        is_partial: bool,
    },
}

impl DomainEvent {
    /// Stable dotted event name, usable as a routing key.
    pub fn event_type(&self) -> &'static str {
        match self.kind {
            DomainEventKind::Created => "payment.created",
            DomainEventKind::Processing => "payment.processing",
            DomainEventKind::Authorized => "payment.authorized",
            DomainEventKind::Succeeded { .. } => "payment.succeeded",
            DomainEventKind::Failed { .. } => "payment.failed",
            DomainEventKind::Refunded { .. } => "payment.refunded",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Currency;
    use rust_decimal_macros::dec;

    fn event(kind: DomainEventKind) -> DomainEvent {
        DomainEvent {
            payment_id: PaymentId::new(),
            order_number: "ORD-1".to_string(),
            method: PaymentMethod::Stripe,
            amount: Money::new(dec!(10), Currency::USD).unwrap(),
            customer_email: None,
            customer_phone: None,
            occurred_at: Utc::now(),
            kind,
        }
    }

    #[test]
    fn test_event_type_names() {
        assert_eq!(event(DomainEventKind::Created).event_type(), "payment.created");
        assert_eq!(
            event(DomainEventKind::Succeeded {
                external_reference: Some("pi_1".to_string())
            })
            .event_type(),
            "payment.succeeded"
        );
        assert_eq!(
            event(DomainEventKind::Refunded {
                refund_amount: Money::new(dec!(5), Currency::USD).unwrap(),
                is_partial: true,
            })
            .event_type(),
            "payment.refunded"
        );
    }
}
