//! Domain event dispatch.
//!
//! Events are handed to every registered handler after the mutation
//! that raised them is persisted. A failing handler is logged and
//! skipped; event side effects never fail a payment operation.

use std::sync::Arc;

use tracing::{debug, error, info};

use paylane_types::DomainEvent;

/// A side-effect subscriber for payment lifecycle events.
#[async_trait::async_trait]
pub trait EventHandler: Send + Sync + 'static {
    /// Handler name, used in logs.
    fn name(&self) -> &str;

    async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()>;
}

/// Routes each event to every registered handler, in order.
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn EventHandler>) {
        info!("Registered event handler: {}", handler.name());
        self.handlers.push(handler);
    }

    /// Dispatches a drained event batch in raise order.
    pub async fn dispatch_all(&self, events: &[DomainEvent]) {
        for event in events {
            self.dispatch(event).await;
        }
    }

    async fn dispatch(&self, event: &DomainEvent) {
        for handler in &self.handlers {
            match handler.handle(event).await {
                Ok(()) => {
                    debug!(
                        "Handler {} handled {} for payment {}",
                        handler.name(),
                        event.event_type(),
                        event.payment_id
                    );
                }
                Err(e) => {
                    // Keep going: remaining handlers still get the event.
                    error!(
                        "Handler {} failed on {} for payment {}: {:?}",
                        handler.name(),
                        event.event_type(),
                        event.payment_id,
                        e
                    );
                }
            }
        }
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use paylane_types::{Currency, DomainEventKind, Money, PaymentId, PaymentMethod};
    use rust_decimal_macros::dec;

    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl EventHandler for RecordingHandler {
        fn name(&self) -> &str {
            "recording"
        }

        async fn handle(&self, event: &DomainEvent) -> anyhow::Result<()> {
            self.seen
                .lock()
                .unwrap()
                .push(event.event_type().to_string());
            Ok(())
        }
    }

    struct FailingHandler;

    #[async_trait::async_trait]
    impl EventHandler for FailingHandler {
        fn name(&self) -> &str {
            "failing"
        }

        async fn handle(&self, _event: &DomainEvent) -> anyhow::Result<()> {
            anyhow::bail!("handler exploded")
        }
    }

    fn event(kind: DomainEventKind) -> DomainEvent {
        DomainEvent {
            payment_id: PaymentId::new(),
            order_number: "ORD-1".to_string(),
            method: PaymentMethod::Stripe,
            amount: Money::new(dec!(10), Currency::USD).unwrap(),
            customer_email: None,
            customer_phone: None,
            occurred_at: chrono::Utc::now(),
            kind,
        }
    }

    #[tokio::test]
    async fn test_events_reach_handlers_in_raise_order() {
        let recorder = Arc::new(RecordingHandler {
            seen: Mutex::new(Vec::new()),
        });
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(recorder.clone());

        dispatcher
            .dispatch_all(&[
                event(DomainEventKind::Created),
                event(DomainEventKind::Processing),
            ])
            .await;

        let seen = recorder.seen.lock().unwrap();
        assert_eq!(&*seen, &["payment.created", "payment.processing"]);
    }

    #[tokio::test]
    async fn test_failing_handler_does_not_block_later_handlers() {
        let recorder = Arc::new(RecordingHandler {
            seen: Mutex::new(Vec::new()),
        });
        let mut dispatcher = EventDispatcher::new();
        dispatcher.register(Arc::new(FailingHandler));
        dispatcher.register(recorder.clone());

        dispatcher
            .dispatch_all(&[event(DomainEventKind::Created)])
            .await;

        assert_eq!(recorder.seen.lock().unwrap().len(), 1);
    }
}
