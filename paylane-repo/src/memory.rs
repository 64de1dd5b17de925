//! In-memory repository backed by `DashMap`.
//!
//! Shard locks make each call atomic, which is what the port assumes
//! of a real database transaction.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;

use paylane_types::{Payment, PaymentId, PaymentRepository, RepoError, Transaction};

#[derive(Default)]
pub struct MemoryRepo {
    payments: DashMap<PaymentId, Payment>,
    /// Unique index enforcing one payment per order number
    order_numbers: DashMap<String, PaymentId>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PaymentRepository for MemoryRepo {
    async fn insert(&self, payment: &Payment) -> Result<Payment, RepoError> {
        match self.order_numbers.entry(payment.order_number.clone()) {
            Entry::Occupied(taken) => {
                return Err(RepoError::Conflict(format!(
                    "Order number {} already belongs to payment {}",
                    payment.order_number,
                    taken.get()
                )));
            }
            Entry::Vacant(slot) => {
                slot.insert(payment.id);
            }
        }

        let mut stored = payment.clone();
        stored.take_events();
        self.payments.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, payment: &Payment) -> Result<Payment, RepoError> {
        let mut entry = match self.payments.get_mut(&payment.id) {
            Some(entry) => entry,
            None => return Err(RepoError::NotFound),
        };

        if entry.version != payment.version {
            debug!(
                payment_id = %payment.id,
                stored = entry.version,
                incoming = payment.version,
                "Stale version token on payment update"
            );
            return Err(RepoError::Conflict(format!(
                "Payment {} was modified concurrently",
                payment.id
            )));
        }

        let mut updated = payment.clone();
        updated.take_events();
        updated.version += 1;
        *entry = updated.clone();
        Ok(updated)
    }

    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, RepoError> {
        Ok(self.payments.get(&id).map(|entry| entry.value().clone()))
    }

    async fn transactions_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Vec<Transaction>, RepoError> {
        Ok(self
            .payments
            .get(&payment_id)
            .map(|entry| entry.transactions().to_vec())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylane_types::{Currency, Money, PaymentMethod, PaymentStatus, TransactionKind};
    use rust_decimal_macros::dec;

    fn sample_payment(order_number: &str) -> Payment {
        Payment::new(
            order_number.to_string(),
            PaymentMethod::Stripe,
            Money::new(dec!(100), Currency::USD).unwrap(),
            None,
            Some("dev@example.com".to_string()),
            None,
            None,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_roundtrip() {
        let repo = MemoryRepo::new();
        let payment = sample_payment("ORD-1");

        repo.insert(&payment).await.unwrap();
        let mut loaded = repo.get(payment.id).await.unwrap().unwrap();

        assert_eq!(loaded.order_number, "ORD-1");
        assert_eq!(loaded.version, 1);
        // The stored copy must not carry the aggregate's pending events.
        assert!(loaded.take_events().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_order_number_conflicts() {
        let repo = MemoryRepo::new();
        repo.insert(&sample_payment("ORD-1")).await.unwrap();

        let err = repo.insert(&sample_payment("ORD-1")).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = MemoryRepo::new();
        let payment = sample_payment("ORD-1");
        repo.insert(&payment).await.unwrap();

        let mut loaded = repo.get(payment.id).await.unwrap().unwrap();
        loaded
            .update_status(PaymentStatus::Processing, None)
            .unwrap();
        let updated = repo.update(&loaded).await.unwrap();

        assert_eq!(updated.version, 2);
        assert_eq!(updated.status(), PaymentStatus::Processing);
    }

    #[tokio::test]
    async fn test_stale_version_conflicts_and_writes_nothing() {
        let repo = MemoryRepo::new();
        let payment = sample_payment("ORD-1");
        repo.insert(&payment).await.unwrap();

        // Two copies loaded at version 1; the first write wins.
        let mut first = repo.get(payment.id).await.unwrap().unwrap();
        let mut second = repo.get(payment.id).await.unwrap().unwrap();

        first
            .update_status(PaymentStatus::Processing, None)
            .unwrap();
        repo.update(&first).await.unwrap();

        second
            .update_status(PaymentStatus::Cancelled, None)
            .unwrap();
        let err = repo.update(&second).await.unwrap_err();

        assert!(matches!(err, RepoError::Conflict(_)));
        let stored = repo.get(payment.id).await.unwrap().unwrap();
        assert_eq!(stored.status(), PaymentStatus::Processing);
        assert_eq!(stored.version, 2);
    }

    #[tokio::test]
    async fn test_update_of_unknown_payment_is_not_found() {
        let repo = MemoryRepo::new();
        let payment = sample_payment("ORD-1");

        let err = repo.update(&payment).await.unwrap_err();

        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_ledger_preserves_recording_order() {
        let repo = MemoryRepo::new();
        let mut payment = sample_payment("ORD-1");
        let amount = payment.amount;
        payment
            .record_outcome(
                TransactionKind::Authorization,
                amount,
                PaymentStatus::Processing,
                Some("pi_1".to_string()),
                None,
                None,
            )
            .unwrap();
        payment
            .record_outcome(
                TransactionKind::Capture,
                amount,
                PaymentStatus::Succeeded,
                None,
                None,
                None,
            )
            .unwrap();
        repo.insert(&payment).await.unwrap();

        let ledger = repo.transactions_for_payment(payment.id).await.unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger[0].kind, TransactionKind::Authorization);
        assert_eq!(ledger[1].kind, TransactionKind::Capture);
    }

    #[tokio::test]
    async fn test_ledger_of_unknown_payment_is_empty() {
        let repo = MemoryRepo::new();

        let ledger = repo
            .transactions_for_payment(PaymentId::new())
            .await
            .unwrap();

        assert!(ledger.is_empty());
    }
}
