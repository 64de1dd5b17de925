//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (in-memory, SQL) will implement this trait.

use crate::domain::{Payment, PaymentId, Transaction};
use crate::error::RepoError;

/// The main persistence port for payments.
///
/// Each call is assumed transactional. Implementations must not persist
/// the aggregate's pending-event buffer: drain it from the stored copy
/// so a reloaded payment never carries stale events.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Persists a new payment.
    ///
    /// Fails with `Conflict` when the order number is already taken.
    async fn insert(&self, payment: &Payment) -> Result<Payment, RepoError>;

    /// Persists a mutated payment using its version token.
    ///
    /// The stored version must equal the aggregate's token; the token is
    /// incremented on success and the updated payment returned. A stale
    /// token fails with `Conflict` and nothing is written.
    async fn update(&self, payment: &Payment) -> Result<Payment, RepoError>;

    /// Gets a payment by ID.
    async fn get(&self, id: PaymentId) -> Result<Option<Payment>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // Ledger
    // ─────────────────────────────────────────────────────────────────────────────

    /// Lists a payment's ledger entries, oldest first.
    async fn transactions_for_payment(
        &self,
        payment_id: PaymentId,
    ) -> Result<Vec<Transaction>, RepoError>;
}
