//! Payment aggregate root and its lifecycle state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::{DomainEvent, DomainEventKind};
use super::money::Money;
use super::transaction::{Transaction, TransactionKind};
use crate::error::DomainError;

/// Unique identifier for a Payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(Uuid);

impl PaymentId {
    /// Creates a new random PaymentId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a PaymentId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for PaymentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PaymentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PaymentId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The provider a payment is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Card capture via redirect checkout
    Stripe,
    /// Buy-now-pay-later via redirect checkout
    Tabby,
    /// Collected offline, no external tracking
    Cash,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Stripe => write!(f, "STRIPE"),
            PaymentMethod::Tabby => write!(f, "TABBY"),
            PaymentMethod::Cash => write!(f, "CASH"),
        }
    }
}

/// Lifecycle states of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Authorized,
    Succeeded,
    Failed,
    Cancelled,
    Refunded,
    PartiallyRefunded,
}

impl PaymentStatus {
    /// Returns true when the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Failed | PaymentStatus::Cancelled | PaymentStatus::Refunded
        )
    }

    /// Returns true when a refund may be issued against this status.
    pub fn is_refund_eligible(&self) -> bool {
        matches!(
            self,
            PaymentStatus::Succeeded | PaymentStatus::Authorized | PaymentStatus::PartiallyRefunded
        )
    }

    /// The lifecycle transition table.
    ///
    /// Terminal states reject everything, including self-loops, so a
    /// duplicate provider callback surfaces as an error instead of
    /// silently re-raising events. The first provider response after
    /// creation may land on any non-refund status.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;

        match (*self, next) {
            (Failed | Cancelled | Refunded, _) => false,
            (Pending, Pending | Processing | Authorized | Succeeded | Failed | Cancelled) => true,
            (Processing, Processing | Authorized | Succeeded | Failed | Cancelled) => true,
            (
                Authorized,
                Authorized | Succeeded | Failed | Cancelled | Refunded | PartiallyRefunded,
            ) => true,
            (Succeeded, Succeeded | Refunded | PartiallyRefunded) => true,
            (PartiallyRefunded, PartiallyRefunded | Refunded) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "PENDING"),
            PaymentStatus::Processing => write!(f, "PROCESSING"),
            PaymentStatus::Authorized => write!(f, "AUTHORIZED"),
            PaymentStatus::Succeeded => write!(f, "SUCCEEDED"),
            PaymentStatus::Failed => write!(f, "FAILED"),
            PaymentStatus::Cancelled => write!(f, "CANCELLED"),
            PaymentStatus::Refunded => write!(f, "REFUNDED"),
            PaymentStatus::PartiallyRefunded => write!(f, "PARTIALLY_REFUNDED"),
        }
    }
}

/// A payment and its append-only ledger of provider interactions.
///
/// Status moves only through the transition table, and the only way to
/// move status together with a ledger entry is [`Payment::record_outcome`],
/// so the ledger can never disagree with the status it snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Merchant-side order number, unique per payment
    pub order_number: String,
    /// Provider the payment is routed through
    pub method: PaymentMethod,
    /// Full payment amount
    pub amount: Money,
    /// Provider-side identifier, set by the first successful provider call
    pub external_reference: Option<String>,
    /// Owning user, when known
    pub user_id: Option<Uuid>,
    /// Contact for customer notifications
    pub customer_email: Option<String>,
    /// Contact for customer notifications
    pub customer_phone: Option<String>,
    /// Opaque caller-supplied payload, stored and returned uninspected
    pub metadata: Option<String>,
    /// Optimistic-concurrency token, advanced by repository adapters on update
    pub version: u64,
    /// When the payment was created
    pub created_at: DateTime<Utc>,
    /// When the payment was last mutated
    pub updated_at: DateTime<Utc>,
    status: PaymentStatus,
    transactions: Vec<Transaction>,
    #[serde(skip)]
    events: Vec<DomainEvent>,
}

impl Payment {
    /// Creates a new payment in `Pending` and buffers a `Created` event.
    ///
    /// # Validation
    /// - Order number cannot be empty
    pub fn new(
        order_number: String,
        method: PaymentMethod,
        amount: Money,
        user_id: Option<Uuid>,
        customer_email: Option<String>,
        customer_phone: Option<String>,
        metadata: Option<String>,
    ) -> Result<Self, DomainError> {
        if order_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "Order number cannot be empty".into(),
            ));
        }

        let now = Utc::now();
        let mut payment = Self {
            id: PaymentId::new(),
            order_number,
            method,
            amount,
            external_reference: None,
            user_id,
            customer_email,
            customer_phone,
            metadata,
            version: 1,
            created_at: now,
            updated_at: now,
            status: PaymentStatus::Pending,
            transactions: Vec::new(),
            events: Vec::new(),
        };
        payment.push_event(DomainEventKind::Created);
        Ok(payment)
    }

    /// Returns the current lifecycle status.
    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    /// Returns the append-only ledger, oldest entry first.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Drains the pending-event buffer.
    ///
    /// Events are raised at most once: callers drain after a successful
    /// persist, and adapters drain their stored copies so a reloaded
    /// aggregate never carries stale events.
    pub fn take_events(&mut self) -> Vec<DomainEvent> {
        std::mem::take(&mut self.events)
    }

    /// Moves the payment to `new_status`, buffering the mapped event.
    ///
    /// `external_reference` overwrites the stored reference when given.
    /// Fails with `InvalidTransition` when the transition table forbids
    /// the move; nothing is mutated in that case.
    pub fn update_status(
        &mut self,
        new_status: PaymentStatus,
        external_reference: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }
        self.apply_status(new_status, external_reference, None);
        Ok(())
    }

    /// Atomically records a provider outcome: one ledger entry plus the
    /// matching status transition, in a single synchronous step.
    ///
    /// `response` is the raw provider payload kept on the ledger entry;
    /// `reason` is the human-readable message a `Failed` event carries.
    /// The transition is validated before anything is appended, so an
    /// illegal outcome leaves both the ledger and the status untouched.
    pub fn record_outcome(
        &mut self,
        kind: TransactionKind,
        amount: Money,
        new_status: PaymentStatus,
        external_reference: Option<String>,
        response: Option<String>,
        reason: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(new_status) {
            return Err(DomainError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }
        if amount.currency() != self.amount.currency() {
            return Err(DomainError::CurrencyMismatch {
                expected: self.amount.currency(),
                got: amount.currency(),
            });
        }

        self.transactions
            .push(Transaction::new(self.id, kind, amount, new_status, response));
        self.apply_status(new_status, external_reference, reason);
        Ok(())
    }

    /// Total amount refunded so far across the ledger.
    pub fn refunded_amount(&self) -> Result<Money, DomainError> {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Refund)
            .try_fold(Money::zero(self.amount.currency()), |total, t| {
                total.checked_add(t.amount)
            })
    }

    /// Amount still available to refund.
    pub fn remaining_refundable(&self) -> Result<Money, DomainError> {
        self.amount.checked_sub(self.refunded_amount()?)
    }

    /// Checks that a refund of `amount` is allowed right now.
    pub fn validate_refund(&self, amount: &Money) -> Result<(), DomainError> {
        if !self.status.is_refund_eligible() {
            return Err(DomainError::NotRefundable(self.status));
        }
        if amount.currency() != self.amount.currency() {
            return Err(DomainError::CurrencyMismatch {
                expected: self.amount.currency(),
                got: amount.currency(),
            });
        }
        if amount.is_zero() {
            return Err(DomainError::Validation(
                "Refund amount must be positive".into(),
            ));
        }
        let remaining = self.remaining_refundable()?;
        if !remaining.gte(amount) {
            return Err(DomainError::RefundExceedsRemaining {
                requested: *amount,
                remaining,
            });
        }
        Ok(())
    }

    // Transition already validated by the caller.
    fn apply_status(
        &mut self,
        new_status: PaymentStatus,
        external_reference: Option<String>,
        failure_reason: Option<String>,
    ) {
        self.status = new_status;
        if let Some(reference) = external_reference {
            self.external_reference = Some(reference);
        }
        self.updated_at = Utc::now();

        let kind = match new_status {
            // Pending and Cancelled are silent states
            PaymentStatus::Pending | PaymentStatus::Cancelled => return,
            PaymentStatus::Processing => DomainEventKind::Processing,
            PaymentStatus::Authorized => DomainEventKind::Authorized,
            PaymentStatus::Succeeded => DomainEventKind::Succeeded {
                external_reference: self.external_reference.clone(),
            },
            PaymentStatus::Failed => DomainEventKind::Failed {
                reason: failure_reason,
            },
            PaymentStatus::Refunded | PaymentStatus::PartiallyRefunded => {
                DomainEventKind::Refunded {
                    refund_amount: self.last_refund_amount().unwrap_or(self.amount),
                    is_partial: new_status == PaymentStatus::PartiallyRefunded,
                }
            }
        };
        self.push_event(kind);
    }

    fn last_refund_amount(&self) -> Option<Money> {
        self.transactions
            .iter()
            .rev()
            .find(|t| t.kind == TransactionKind::Refund)
            .map(|t| t.amount)
    }

    fn push_event(&mut self, kind: DomainEventKind) {
        self.events.push(DomainEvent {
            payment_id: self.id,
            order_number: self.order_number.clone(),
            method: self.method,
            amount: self.amount,
            customer_email: self.customer_email.clone(),
            customer_phone: self.customer_phone.clone(),
            occurred_at: Utc::now(),
            kind,
        });
    }
}
