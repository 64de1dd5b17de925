//! Transaction ledger entry domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::money::Money;
use super::payment::{PaymentId, PaymentStatus};

/// Unique identifier for a Transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    /// Creates a new random TransactionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a TransactionId from an existing UUID.
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

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The kind of provider interaction a ledger entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Initial provider call made when the payment is created
    Authorization,
    /// Settlement attempt against a previously created payment
    Capture,
    /// Money returned to the customer
    Refund,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Authorization => write!(f, "AUTHORIZATION"),
            TransactionKind::Capture => write!(f, "CAPTURE"),
            TransactionKind::Refund => write!(f, "REFUND"),
        }
    }
}

/// A recorded provider interaction in a payment's ledger.
///
/// Transactions are immutable once created - they represent
/// a historical record of what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// The payment this entry belongs to
    pub payment_id: PaymentId,
    /// Kind of provider interaction
    pub kind: TransactionKind,
    /// Amount moved by this interaction
    pub amount: Money,
    /// Payment status at the moment the entry was appended
    pub status: PaymentStatus,
    /// Raw provider payload or refund identifier, when one exists
    pub response: Option<String>,
    /// When the entry was created
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Creates a new ledger entry snapshotting the given payment status.
    pub fn new(
        payment_id: PaymentId,
        kind: TransactionKind,
        amount: Money,
        status: PaymentStatus,
        response: Option<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            payment_id,
            kind,
            amount,
            status,
            response,
            created_at: Utc::now(),
        }
    }
}
