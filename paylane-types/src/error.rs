//! Error types for the payment engine.

use crate::domain::{Currency, Money, PaymentMethod, PaymentStatus};

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Amount cannot be negative")]
    InvalidAmount,

    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: Currency, got: Currency },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: PaymentStatus,
        to: PaymentStatus,
    },

    #[error("Payment cannot be refunded in status {0}")]
    NotRefundable(PaymentStatus),

    #[error("Refund exceeds remaining refundable amount: requested {requested}, remaining {remaining}")]
    RefundExceedsRemaining { requested: Money, remaining: Money },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Repository-level errors (persistence failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Unexpected provider faults.
///
/// Expected declines travel inside provider results; this type is for
/// failures the strategy could not turn into a result at all.
#[derive(Debug, thiserror::Error)]
pub enum StrategyError {
    #[error("Gateway error: {0}")]
    Gateway(String),
}

/// Operation-level errors returned by the payment service.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported payment method: {0}")]
    UnsupportedMethod(PaymentMethod),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for EngineError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidAmount
            | DomainError::CurrencyMismatch { .. }
            | DomainError::Validation(_) => EngineError::Validation(err.to_string()),
            DomainError::InvalidTransition { .. }
            | DomainError::NotRefundable(_)
            | DomainError::RefundExceedsRemaining { .. } => {
                EngineError::InvalidOperation(err.to_string())
            }
        }
    }
}

impl From<RepoError> for EngineError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => e.into(),
            RepoError::NotFound => EngineError::NotFound("Resource not found".into()),
            RepoError::Conflict(e) => EngineError::Conflict(e),
            RepoError::Storage(e) => EngineError::Internal(e),
        }
    }
}

impl From<StrategyError> for EngineError {
    fn from(err: StrategyError) -> Self {
        match err {
            StrategyError::Gateway(e) => EngineError::Provider(e),
        }
    }
}
