//! # Paylane Types
//!
//! Domain types and port traits for the payment processing engine.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Money, Payment, Transaction, DomainEvent)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Currency, DomainEvent, DomainEventKind, Money, Payment, PaymentId, PaymentMethod,
    PaymentStatus, Transaction, TransactionId, TransactionKind,
};
pub use dto::*;
pub use error::{DomainError, EngineError, RepoError, StrategyError};
pub use ports::{
    ChannelDelivery, NotificationChannel, NotificationOutcome, NotificationRequest, Notifier,
    PaymentRepository, PaymentResult, PaymentStatusResult, PaymentStrategy,
    ProviderPaymentRequest, ProviderProcessRequest, ProviderRefundRequest, RefundResult,
};
