//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod notify;
mod repository;
mod strategy;

pub use notify::{
    ChannelDelivery, NotificationChannel, NotificationOutcome, NotificationRequest, Notifier,
};
pub use repository::PaymentRepository;
pub use strategy::{
    PaymentResult, PaymentStatusResult, PaymentStrategy, ProviderPaymentRequest,
    ProviderProcessRequest, ProviderRefundRequest, RefundResult,
};
