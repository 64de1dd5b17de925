//! Domain models for the payment engine.

pub mod event;
pub mod money;
pub mod payment;
pub mod transaction;

pub use event::{DomainEvent, DomainEventKind};
pub use money::{Currency, Money};
pub use payment::{Payment, PaymentId, PaymentMethod, PaymentStatus};
pub use transaction::{Transaction, TransactionId, TransactionKind};
