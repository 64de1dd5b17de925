//! # Payment Engine
//!
//! Application service layer for the payment core.
//!
//! ## Architecture
//!
//! - `service` - Payment operations (create, process, refund, history)
//! - `selector` - Registry mapping payment methods to provider strategies
//! - `dispatch` - Domain event fan-out to registered handlers
//! - `notification` - Handler turning lifecycle events into customer
//!   notifications
//!
//! The service is generic over `R: PaymentRepository`, allowing
//! different repository implementations to be injected.

pub mod dispatch;
pub mod notification;
pub mod selector;
pub mod service;


pub use dispatch::{EventDispatcher, EventHandler};
pub use notification::PaymentNotificationHandler;
pub use selector::StrategySelector;
pub use service::PaymentService;
