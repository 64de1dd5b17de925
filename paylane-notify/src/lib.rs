//! Customer notification delivery.
//!
//! Implements the [`paylane_types::Notifier`] port: an orchestrator fans a
//! notification out across registered channel transports and aggregates
//! the per-channel results. A failed channel degrades the outcome, it
//! never raises an error, so notification trouble can not leak back into
//! payment processing.

pub mod channels;
pub mod orchestrator;

pub use channels::{EmailChannel, SmsChannel, WebhookChannel, WhatsappChannel};
pub use orchestrator::{ChannelError, ChannelTransport, NotificationOrchestrator};
