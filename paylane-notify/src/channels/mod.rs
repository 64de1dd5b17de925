//! Channel transports.
//!
//! Email, SMS and WhatsApp log what they would hand to a provider API;
//! wiring a real provider means filling in one `deliver` body. The
//! webhook transport performs a real HTTP POST.

pub mod email;
pub mod sms;
pub mod webhook;
pub mod whatsapp;

pub use email::EmailChannel;
pub use sms::SmsChannel;
pub use webhook::WebhookChannel;
pub use whatsapp::WhatsappChannel;
