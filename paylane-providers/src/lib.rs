//! # Paylane Providers
//!
//! Provider strategy adapters for the payment engine.
//!
//! Each provider implements the `PaymentStrategy` port from
//! `paylane-types`, normalizing its native status vocabulary through a
//! pure mapping function. The wire clients (`StripeGateway`,
//! `TabbyGateway`) are themselves ports: production implementations live
//! with their SDKs, while the `sandbox` module ships scriptable
//! stand-ins for development and tests.

pub mod cash;
pub mod sandbox;
pub mod stripe;
pub mod tabby;

pub use cash::CashStrategy;
pub use sandbox::{SandboxBehavior, SandboxStripeGateway, SandboxTabbyGateway};
pub use stripe::{StripeGateway, StripeStrategy, map_stripe_status};
pub use tabby::{TabbyGateway, TabbyStrategy, map_tabby_status};
