//! Scriptable sandbox gateways for development and tests.
//!
//! Each sandbox gateway answers with canned provider responses chosen
//! by a [`SandboxBehavior`], so full payment lifecycles can be driven
//! without any provider credentials.

use tracing::debug;

use paylane_types::{Money, ProviderPaymentRequest, StrategyError};

use crate::stripe::{CheckoutSession, GatewayRefund, PaymentIntent, StripeGateway};
use crate::tabby::{TabbyGateway, TabbyPayment, TabbyRefund, TabbySession};

/// How a sandbox gateway answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SandboxBehavior {
    /// Payments settle successfully
    Approve,
    /// Payments are declined by the provider
    Decline,
    /// Payments stay in flight indefinitely
    StayProcessing,
    /// Every call fails with a gateway fault
    Fault,
}

impl std::str::FromStr for SandboxBehavior {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" => Ok(SandboxBehavior::Approve),
            "decline" => Ok(SandboxBehavior::Decline),
            "processing" => Ok(SandboxBehavior::StayProcessing),
            "fault" => Ok(SandboxBehavior::Fault),
            other => Err(format!(
                "Unknown sandbox behavior: {other}. Supported: approve, decline, processing, fault"
            )),
        }
    }
}

impl std::fmt::Display for SandboxBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SandboxBehavior::Approve => write!(f, "approve"),
            SandboxBehavior::Decline => write!(f, "decline"),
            SandboxBehavior::StayProcessing => write!(f, "processing"),
            SandboxBehavior::Fault => write!(f, "fault"),
        }
    }
}

fn sandbox_reference(prefix: &str) -> String {
    format!("{}_sandbox_{:08x}", prefix, rand::random::<u32>())
}

// ─────────────────────────────────────────────────────────────────────────────
// Stripe sandbox
// ─────────────────────────────────────────────────────────────────────────────

/// Sandbox stand-in for the Stripe wire client.
pub struct SandboxStripeGateway {
    behavior: SandboxBehavior,
}

impl SandboxStripeGateway {
    pub fn new(behavior: SandboxBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait::async_trait]
impl StripeGateway for SandboxStripeGateway {
    async fn create_checkout(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<CheckoutSession, StrategyError> {
        if self.behavior == SandboxBehavior::Fault {
            return Err(StrategyError::Gateway(
                "Sandbox stripe gateway unavailable".into(),
            ));
        }
        let reference = sandbox_reference("pi");
        debug!(order_number = %req.order_number, %reference, "Sandbox stripe checkout opened");
        Ok(CheckoutSession {
            payment_url: format!("https://checkout.stripe.sandbox/pay/{reference}"),
            reference,
        })
    }

    async fn retrieve_intent(&self, reference: &str) -> Result<PaymentIntent, StrategyError> {
        let status = match self.behavior {
            SandboxBehavior::Approve => "succeeded",
            SandboxBehavior::Decline => "requires_payment_method",
            SandboxBehavior::StayProcessing => "processing",
            SandboxBehavior::Fault => {
                return Err(StrategyError::Gateway(
                    "Sandbox stripe gateway unavailable".into(),
                ));
            }
        };
        debug!(%reference, status, "Sandbox stripe intent retrieved");
        Ok(PaymentIntent {
            reference: reference.to_string(),
            status: status.to_string(),
            amount: None,
        })
    }

    async fn create_refund(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<GatewayRefund, StrategyError> {
        if self.behavior == SandboxBehavior::Fault {
            return Err(StrategyError::Gateway(
                "Sandbox stripe gateway unavailable".into(),
            ));
        }
        debug!(%reference, %amount, "Sandbox stripe refund issued");
        Ok(GatewayRefund {
            refund_id: sandbox_reference("re"),
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tabby sandbox
// ─────────────────────────────────────────────────────────────────────────────

/// Sandbox stand-in for the Tabby wire client.
pub struct SandboxTabbyGateway {
    behavior: SandboxBehavior,
}

impl SandboxTabbyGateway {
    pub fn new(behavior: SandboxBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait::async_trait]
impl TabbyGateway for SandboxTabbyGateway {
    async fn create_session(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<TabbySession, StrategyError> {
        if self.behavior == SandboxBehavior::Fault {
            return Err(StrategyError::Gateway(
                "Sandbox tabby gateway unavailable".into(),
            ));
        }
        let reference = sandbox_reference("tabby");
        debug!(order_number = %req.order_number, %reference, "Sandbox tabby session opened");
        Ok(TabbySession {
            checkout_url: format!("https://checkout.tabby.sandbox/{reference}"),
            reference,
            status: "new".to_string(),
        })
    }

    async fn retrieve_payment(&self, reference: &str) -> Result<TabbyPayment, StrategyError> {
        let status = match self.behavior {
            SandboxBehavior::Approve => "authorized",
            SandboxBehavior::Decline => "rejected",
            SandboxBehavior::StayProcessing => "new",
            SandboxBehavior::Fault => {
                return Err(StrategyError::Gateway(
                    "Sandbox tabby gateway unavailable".into(),
                ));
            }
        };
        debug!(%reference, status, "Sandbox tabby payment retrieved");
        Ok(TabbyPayment {
            reference: reference.to_string(),
            status: status.to_string(),
            amount: None,
        })
    }

    async fn capture_payment(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<TabbyPayment, StrategyError> {
        if self.behavior == SandboxBehavior::Fault {
            return Err(StrategyError::Gateway(
                "Sandbox tabby gateway unavailable".into(),
            ));
        }
        debug!(%reference, %amount, "Sandbox tabby capture");
        Ok(TabbyPayment {
            reference: reference.to_string(),
            status: "closed".to_string(),
            amount: None,
        })
    }

    async fn create_refund(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<TabbyRefund, StrategyError> {
        if self.behavior == SandboxBehavior::Fault {
            return Err(StrategyError::Gateway(
                "Sandbox tabby gateway unavailable".into(),
            ));
        }
        debug!(%reference, %amount, "Sandbox tabby refund issued");
        Ok(TabbyRefund {
            refund_id: sandbox_reference("tabby_re"),
        })
    }
}
