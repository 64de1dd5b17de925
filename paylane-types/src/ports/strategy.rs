//! Provider strategy port trait.
//!
//! Every payment provider integrates through this four-method contract.
//! New providers plug in by implementing it and registering with the
//! strategy selector; the engine never learns provider wire formats.

use serde::{Deserialize, Serialize};

use crate::domain::{Money, PaymentId, PaymentMethod, PaymentStatus};
use crate::error::StrategyError;

/// Provider-facing view of a payment being created.
#[derive(Debug, Clone)]
pub struct ProviderPaymentRequest {
    pub payment_id: PaymentId,
    pub order_number: String,
    pub amount: Money,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub metadata: Option<String>,
}

/// Provider-facing view of a settlement attempt.
#[derive(Debug, Clone)]
pub struct ProviderProcessRequest {
    pub payment_id: PaymentId,
    pub external_reference: Option<String>,
    pub amount: Money,
}

/// Provider-facing view of a refund.
#[derive(Debug, Clone)]
pub struct ProviderRefundRequest {
    pub payment_id: PaymentId,
    pub external_reference: String,
    pub amount: Money,
}

/// Normalized outcome of a create or process call.
///
/// `success: false` is an expected provider decline; the engine records
/// it as a `Failed` outcome instead of erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentResult {
    pub success: bool,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl PaymentResult {
    /// A successful provider response.
    pub fn ok(
        status: PaymentStatus,
        external_reference: Option<String>,
        payment_url: Option<String>,
    ) -> Self {
        Self {
            success: true,
            status,
            external_reference,
            payment_url,
            error_message: None,
        }
    }

    /// An expected provider decline.
    pub fn failed(status: PaymentStatus, message: impl Into<String>) -> Self {
        Self {
            success: false,
            status,
            external_reference: None,
            payment_url: None,
            error_message: Some(message.into()),
        }
    }
}

/// Normalized outcome of a refund call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl RefundResult {
    pub fn ok(refund_id: impl Into<String>) -> Self {
        Self {
            success: true,
            refund_id: Some(refund_id.into()),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            refund_id: None,
            error_message: Some(message.into()),
        }
    }
}

/// Normalized outcome of a read-only status lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentStatusResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

/// Uniform contract every payment provider implements.
///
/// Expected failures (declines, unsupported operations) come back as
/// results with `success: false`; `Err` is reserved for faults the
/// provider adapter could not normalize.
#[async_trait::async_trait]
pub trait PaymentStrategy: Send + Sync + 'static {
    /// The method this strategy serves.
    fn method(&self) -> PaymentMethod;

    /// Opens the payment on the provider side.
    async fn create_payment(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<PaymentResult, StrategyError>;

    /// Settles or re-polls the payment, returning the mapped status.
    async fn process_payment(
        &self,
        req: &ProviderProcessRequest,
    ) -> Result<PaymentResult, StrategyError>;

    /// Returns money to the customer.
    async fn refund_payment(
        &self,
        req: &ProviderRefundRequest,
    ) -> Result<RefundResult, StrategyError>;

    /// Read-only provider-side status lookup.
    async fn payment_status(
        &self,
        external_reference: &str,
    ) -> Result<PaymentStatusResult, StrategyError>;
}
