//! Data Transfer Objects (DTOs) for requests and responses.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::{Currency, Payment, PaymentId, PaymentMethod, PaymentStatus};

// ─────────────────────────────────────────────────────────────────────────────
// Request DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new payment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePaymentRequest {
    /// Merchant order number; generated when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub method: PaymentMethod,
    /// Decimal amount in major units (e.g. 49.99)
    pub amount: Decimal,
    #[serde(default = "default_currency")]
    pub currency: Currency,
    /// Owning user, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Notification contact
    #[validate(email(message = "Customer email is not a valid address"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    /// Notification contact
    #[validate(length(min = 7, message = "Customer phone is too short"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    /// Opaque caller payload, stored and returned uninspected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

fn default_currency() -> Currency {
    Currency::USD
}

/// Request to process (settle) an existing payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessPaymentRequest {
    pub payment_id: PaymentId,
    /// Overrides the stored provider reference when given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
}

/// Request to refund part or all of a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundPaymentRequest {
    pub payment_id: PaymentId,
    /// Decimal refund amount in the payment's currency
    pub amount: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Response DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response after creating or processing a payment.
///
/// Provider-reported declines come back as `success: false` with the
/// persisted payment in its `Failed` state; only unexpected faults
/// surface as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOperationResponse {
    pub success: bool,
    pub status: PaymentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_reference: Option<String>,
    /// Redirect URL for checkout flows; never persisted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub payment: Payment,
}

/// Response after a successful refund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_id: Option<String>,
    pub is_partial: bool,
    pub payment: Payment,
}
