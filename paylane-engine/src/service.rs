//! Payment Application Service
//!
//! Orchestrates payment operations through the repository, strategy and
//! dispatch ports. Contains NO provider or transport logic - pure
//! business orchestration.
//!
//! Every mutation follows the same shape: validate, mutate the aggregate
//! through [`Payment::record_outcome`], persist, and only then dispatch
//! the events the mutation raised. Events from a mutation that failed to
//! persist are dropped with it.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{instrument, warn};
use uuid::Uuid;
use validator::Validate;

use paylane_types::{
    CreatePaymentRequest, EngineError, Money, Payment, PaymentId, PaymentOperationResponse,
    PaymentRepository, PaymentStatus, PaymentStatusResult, ProcessPaymentRequest,
    ProviderPaymentRequest, ProviderProcessRequest, ProviderRefundRequest, RefundPaymentRequest,
    RefundResponse, Transaction, TransactionKind,
};

use crate::dispatch::EventDispatcher;
use crate::selector::StrategySelector;

/// Application service for payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile time.
/// This enables:
/// - Swapping repositories without code changes
/// - Testing with the in-memory repo
/// - Compile-time checks for port implementation
pub struct PaymentService<R: PaymentRepository> {
    repo: Arc<R>,
    strategies: StrategySelector,
    dispatcher: EventDispatcher,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service over the given ports.
    pub fn new(repo: Arc<R>, strategies: StrategySelector, dispatcher: EventDispatcher) -> Self {
        Self {
            repo,
            strategies,
            dispatcher,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a payment and opens it with its provider.
    ///
    /// The aggregate is persisted in `Pending` before the provider
    /// round-trip, so a provider fault leaves a retriable payment
    /// behind rather than nothing. A provider decline comes back as
    /// `success: false` with the payment persisted in `Failed`.
    #[instrument(skip(self, req), fields(method = %req.method))]
    pub async fn create_payment(
        &self,
        req: CreatePaymentRequest,
    ) -> Result<PaymentOperationResponse, EngineError> {
        req.validate()
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        if req.amount <= Decimal::ZERO {
            return Err(EngineError::Validation("Amount must be positive".into()));
        }
        let amount = Money::new(req.amount, req.currency)?;
        let order_number = req.order_number.unwrap_or_else(generate_order_number);

        // Resolve the strategy before touching storage so an unsupported
        // method cannot leave a dangling payment behind.
        let strategy = self.strategies.get(req.method)?;

        let mut payment = Payment::new(
            order_number,
            req.method,
            amount,
            req.user_id,
            req.customer_email,
            req.customer_phone,
            req.metadata,
        )?;

        let created_events = payment.take_events();
        let mut payment = self.repo.insert(&payment).await?;
        self.dispatcher.dispatch_all(&created_events).await;

        let result = strategy
            .create_payment(&ProviderPaymentRequest {
                payment_id: payment.id,
                order_number: payment.order_number.clone(),
                amount,
                customer_email: payment.customer_email.clone(),
                customer_phone: payment.customer_phone.clone(),
                metadata: payment.metadata.clone(),
            })
            .await?;

        let annotation = serde_json::to_string(&result).ok();
        if result.success {
            payment.record_outcome(
                TransactionKind::Authorization,
                amount,
                result.status,
                result.external_reference.clone(),
                annotation,
                None,
            )?;
        } else {
            warn!(
                payment_id = %payment.id,
                error = result.error_message.as_deref().unwrap_or("unknown"),
                "Provider declined payment creation"
            );
            payment.record_outcome(
                TransactionKind::Authorization,
                amount,
                result.status,
                None,
                annotation,
                result.error_message.clone(),
            )?;
        }

        let events = payment.take_events();
        let stored = self.repo.update(&payment).await?;
        self.dispatcher.dispatch_all(&events).await;

        Ok(PaymentOperationResponse {
            success: result.success,
            status: stored.status(),
            external_reference: stored.external_reference.clone(),
            payment_url: result.payment_url,
            error_message: result.error_message,
            payment: stored,
        })
    }

    /// Confirms or re-polls an in-flight payment with its provider.
    ///
    /// The caller's `external_reference` overrides the stored one; when
    /// both are absent the strategy decides how to fail.
    #[instrument(skip(self, req), fields(payment_id = %req.payment_id))]
    pub async fn process_payment(
        &self,
        req: ProcessPaymentRequest,
    ) -> Result<PaymentOperationResponse, EngineError> {
        let mut payment = self.get_payment(req.payment_id).await?;
        if payment.status().is_terminal() {
            return Err(EngineError::InvalidOperation(format!(
                "Payment in status {} cannot be processed",
                payment.status()
            )));
        }
        let strategy = self.strategies.get(payment.method)?;

        let amount = payment.amount;
        let external_reference = req
            .external_reference
            .or_else(|| payment.external_reference.clone());

        let result = strategy
            .process_payment(&ProviderProcessRequest {
                payment_id: payment.id,
                external_reference,
                amount,
            })
            .await?;

        let annotation = serde_json::to_string(&result).ok();
        if result.success {
            payment.record_outcome(
                TransactionKind::Capture,
                amount,
                result.status,
                result.external_reference.clone(),
                annotation,
                None,
            )?;
        } else {
            warn!(
                payment_id = %payment.id,
                error = result.error_message.as_deref().unwrap_or("unknown"),
                "Provider declined payment processing"
            );
            payment.record_outcome(
                TransactionKind::Capture,
                amount,
                result.status,
                None,
                annotation,
                result.error_message.clone(),
            )?;
        }

        let events = payment.take_events();
        let stored = self.repo.update(&payment).await?;
        self.dispatcher.dispatch_all(&events).await;

        Ok(PaymentOperationResponse {
            success: result.success,
            status: stored.status(),
            external_reference: stored.external_reference.clone(),
            payment_url: result.payment_url,
            error_message: result.error_message,
            payment: stored,
        })
    }

    /// Refunds part or all of a settled payment.
    ///
    /// Provider refusal surfaces as `Internal` with nothing mutated; a
    /// refund that does not exhaust the remaining refundable amount
    /// moves the payment to `PartiallyRefunded` instead of `Refunded`.
    #[instrument(skip(self, req), fields(payment_id = %req.payment_id))]
    pub async fn refund_payment(
        &self,
        req: RefundPaymentRequest,
    ) -> Result<RefundResponse, EngineError> {
        if req.amount <= Decimal::ZERO {
            return Err(EngineError::Validation(
                "Refund amount must be positive".into(),
            ));
        }

        let mut payment = self.get_payment(req.payment_id).await?;
        let refund = Money::new(req.amount, payment.amount.currency())?;
        payment.validate_refund(&refund)?;

        let external_reference = match payment.external_reference.as_deref() {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => {
                return Err(EngineError::InvalidInput(
                    "Payment has no provider reference to refund against".into(),
                ));
            }
        };

        let strategy = self.strategies.get(payment.method)?;
        let result = strategy
            .refund_payment(&ProviderRefundRequest {
                payment_id: payment.id,
                external_reference,
                amount: refund,
            })
            .await
            .map_err(|e| EngineError::Internal(format!("Refund failed: {e}")))?;

        if !result.success {
            return Err(EngineError::Internal(format!(
                "Refund failed: {}",
                result
                    .error_message
                    .as_deref()
                    .unwrap_or("provider rejected the refund")
            )));
        }

        let remaining = payment.remaining_refundable()?;
        let is_partial = refund.amount() < remaining.amount();
        let new_status = if is_partial {
            PaymentStatus::PartiallyRefunded
        } else {
            PaymentStatus::Refunded
        };

        let annotation = serde_json::to_string(&result).ok();
        payment.record_outcome(
            TransactionKind::Refund,
            refund,
            new_status,
            None,
            annotation,
            None,
        )?;

        let events = payment.take_events();
        let stored = self.repo.update(&payment).await?;
        self.dispatcher.dispatch_all(&events).await;

        Ok(RefundResponse {
            success: true,
            refund_id: result.refund_id,
            is_partial,
            payment: stored,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────────

    /// Gets a payment by ID.
    pub async fn get_payment(&self, id: PaymentId) -> Result<Payment, EngineError> {
        self.repo
            .get(id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| EngineError::NotFound(format!("Payment {}", id))))
    }

    /// Lists a payment's ledger entries, oldest first. Read-only.
    pub async fn get_payment_history(
        &self,
        id: PaymentId,
    ) -> Result<Vec<Transaction>, EngineError> {
        // Verify the payment exists first
        let _ = self.get_payment(id).await?;

        self.repo
            .transactions_for_payment(id)
            .await
            .map_err(Into::into)
    }

    /// Read-only provider-side status lookup.
    ///
    /// Requires a provider reference; payments that never reached their
    /// provider have no status to look up.
    pub async fn get_payment_status(
        &self,
        id: PaymentId,
    ) -> Result<PaymentStatusResult, EngineError> {
        let payment = self.get_payment(id).await?;
        let reference = match payment.external_reference.as_deref() {
            Some(r) if !r.trim().is_empty() => r.to_string(),
            _ => {
                return Err(EngineError::InvalidInput(
                    "Payment has no provider reference".into(),
                ));
            }
        };
        let strategy = self.strategies.get(payment.method)?;
        strategy.payment_status(&reference).await.map_err(Into::into)
    }
}

/// Generates a merchant order number for requests that omit one.
fn generate_order_number() -> String {
    format!("PAY-{}", Uuid::new_v4())
}
