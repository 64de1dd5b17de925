//! Tabby strategy: buy-now-pay-later via redirect checkout.

use paylane_types::{
    Money, PaymentMethod, PaymentResult, PaymentStatus, PaymentStatusResult, PaymentStrategy,
    ProviderPaymentRequest, ProviderProcessRequest, ProviderRefundRequest, RefundResult,
    StrategyError,
};

/// Maps Tabby's session vocabulary onto the payment lifecycle.
///
/// Unknown native statuses map to `Processing`, same rule as the
/// Stripe table.
pub fn map_tabby_status(native: &str) -> PaymentStatus {
    match native {
        "authorized" => PaymentStatus::Authorized,
        "closed" | "captured" => PaymentStatus::Succeeded,
        "rejected" => PaymentStatus::Failed,
        "expired" => PaymentStatus::Cancelled,
        "new" => PaymentStatus::Processing,
        _ => PaymentStatus::Processing,
    }
}

/// A BNPL checkout session opened on the provider side.
#[derive(Debug, Clone)]
pub struct TabbySession {
    pub reference: String,
    pub checkout_url: String,
    pub status: String,
}

/// A Tabby payment as retrieved from the provider.
#[derive(Debug, Clone)]
pub struct TabbyPayment {
    pub reference: String,
    pub status: String,
    pub amount: Option<Money>,
}

/// A refund issued on the provider side.
#[derive(Debug, Clone)]
pub struct TabbyRefund {
    pub refund_id: String,
}

/// Wire client for the Tabby API.
#[async_trait::async_trait]
pub trait TabbyGateway: Send + Sync + 'static {
    /// Opens a BNPL checkout session the customer is redirected to.
    async fn create_session(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<TabbySession, StrategyError>;

    /// Retrieves the payment behind a session.
    async fn retrieve_payment(&self, reference: &str) -> Result<TabbyPayment, StrategyError>;

    /// Captures an authorized payment.
    async fn capture_payment(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<TabbyPayment, StrategyError>;

    /// Issues a (possibly partial) refund against a captured payment.
    async fn create_refund(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<TabbyRefund, StrategyError>;
}

/// BNPL payments over Tabby checkout.
pub struct TabbyStrategy<G: TabbyGateway> {
    gateway: G,
}

impl<G: TabbyGateway> TabbyStrategy<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl<G: TabbyGateway> PaymentStrategy for TabbyStrategy<G> {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Tabby
    }

    async fn create_payment(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<PaymentResult, StrategyError> {
        let session = self.gateway.create_session(req).await?;
        let status = map_tabby_status(&session.status);
        if status == PaymentStatus::Failed {
            return Ok(PaymentResult::failed(
                status,
                format!("Tabby rejected session for order {}", req.order_number),
            ));
        }
        Ok(PaymentResult::ok(
            status,
            Some(session.reference),
            Some(session.checkout_url),
        ))
    }

    async fn process_payment(
        &self,
        req: &ProviderProcessRequest,
    ) -> Result<PaymentResult, StrategyError> {
        let reference = match req.external_reference.as_deref() {
            Some(r) if !r.trim().is_empty() => r,
            _ => {
                return Ok(PaymentResult::failed(
                    PaymentStatus::Failed,
                    "No Tabby session reference to process",
                ));
            }
        };

        let payment = self.gateway.retrieve_payment(reference).await?;
        let status = map_tabby_status(&payment.status);

        // An authorized session is settled by capturing it in the same
        // processing pass.
        if status == PaymentStatus::Authorized {
            let captured = self.gateway.capture_payment(reference, &req.amount).await?;
            let status = map_tabby_status(&captured.status);
            if status == PaymentStatus::Failed {
                return Ok(PaymentResult::failed(
                    status,
                    format!(
                        "Tabby capture of {} rejected ({})",
                        captured.reference, captured.status
                    ),
                ));
            }
            return Ok(PaymentResult::ok(status, Some(captured.reference), None));
        }

        if status == PaymentStatus::Failed {
            return Ok(PaymentResult::failed(
                status,
                format!("Tabby payment {} rejected ({})", payment.reference, payment.status),
            ));
        }
        Ok(PaymentResult::ok(status, Some(payment.reference), None))
    }

    async fn refund_payment(
        &self,
        req: &ProviderRefundRequest,
    ) -> Result<RefundResult, StrategyError> {
        let refund = self
            .gateway
            .create_refund(&req.external_reference, &req.amount)
            .await?;
        Ok(RefundResult::ok(refund.refund_id))
    }

    async fn payment_status(
        &self,
        external_reference: &str,
    ) -> Result<PaymentStatusResult, StrategyError> {
        let payment = self.gateway.retrieve_payment(external_reference).await?;
        Ok(PaymentStatusResult {
            success: true,
            status: Some(map_tabby_status(&payment.status)),
            amount: payment.amount,
            error_message: None,
        })
    }
}
