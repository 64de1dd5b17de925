//! Stripe strategy: card capture via redirect checkout.

use paylane_types::{
    Money, PaymentMethod, PaymentResult, PaymentStatus, PaymentStatusResult, PaymentStrategy,
    ProviderPaymentRequest, ProviderProcessRequest, ProviderRefundRequest, RefundResult,
    StrategyError,
};

/// Maps Stripe's payment-intent vocabulary onto the payment lifecycle.
///
/// Unknown native statuses map to `Processing`: a status this table has
/// never seen is treated as still in flight, never as settled.
pub fn map_stripe_status(native: &str) -> PaymentStatus {
    match native {
        "succeeded" => PaymentStatus::Succeeded,
        "requires_payment_method" => PaymentStatus::Failed,
        "processing" | "requires_confirmation" | "requires_action" => PaymentStatus::Processing,
        "canceled" => PaymentStatus::Cancelled,
        _ => PaymentStatus::Processing,
    }
}

/// A checkout session opened on the provider side.
#[derive(Debug, Clone)]
pub struct CheckoutSession {
    pub reference: String,
    pub payment_url: String,
}

/// A payment intent as retrieved from the provider.
#[derive(Debug, Clone)]
pub struct PaymentIntent {
    pub reference: String,
    pub status: String,
    pub amount: Option<Money>,
}

/// A refund issued on the provider side.
#[derive(Debug, Clone)]
pub struct GatewayRefund {
    pub refund_id: String,
}

/// Wire client for the Stripe API.
///
/// Production implementations wrap the SDK/HTTP client; the sandbox
/// implementation lives in [`crate::sandbox`].
#[async_trait::async_trait]
pub trait StripeGateway: Send + Sync + 'static {
    /// Opens a checkout session the customer is redirected to.
    async fn create_checkout(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<CheckoutSession, StrategyError>;

    /// Retrieves the payment intent behind a checkout session.
    async fn retrieve_intent(&self, reference: &str) -> Result<PaymentIntent, StrategyError>;

    /// Issues a (possibly partial) refund against an intent.
    async fn create_refund(
        &self,
        reference: &str,
        amount: &Money,
    ) -> Result<GatewayRefund, StrategyError>;
}

/// Card payments over Stripe checkout.
pub struct StripeStrategy<G: StripeGateway> {
    gateway: G,
}

impl<G: StripeGateway> StripeStrategy<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

#[async_trait::async_trait]
impl<G: StripeGateway> PaymentStrategy for StripeStrategy<G> {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Stripe
    }

    async fn create_payment(
        &self,
        req: &ProviderPaymentRequest,
    ) -> Result<PaymentResult, StrategyError> {
        // Redirect flow: the customer pays on the hosted page, so the
        // payment is in flight until processed.
        let session = self.gateway.create_checkout(req).await?;
        Ok(PaymentResult::ok(
            PaymentStatus::Processing,
            Some(session.reference),
            Some(session.payment_url),
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
                    "No payment intent reference to process",
                ));
            }
        };

        let intent = self.gateway.retrieve_intent(reference).await?;
        let status = map_stripe_status(&intent.status);
        if status == PaymentStatus::Failed {
            return Ok(PaymentResult::failed(
                status,
                format!("Payment intent {} declined ({})", intent.reference, intent.status),
            ));
        }
        Ok(PaymentResult::ok(status, Some(intent.reference), None))
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
        let intent = self.gateway.retrieve_intent(external_reference).await?;
        Ok(PaymentStatusResult {
            success: true,
            status: Some(map_stripe_status(&intent.status)),
            amount: intent.amount,
            error_message: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylane_types::{Currency, PaymentId};
    use rust_decimal_macros::dec;

    struct StubGateway {
        intent_status: &'static str,
    }

    #[async_trait::async_trait]
    impl StripeGateway for StubGateway {
        async fn create_checkout(
            &self,
            req: &ProviderPaymentRequest,
        ) -> Result<CheckoutSession, StrategyError> {
            Ok(CheckoutSession {
                reference: "pi_1".to_string(),
                payment_url: format!("https://checkout.test/{}", req.order_number),
            })
        }

        async fn retrieve_intent(&self, reference: &str) -> Result<PaymentIntent, StrategyError> {
            Ok(PaymentIntent {
                reference: reference.to_string(),
                status: self.intent_status.to_string(),
                amount: None,
            })
        }

        async fn create_refund(
            &self,
            _reference: &str,
            _amount: &Money,
        ) -> Result<GatewayRefund, StrategyError> {
            Ok(GatewayRefund {
                refund_id: "re_1".to_string(),
            })
        }
    }

    fn payment_request() -> ProviderPaymentRequest {
        ProviderPaymentRequest {
            payment_id: PaymentId::new(),
            order_number: "ORD-1".to_string(),
            amount: Money::new(dec!(20), Currency::USD).unwrap(),
            customer_email: None,
            customer_phone: None,
            metadata: None,
        }
    }

    #[test]
    fn test_status_mapping_table() {
        assert_eq!(map_stripe_status("succeeded"), PaymentStatus::Succeeded);
        assert_eq!(map_stripe_status("requires_payment_method"), PaymentStatus::Failed);
        assert_eq!(map_stripe_status("processing"), PaymentStatus::Processing);
        assert_eq!(map_stripe_status("requires_confirmation"), PaymentStatus::Processing);
        assert_eq!(map_stripe_status("requires_action"), PaymentStatus::Processing);
        assert_eq!(map_stripe_status("canceled"), PaymentStatus::Cancelled);
    }

    #[test]
    fn test_unknown_status_maps_to_processing() {
        assert_eq!(map_stripe_status("requires_capture"), PaymentStatus::Processing);
        assert_eq!(map_stripe_status(""), PaymentStatus::Processing);
    }

    #[tokio::test]
    async fn test_create_opens_checkout_session() {
        let strategy = StripeStrategy::new(StubGateway {
            intent_status: "processing",
        });

        let result = strategy.create_payment(&payment_request()).await.unwrap();

        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Processing);
        assert_eq!(result.external_reference.as_deref(), Some("pi_1"));
        assert!(result.payment_url.is_some());
    }

    #[tokio::test]
    async fn test_process_without_reference_is_a_decline() {
        let strategy = StripeStrategy::new(StubGateway {
            intent_status: "succeeded",
        });

        let result = strategy
            .process_payment(&ProviderProcessRequest {
                payment_id: PaymentId::new(),
                external_reference: None,
                amount: Money::new(dec!(20), Currency::USD).unwrap(),
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status, PaymentStatus::Failed);
    }

    #[tokio::test]
    async fn test_process_maps_decline() {
        let strategy = StripeStrategy::new(StubGateway {
            intent_status: "requires_payment_method",
        });

        let result = strategy
            .process_payment(&ProviderProcessRequest {
                payment_id: PaymentId::new(),
                external_reference: Some("pi_1".to_string()),
                amount: Money::new(dec!(20), Currency::USD).unwrap(),
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status, PaymentStatus::Failed);
        assert!(result.error_message.is_some());
    }

    #[tokio::test]
    async fn test_process_maps_success() {
        let strategy = StripeStrategy::new(StubGateway {
            intent_status: "succeeded",
        });

        let result = strategy
            .process_payment(&ProviderProcessRequest {
                payment_id: PaymentId::new(),
                external_reference: Some("pi_1".to_string()),
                amount: Money::new(dec!(20), Currency::USD).unwrap(),
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Succeeded);
    }
}
