//! Cash strategy: collected offline, no external tracking.

use paylane_types::{
    PaymentMethod, PaymentResult, PaymentStatus, PaymentStatusResult, PaymentStrategy,
    ProviderPaymentRequest, ProviderProcessRequest, ProviderRefundRequest, RefundResult,
    StrategyError,
};

/// Cash on delivery / at counter.
///
/// There is no provider behind this strategy: creating the payment just
/// marks it awaiting collection, and processing it confirms the money
/// was taken. Refunds and status lookups have nothing to ask, so both
/// report failed results.
pub struct CashStrategy;

#[async_trait::async_trait]
impl PaymentStrategy for CashStrategy {
    fn method(&self) -> PaymentMethod {
        PaymentMethod::Cash
    }

    async fn create_payment(
        &self,
        _req: &ProviderPaymentRequest,
    ) -> Result<PaymentResult, StrategyError> {
        Ok(PaymentResult::ok(PaymentStatus::Pending, None, None))
    }

    async fn process_payment(
        &self,
        _req: &ProviderProcessRequest,
    ) -> Result<PaymentResult, StrategyError> {
        // Processing a cash payment means the operator confirmed collection.
        Ok(PaymentResult::ok(PaymentStatus::Succeeded, None, None))
    }

    async fn refund_payment(
        &self,
        _req: &ProviderRefundRequest,
    ) -> Result<RefundResult, StrategyError> {
        Ok(RefundResult::failed(
            "Cash payments cannot be refunded automatically",
        ))
    }

    async fn payment_status(
        &self,
        _external_reference: &str,
    ) -> Result<PaymentStatusResult, StrategyError> {
        Ok(PaymentStatusResult {
            success: false,
            status: None,
            amount: None,
            error_message: Some("Cash payments have no external status".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylane_types::{Currency, Money, PaymentId};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_create_stays_pending_without_reference() {
        let result = CashStrategy
            .create_payment(&ProviderPaymentRequest {
                payment_id: PaymentId::new(),
                order_number: "ORD-3".to_string(),
                amount: Money::new(dec!(20), Currency::USD).unwrap(),
                customer_email: None,
                customer_phone: None,
                metadata: None,
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Pending);
        assert!(result.external_reference.is_none());
        assert!(result.payment_url.is_none());
    }

    #[tokio::test]
    async fn test_process_confirms_collection() {
        let result = CashStrategy
            .process_payment(&ProviderProcessRequest {
                payment_id: PaymentId::new(),
                external_reference: None,
                amount: Money::new(dec!(20), Currency::USD).unwrap(),
            })
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.status, PaymentStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_refund_reports_failure() {
        let result = CashStrategy
            .refund_payment(&ProviderRefundRequest {
                payment_id: PaymentId::new(),
                external_reference: "unused".to_string(),
                amount: Money::new(dec!(5), Currency::USD).unwrap(),
            })
            .await
            .unwrap();

        assert!(!result.success);
        assert!(result.refund_id.is_none());
    }

    #[tokio::test]
    async fn test_status_lookup_always_fails() {
        let result = CashStrategy.payment_status("anything").await.unwrap();

        assert!(!result.success);
        assert!(result.status.is_none());
    }
}
