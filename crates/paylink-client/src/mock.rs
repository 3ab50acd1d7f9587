//! Offline gateway that fabricates payment links.

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use paylink_core::{random_base36, unix_millis, PaymentLinkResult, PaymentRequest};
use std::time::Duration;

use crate::error::GatewayError;
use crate::gateway::PaymentLinkGateway;

/// Delay applied by [`MockGateway::default`].
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(2000);

/// Prefix of fabricated payment links.
pub const MOCK_LINK_BASE: &str = "https://pay.paythor.com/payment/";

const LINK_ID_LEN: usize = 9;

/// Gateway that waits a fixed delay and then returns a synthetic link.
///
/// Useful for demos and tests; no network access.
#[derive(Debug, Clone)]
pub struct MockGateway {
    delay: Duration,
}

impl MockGateway {
    /// Create a mock gateway with the given delay.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Create a mock gateway that answers immediately.
    #[must_use]
    pub const fn instant() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Configured delay.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl PaymentLinkGateway for MockGateway {
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let now = Utc::now();
        let result = PaymentLinkResult {
            payment_link: format!("{MOCK_LINK_BASE}{}", random_base36(LINK_ID_LEN)),
            payment_id: format!("PAY-{}", unix_millis()),
            merchant_reference: request.merchant_reference.clone(),
            invoice_id: request.invoice_id.clone(),
            amount: request.amount,
            currency: request.currency.clone(),
            status: "active".to_string(),
            expires_at: now + ChronoDuration::hours(paylink_core::PAYMENT_LINK_TTL_HOURS),
            created_at: now,
        };

        tracing::debug!(payment_id = %result.payment_id, "Mock payment link created");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paylink_core::{catalog, Cart, PayerProfile};

    fn request() -> PaymentRequest {
        let mut cart = Cart::new();
        cart.add(catalog()[1].clone(), 1);
        PaymentRequest::assemble(&PayerProfile::default(), &cart)
    }

    #[tokio::test]
    async fn echoes_request_fields() {
        let request = request();
        let result = MockGateway::instant()
            .create_payment_link(&request)
            .await
            .unwrap();

        assert!(result.payment_link.starts_with(MOCK_LINK_BASE));
        assert_eq!(result.payment_link.len(), MOCK_LINK_BASE.len() + LINK_ID_LEN);
        assert!(result.payment_id.starts_with("PAY-"));
        assert_eq!(result.merchant_reference, request.merchant_reference);
        assert_eq!(result.invoice_id, request.invoice_id);
        assert!((result.amount - 210.0).abs() < f64::EPSILON);
        assert_eq!(result.currency, "TRY");
        assert_eq!(result.status, "active");
        assert_eq!(
            result.expires_at - result.created_at,
            ChronoDuration::hours(24)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_configured_delay() {
        let gateway = MockGateway::default();
        let started = tokio::time::Instant::now();

        gateway.create_payment_link(&request()).await.unwrap();

        assert!(started.elapsed() >= DEFAULT_MOCK_DELAY);
    }
}
