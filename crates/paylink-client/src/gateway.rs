//! The gateway abstraction used by the checkout flow.

use async_trait::async_trait;
use paylink_core::{PaymentLinkResult, PaymentRequest};

use crate::error::GatewayError;

/// Something that can turn a payment request into a shareable link.
#[async_trait]
pub trait PaymentLinkGateway: Send + Sync {
    /// Create a payment link for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the link cannot be created.
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError>;
}
