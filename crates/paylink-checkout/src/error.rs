//! Error types for the checkout flow.

use paylink_client::GatewayError;
use paylink_core::CheckoutError;

/// Result type for flow operations that may reach the gateway.
pub type Result<T> = std::result::Result<T, FlowError>;

/// Failure of a flow operation.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// The flow refused the operation.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    /// The gateway failed to create the link.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl FlowError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Checkout(e) => e.to_string(),
            Self::Gateway(e) => e.user_message(),
        }
    }
}
