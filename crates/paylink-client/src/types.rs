//! Wire types for the payment API.

use paylink_core::{PaymentLinkResult, PaymentRequest};
use serde::{Deserialize, Serialize};

/// Body of `POST /payment/create`.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreatePaymentBody {
    pub payment: PaymentEnvelope,
}

/// The `payment` object: deployment constants plus the assembled request.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct PaymentEnvelope {
    pub program_id: u32,
    pub app_id: u32,
    #[serde(flatten)]
    pub request: PaymentRequest,
}

/// Success body, either wrapped in `{ success, data }` or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum CreatePaymentResponse {
    Wrapped { data: PaymentLinkResult },
    Bare(PaymentLinkResult),
}

impl CreatePaymentResponse {
    pub fn into_result(self) -> PaymentLinkResult {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Error body; only the message is used.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the public IP lookup service.
#[derive(Debug, Deserialize)]
pub(crate) struct IpLookupResponse {
    pub ip: String,
}
