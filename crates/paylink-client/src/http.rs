//! HTTP gateway for the payment API.

use async_trait::async_trait;
use paylink_core::{PaymentLinkResult, PaymentRequest};
use reqwest::Client;
use std::time::Duration;

use crate::error::{GatewayError, DEFAULT_FAILURE_MESSAGE};
use crate::gateway::PaymentLinkGateway;
use crate::types::{
    ApiErrorBody, CreatePaymentBody, CreatePaymentResponse, IpLookupResponse, PaymentEnvelope,
};

/// Payer IP used when the lookup service cannot be reached.
pub const FALLBACK_IP: &str = "127.0.0.1";

/// Payment API client.
///
/// Creates payment links with `POST {base_url}/payment/create`, authenticated
/// with a bearer token. The payer's public IP is looked up before each call.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    token: Option<String>,
    program_id: u32,
    app_id: u32,
    ip_lookup_url: String,
}

impl HttpGateway {
    /// Production API base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.paythor.com";

    /// Create a gateway with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, GatewayError> {
        Self::with_options(base_url, token, GatewayOptions::default())
    }

    /// Create a gateway with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        token: Option<String>,
        options: GatewayOptions,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| GatewayError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.trim().is_empty()),
            program_id: options.program_id,
            app_id: options.app_id,
            ip_lookup_url: options.ip_lookup_url,
        })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is configured.
    #[must_use]
    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Look up the caller's public IP, falling back to [`FALLBACK_IP`].
    pub async fn lookup_ip(&self) -> String {
        let lookup = async {
            let response = self
                .client
                .get(&self.ip_lookup_url)
                .send()
                .await?
                .error_for_status()?;
            response.json::<IpLookupResponse>().await
        };

        match lookup.await {
            Ok(body) if !body.ip.is_empty() => body.ip,
            Ok(_) => FALLBACK_IP.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "IP lookup failed, using fallback");
                FALLBACK_IP.to_string()
            }
        }
    }

    /// Handle API response and convert errors.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<PaymentLinkResult, GatewayError> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return match serde_json::from_slice::<CreatePaymentResponse>(&bytes) {
                Ok(body) => Ok(body.into_result()),
                Err(e) => {
                    tracing::warn!(error = %e, "Payment API returned an unreadable body");
                    Err(GatewayError::Api {
                        status: status.as_u16(),
                        message: DEFAULT_FAILURE_MESSAGE.to_string(),
                    })
                }
            };
        }

        let message = match response.json::<ApiErrorBody>().await {
            Ok(ApiErrorBody {
                message: Some(message),
            }) if !message.is_empty() => message,
            _ => DEFAULT_FAILURE_MESSAGE.to_string(),
        };

        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PaymentLinkGateway for HttpGateway {
    async fn create_payment_link(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentLinkResult, GatewayError> {
        let Some(token) = self.token.as_deref() else {
            return Err(GatewayError::Authentication);
        };

        let mut request = request.clone();
        request.payer.ip = Some(self.lookup_ip().await);

        let body = CreatePaymentBody {
            payment: PaymentEnvelope {
                program_id: self.program_id,
                app_id: self.app_id,
                request,
            },
        };

        let url = format!("{}/payment/create", self.base_url);
        tracing::debug!(
            url = %url,
            merchant_reference = %body.payment.request.merchant_reference,
            "Creating payment link"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        let result = self.handle_response(response).await?;
        tracing::info!(payment_id = %result.payment_id, "Payment link created");
        Ok(result)
    }
}

/// Gateway options for customization.
#[derive(Debug, Clone)]
pub struct GatewayOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Program identifier sent with every request (default: 1).
    pub program_id: u32,
    /// Application identifier sent with every request (default: 102).
    pub app_id: u32,
    /// Public IP lookup endpoint.
    pub ip_lookup_url: String,
}

impl Default for GatewayOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            program_id: 1,
            app_id: 102,
            ip_lookup_url: "https://api.ipify.org?format=json".to_string(),
        }
    }
}
