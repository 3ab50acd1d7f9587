//! Gateway error types.

/// Shown when the remote API rejects a request without saying why.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to create payment link";

/// Errors that can occur when creating a payment link.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No bearer credential was configured.
    #[error("authentication token not found")]
    Authentication,

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The payment API returned an error response.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl GatewayError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Authentication => {
                "Authentication token not found. Please login first.".to_string()
            }
            Self::Http(_) => "Network error. Please check your internet connection.".to_string(),
            Self::Api { message, .. } => message.clone(),
            Self::Serialization(_) | Self::Configuration(_) => {
                "An unexpected error occurred".to_string()
            }
        }
    }

    /// Whether the failure is a missing credential.
    #[must_use]
    pub const fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_message_is_verbatim() {
        let err = GatewayError::Api {
            status: 422,
            message: "Invalid currency".into(),
        };
        assert_eq!(err.user_message(), "Invalid currency");
        assert!(!err.is_authentication());
    }

    #[test]
    fn authentication_has_its_own_message() {
        let err = GatewayError::Authentication;
        assert!(err.is_authentication());
        assert!(err.user_message().contains("login"));
    }
}
