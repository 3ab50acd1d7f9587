//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use paylink_checkout::FlowError;
use paylink_client::GatewayError;
use paylink_core::CheckoutError;
use serde::Serialize;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Input failed validation; `details` maps fields to messages.
    #[error("validation failed: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Field-level messages.
        details: serde_json::Value,
    },

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Conflict - the checkout is not in a state that allows the operation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The payment API credential is missing.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// External service error.
    #[error("external service error: {0}")]
    ExternalService(String),
}

/// JSON error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            Self::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_error",
                message,
                Some(details),
            ),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            Self::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg, None),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
            Self::ExternalService(msg) => (
                StatusCode::BAD_GATEWAY,
                "external_service_error",
                msg,
                None,
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::PayerIncomplete { ref errors } => Self::Validation {
                message: "Please fill in all required fields".into(),
                details: serde_json::to_value(errors).unwrap_or_default(),
            },
            CheckoutError::InvalidProduct(ref fields) => Self::Validation {
                message: "Please check the product details".into(),
                details: serde_json::to_value(fields).unwrap_or_default(),
            },
            CheckoutError::UnknownProduct(_) => Self::NotFound(err.to_string()),
            CheckoutError::CartEmpty
            | CheckoutError::InvalidStep { .. }
            | CheckoutError::SubmissionInFlight
            | CheckoutError::StaleSubmission
            | CheckoutError::LinkAlreadyCreated
            | CheckoutError::NoPaymentLink => Self::Conflict(err.to_string()),
            CheckoutError::QrCode(msg) => Self::Internal(msg),
        }
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        if err.is_authentication() {
            Self::Unauthorized(err.user_message())
        } else {
            Self::ExternalService(err.user_message())
        }
    }
}

impl From<FlowError> for ApiError {
    fn from(err: FlowError) -> Self {
        match err {
            FlowError::Checkout(e) => e.into(),
            FlowError::Gateway(e) => e.into(),
        }
    }
}
