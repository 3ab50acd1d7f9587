//! Error types for the checkout domain.

use std::collections::BTreeMap;

use crate::payer::FieldErrors;
use crate::step::Step;

/// Result type for checkout operations.
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Errors that can occur while driving the checkout flow.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckoutError {
    /// The payer profile failed validation.
    #[error("payer information is incomplete: {} field(s) invalid", .errors.len())]
    PayerIncomplete {
        /// Field-level validation messages.
        errors: FieldErrors,
    },

    /// The cart has no lines.
    #[error("your cart is empty, add at least one product")]
    CartEmpty,

    /// The operation is not available at the current step.
    #[error("operation requires step {expected:?}, current step is {actual:?}")]
    InvalidStep {
        /// The step the operation needs.
        expected: Step,
        /// The step the flow is at.
        actual: Step,
    },

    /// A payment link request is already outstanding.
    #[error("a payment link request is already in progress")]
    SubmissionInFlight,

    /// The submission was abandoned by navigating away before it completed.
    #[error("the checkout moved on while the payment link was being created")]
    StaleSubmission,

    /// A payment link already exists for this checkout.
    #[error("a payment link has already been created")]
    LinkAlreadyCreated,

    /// No payment link has been created yet.
    #[error("no payment link has been created")]
    NoPaymentLink,

    /// The product ID is not part of the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(String),

    /// Custom product data failed validation.
    #[error("invalid product: {}", format_field_errors(.0))]
    InvalidProduct(BTreeMap<String, String>),

    /// The payment link could not be encoded as a QR code.
    #[error("QR code error: {0}")]
    QrCode(String),
}

fn format_field_errors(errors: &BTreeMap<String, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join(", ")
}
