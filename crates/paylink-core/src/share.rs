//! Sharing helpers for a created payment link.
//!
//! Pure templating over a `PaymentLinkResult`; opening the links is up to the
//! presentation layer.

use qrcode::QrCode;
use serde::Serialize;

use crate::error::{CheckoutError, Result};
use crate::payment::PaymentLinkResult;

/// Subject line of the share email.
pub const EMAIL_SUBJECT: &str = "Payment Link - Payment Required";

/// Ready-made share targets for a payment link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    /// The payment link itself (for copying).
    pub payment_link: String,
    /// WhatsApp deep link with a prefilled message.
    pub whatsapp_url: String,
    /// `mailto:` link with subject and body.
    pub email_url: String,
}

impl From<&PaymentLinkResult> for ShareLinks {
    fn from(result: &PaymentLinkResult) -> Self {
        Self {
            payment_link: result.payment_link.clone(),
            whatsapp_url: whatsapp_url(result),
            email_url: email_url(result),
        }
    }
}

/// Build a WhatsApp deep link sharing the payment link.
#[must_use]
pub fn whatsapp_url(result: &PaymentLinkResult) -> String {
    let message = format!(
        "💳 Payment Link: {}\n💰 Amount: {} {}\n📄 Reference: {}",
        result.payment_link, result.amount, result.currency, result.merchant_reference
    );
    format!("https://wa.me/?text={}", urlencoding::encode(&message))
}

/// Build a `mailto:` link with a prefilled payment request email.
#[must_use]
pub fn email_url(result: &PaymentLinkResult) -> String {
    let body = format!(
        "Dear Customer,\n\n\
         Please use the following link to complete your payment:\n\n\
         {}\n\n\
         Payment Details:\n\
         Amount: {} {}\n\
         Reference: {}\n\
         Invoice ID: {}\n\n\
         Thank you for your business!\n\n\
         Best regards",
        result.payment_link,
        result.amount,
        result.currency,
        result.merchant_reference,
        result.invoice_id
    );
    format!(
        "mailto:?subject={}&body={}",
        urlencoding::encode(EMAIL_SUBJECT),
        urlencoding::encode(&body)
    )
}

/// Render the payment link as a text QR code for terminals.
///
/// # Errors
///
/// Returns `CheckoutError::QrCode` if the link is too long to encode.
pub fn qr_text(result: &PaymentLinkResult) -> Result<String> {
    let code = QrCode::new(result.payment_link.as_bytes())
        .map_err(|e| CheckoutError::QrCode(e.to_string()))?;
    Ok(code
        .render::<char>()
        .quiet_zone(false)
        .module_dimensions(2, 1)
        .build())
}
