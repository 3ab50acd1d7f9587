//! Payment request assembly and payment link results.
//!
//! `PaymentRequest::assemble` is the single place where the payer profile and
//! the cart are turned into the body the payment API expects. Fallback rules:
//!
//! - `amount` is the cart total (fee included).
//! - `shipping` is `None` while the payer ships to the billing address.
//! - Shipping contact fields always come from the payer's personal details.
//! - `payer.ip` is left empty here; the gateway fills it in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine, ProductType};
use crate::payer::{Address, PayerProfile};

/// Lifetime of a payment link in hours.
pub const PAYMENT_LINK_TTL_HOURS: i64 = 24;

/// Address in the payment API's wire shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostalAddress {
    /// Street line.
    pub line_1: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Two-letter country code.
    pub country: String,
}

impl From<&Address> for PostalAddress {
    fn from(address: &Address) -> Self {
        Self {
            line_1: address.line1.clone(),
            city: address.city.clone(),
            state: address.state.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }
}

/// Payer block of a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerDetails {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Billing address.
    pub address: PostalAddress,
    /// Public IP of the payer, filled in by the gateway.
    pub ip: Option<String>,
}

/// Shipping block of a payment request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    /// Recipient given name.
    pub first_name: String,
    /// Recipient family name.
    pub last_name: String,
    /// Recipient phone.
    pub phone: String,
    /// Recipient email.
    pub email: String,
    /// Shipping address.
    pub address: PostalAddress,
}

/// A cart line in the payment API's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentItem {
    /// Product ID.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Product or service.
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Unit price.
    pub price: f64,
    /// Number of units.
    pub quantity: u32,
    /// Optional image as a data URI.
    pub image: Option<String>,
}

impl From<&CartLine> for PaymentItem {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product.id.clone(),
            name: line.product.name.clone(),
            product_type: line.product.product_type,
            price: line.product.price,
            quantity: line.quantity,
            image: line.product.image.clone(),
        }
    }
}

/// Everything needed to create a payment link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Merchant reference.
    pub merchant_reference: String,
    /// Invoice ID.
    pub invoice_id: String,
    /// Currency code.
    pub currency: String,
    /// Amount to charge, fee included.
    pub amount: f64,
    /// Payer details.
    pub payer: PayerDetails,
    /// Separate shipping details, if any.
    pub shipping: Option<ShippingDetails>,
    /// Cart lines.
    pub items: Vec<PaymentItem>,
}

impl PaymentRequest {
    /// Assemble a request from payer and cart snapshots.
    #[must_use]
    pub fn assemble(profile: &PayerProfile, cart: &Cart) -> Self {
        let info = &profile.personal_info;

        let shipping = (!profile.same_as_shipping).then(|| ShippingDetails {
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            phone: info.phone.clone(),
            email: info.email.clone(),
            address: PostalAddress::from(&profile.shipping_address),
        });

        Self {
            merchant_reference: cart.merchant_ref.clone(),
            invoice_id: cart.invoice_id.clone(),
            currency: cart.currency.clone(),
            amount: cart.total,
            payer: PayerDetails {
                first_name: info.first_name.clone(),
                last_name: info.last_name.clone(),
                email: info.email.clone(),
                phone: info.phone.clone(),
                address: PostalAddress::from(&profile.billing_address),
                ip: None,
            },
            shipping,
            items: cart.items.iter().map(PaymentItem::from).collect(),
        }
    }
}

/// A created payment link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentLinkResult {
    /// URL the payer opens.
    pub payment_link: String,
    /// Gateway payment ID.
    pub payment_id: String,
    /// Merchant reference echoed back.
    pub merchant_reference: String,
    /// Invoice ID echoed back.
    pub invoice_id: String,
    /// Amount to pay.
    pub amount: f64,
    /// Currency code.
    pub currency: String,
    /// Link status as reported by the gateway (e.g. `active`).
    pub status: String,
    /// When the link stops working.
    pub expires_at: DateTime<Utc>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
}
