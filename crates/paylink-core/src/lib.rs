//! Core types and rules for the paylink checkout flow.
//!
//! This crate provides the data model shared by every other paylink crate:
//!
//! - **Payer**: `PersonalInfo`, `Address`, `PayerProfile`, field validation
//! - **Cart**: `Product`, `CartLine`, `Cart`, totals and the fixed catalog
//! - **Payment**: `PaymentRequest` assembly and `PaymentLinkResult`
//! - **Steps**: the three checkout steps and progress reporting
//! - **Sharing**: WhatsApp, `mailto:` and QR renderings of a payment link
//!
//! # Amounts
//!
//! Prices are plain currency units (`f64`), the way the payment API expects
//! them. The service fee is 5% of the subtotal rounded to the nearest whole
//! unit, so `fee` and `total` stay integral whenever prices are.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cart;
pub mod error;
pub mod ids;
pub mod payer;
pub mod payment;
pub mod share;
pub mod step;

pub use cart::{
    catalog, compute_totals, parse_quantity, service_fee, Cart, CartLine, CartSummary,
    CustomProduct, Product, ProductType, Totals, DEFAULT_CURRENCY, FEE_RATE,
};
pub use error::{CheckoutError, Result};
pub use ids::{custom_product_id, generate_reference, random_base36, unix_millis};
pub use payer::{
    Address, AddressUpdate, FieldErrors, PayerField, PayerProfile, PersonalInfo,
    PersonalInfoUpdate, DEFAULT_COUNTRY,
};
pub use payment::{
    PayerDetails, PaymentItem, PaymentLinkResult, PaymentRequest, PostalAddress, ShippingDetails,
    PAYMENT_LINK_TTL_HOURS,
};
pub use share::ShareLinks;
pub use step::{progress, ProgressStep, Step, StepState};
