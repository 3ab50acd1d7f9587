//! Payment link gateway client.
//!
//! This crate turns an assembled [`PaymentRequest`] into a
//! [`PaymentLinkResult`], either by calling the payment API
//! ([`HttpGateway`]) or by synthesizing a result after a short delay
//! ([`MockGateway`]).
//!
//! # Example
//!
//! ```no_run
//! use paylink_client::{HttpGateway, PaymentLinkGateway};
//! use paylink_core::{Cart, PayerProfile, PaymentRequest};
//!
//! # async fn example() -> Result<(), paylink_client::GatewayError> {
//! let gateway = HttpGateway::new(
//!     "https://api.paythor.com",
//!     Some("access-token".to_string()),
//! )?;
//!
//! let request = PaymentRequest::assemble(&PayerProfile::default(), &Cart::new());
//! let link = gateway.create_payment_link(&request).await?;
//!
//! println!("Share this link: {}", link.payment_link);
//! # Ok(())
//! # }
//! ```
//!
//! [`PaymentRequest`]: paylink_core::PaymentRequest
//! [`PaymentLinkResult`]: paylink_core::PaymentLinkResult

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod error;
mod gateway;
mod http;
mod mock;
mod types;

pub use error::GatewayError;
pub use gateway::PaymentLinkGateway;
pub use http::{GatewayOptions, HttpGateway, FALLBACK_IP};
pub use mock::{MockGateway, DEFAULT_MOCK_DELAY, MOCK_LINK_BASE};
