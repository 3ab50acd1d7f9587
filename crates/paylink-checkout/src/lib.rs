//! Checkout state and flow control.
//!
//! - [`PayerState`] owns the payer profile and its validation errors.
//! - [`CartState`] owns the cart, its derived totals and the payment
//!   references.
//! - [`CheckoutFlow`] sequences `PayerInfo → Cart → PaymentLink`, gates
//!   forward navigation and drives the payment link gateway.
//!
//! Both containers persist their full state through a
//! [`JsonStore`](paylink_store::JsonStore) after every mutation. Persistence
//! is best-effort and never fails the caller.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use paylink_checkout::{CartState, CheckoutFlow, PayerState};
//! use paylink_client::MockGateway;
//! use paylink_store::{JsonStore, MemoryStore};
//!
//! # async fn example() -> Result<(), paylink_checkout::FlowError> {
//! let store = JsonStore::new(Arc::new(MemoryStore::new()));
//! let mut payer = PayerState::load(store.clone());
//! let mut cart = CartState::load(store);
//! let mut flow = CheckoutFlow::new();
//!
//! // ... fill in the payer profile ...
//! flow.next(&mut payer, &cart)?;
//! cart.add_catalog_item("PRODUCT-A", 2)?;
//!
//! // Entering the payment step creates the link.
//! flow.advance(&MockGateway::default(), &mut payer, &cart).await?;
//! if let Some(link) = flow.payment_link() {
//!     println!("{}", link.payment_link);
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cart;
pub mod error;
pub mod flow;
pub mod payer;

pub use cart::CartState;
pub use error::{FlowError, Result};
pub use flow::{CheckoutFlow, LinkStatus, Submission, Transition};
pub use payer::PayerState;
