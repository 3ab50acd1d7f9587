//! Paylink checkout HTTP API.
//!
//! This crate exposes one checkout session over HTTP/JSON:
//!
//! - Payer profile editing and validation
//! - Cart management against the product catalog, plus custom products
//! - Step navigation (`payer_info → cart → payment_link`)
//! - Payment link creation and share links
//!
//! The session is restored from the configured store at startup and every
//! mutation is persisted before the response is sent.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers are async for the router

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{GatewayMode, ServiceConfig, StoreBackend};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{build_gateway, open_store, AppState, CheckoutSession};
