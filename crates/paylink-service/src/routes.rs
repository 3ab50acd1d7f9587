//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{cart, checkout, health, payer};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Checkout
/// - `GET /v1/checkout` - Step, progress, link status and summaries
/// - `POST /v1/checkout/next` - Advance one step (creates the link on entering the last step)
/// - `POST /v1/checkout/back` - Go back one step
/// - `POST /v1/checkout/payment-link` - Retry the payment link after a failure
/// - `POST /v1/checkout/new-payment` - Clear the cart and start over
/// - `GET /v1/checkout/share` - Share links and QR code
///
/// ## Payer
/// - `GET /v1/payer` - Get the profile
/// - `DELETE /v1/payer` - Reset the profile
/// - `PATCH /v1/payer/personal-info` - Update personal details
/// - `PATCH /v1/payer/billing-address` - Update the billing address
/// - `PATCH /v1/payer/shipping-address` - Update the shipping address
/// - `PUT /v1/payer/same-as-shipping` - Toggle shipping to billing
/// - `POST /v1/payer/validate` - Validate the profile
/// - `DELETE /v1/payer/errors` - Clear validation errors
///
/// ## Cart
/// - `GET /v1/catalog` - List catalog products
/// - `GET /v1/cart` - Get the cart
/// - `DELETE /v1/cart` - Empty the cart
/// - `POST /v1/cart/items` - Add a catalog product
/// - `PUT /v1/cart/items/:id` - Set a line quantity
/// - `DELETE /v1/cart/items/:id` - Remove a line
/// - `POST /v1/cart/custom-products` - Add a custom product
/// - `PUT /v1/cart/currency` - Set the currency
/// - `PUT /v1/cart/merchant-ref` - Set the merchant reference
/// - `POST /v1/cart/merchant-ref/regenerate` - New merchant reference
/// - `PUT /v1/cart/invoice-id` - Set the invoice ID
/// - `POST /v1/cart/invoice-id/regenerate` - New invoice ID
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let checkout_routes = Router::new()
        .route("/", get(checkout::get_checkout))
        .route("/next", post(checkout::next_step))
        .route("/back", post(checkout::previous_step))
        .route("/payment-link", post(checkout::create_payment_link))
        .route("/new-payment", post(checkout::new_payment))
        .route("/share", get(checkout::share_links));

    let payer_routes = Router::new()
        .route("/", get(payer::get_payer).delete(payer::reset_payer))
        .route("/personal-info", patch(payer::update_personal_info))
        .route("/billing-address", patch(payer::update_billing_address))
        .route("/shipping-address", patch(payer::update_shipping_address))
        .route("/same-as-shipping", put(payer::set_same_as_shipping))
        .route("/validate", post(payer::validate_payer))
        .route("/errors", delete(payer::clear_errors));

    let cart_routes = Router::new()
        .route("/", get(cart::get_cart).delete(cart::clear_cart))
        .route("/items", post(cart::add_item))
        .route("/items/:id", put(cart::update_item).delete(cart::remove_item))
        .route("/custom-products", post(cart::add_custom_product))
        .route("/currency", put(cart::set_currency))
        .route("/merchant-ref", put(cart::set_merchant_ref))
        .route("/merchant-ref/regenerate", post(cart::regenerate_merchant_ref))
        .route("/invoice-id", put(cart::set_invoice_id))
        .route("/invoice-id/regenerate", post(cart::regenerate_invoice_id));

    let api_routes = Router::new()
        .nest("/checkout", checkout_routes)
        .nest("/payer", payer_routes)
        .nest("/cart", cart_routes)
        .route("/catalog", get(cart::list_catalog))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        .nest("/v1", api_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
