//! Cart and catalog handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use paylink_core::{catalog, Cart, CartSummary, CustomProduct, Product};

use crate::error::ApiError;
use crate::state::AppState;

/// Cart with its summary.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    /// The cart.
    #[serde(flatten)]
    pub cart: Cart,
    /// Item count and totals.
    pub summary: CartSummary,
}

impl CartResponse {
    fn of(cart: &paylink_checkout::CartState) -> Self {
        Self {
            cart: cart.cart().clone(),
            summary: cart.cart_summary(),
        }
    }
}

/// Add catalog item request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    /// Catalog product ID.
    pub product_id: String,
    /// Units to add (default: 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// A quantity as a number or as text typed by the user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    /// Numeric quantity.
    Number(i64),
    /// Free text, parsed leniently.
    Text(String),
}

/// Update quantity request.
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    /// New quantity; zero or less removes the line.
    pub quantity: QuantityInput,
}

/// Created custom product.
#[derive(Debug, Serialize)]
pub struct CustomProductResponse {
    /// Generated product ID.
    pub id: String,
    /// Updated cart.
    pub cart: CartResponse,
}

/// Currency request.
#[derive(Debug, Deserialize)]
pub struct CurrencyRequest {
    /// Currency code.
    pub currency: String,
}

/// Merchant reference request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantRefRequest {
    /// Merchant reference.
    pub merchant_ref: String,
}

/// Invoice ID request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceIdRequest {
    /// Invoice ID.
    pub invoice_id: String,
}

/// List the product catalog.
pub async fn list_catalog() -> Json<Vec<Product>> {
    Json(catalog())
}

/// Get the cart.
pub async fn get_cart(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let session = state.session.lock().await;
    Json(CartResponse::of(&session.cart))
}

/// Empty the cart.
pub async fn clear_cart(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.clear_cart();
    Json(CartResponse::of(&session.cart))
}

/// Add a catalog product.
pub async fn add_item(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let mut session = state.session.lock().await;
    session
        .cart
        .add_catalog_item(&request.product_id, request.quantity)?;
    Ok(Json(CartResponse::of(&session.cart)))
}

/// Set the quantity of a line.
pub async fn update_item(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
    Json(request): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    let mut session = state.session.lock().await;
    if session.cart.cart().line(&product_id).is_none() {
        return Err(ApiError::NotFound(format!("Cart line not found: {product_id}")));
    }

    match request.quantity {
        QuantityInput::Number(quantity) => session.cart.update_quantity(&product_id, quantity),
        QuantityInput::Text(input) => session.cart.update_quantity_input(&product_id, &input),
    }
    Ok(Json(CartResponse::of(&session.cart)))
}

/// Remove a line.
pub async fn remove_item(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    let mut session = state.session.lock().await;
    if !session.cart.remove_item(&product_id) {
        return Err(ApiError::NotFound(format!("Cart line not found: {product_id}")));
    }
    Ok(Json(CartResponse::of(&session.cart)))
}

/// Add a user-defined product.
pub async fn add_custom_product(
    State(state): State<Arc<AppState>>,
    Json(product): Json<CustomProduct>,
) -> Result<(StatusCode, Json<CustomProductResponse>), ApiError> {
    let mut session = state.session.lock().await;
    let id = session.cart.add_custom_product(product)?;
    Ok((
        StatusCode::CREATED,
        Json(CustomProductResponse {
            id,
            cart: CartResponse::of(&session.cart),
        }),
    ))
}

/// Set the currency.
pub async fn set_currency(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CurrencyRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    if request.currency.trim().is_empty() {
        return Err(ApiError::BadRequest("Currency is required".into()));
    }
    let mut session = state.session.lock().await;
    session.cart.set_currency(&request.currency);
    Ok(Json(CartResponse::of(&session.cart)))
}

/// Set the merchant reference.
pub async fn set_merchant_ref(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MerchantRefRequest>,
) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.set_merchant_ref(request.merchant_ref);
    Json(CartResponse::of(&session.cart))
}

/// Generate a fresh merchant reference.
pub async fn regenerate_merchant_ref(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.generate_new_merchant_ref();
    Json(CartResponse::of(&session.cart))
}

/// Set the invoice ID.
pub async fn set_invoice_id(
    State(state): State<Arc<AppState>>,
    Json(request): Json<InvoiceIdRequest>,
) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.set_invoice_id(request.invoice_id);
    Json(CartResponse::of(&session.cart))
}

/// Generate a fresh invoice ID.
pub async fn regenerate_invoice_id(State(state): State<Arc<AppState>>) -> Json<CartResponse> {
    let mut session = state.session.lock().await;
    session.cart.generate_new_invoice_id();
    Json(CartResponse::of(&session.cart))
}
