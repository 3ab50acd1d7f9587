//! Payer profile handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use paylink_core::{AddressUpdate, FieldErrors, PayerProfile, PersonalInfoUpdate};

use crate::state::AppState;

/// Same-as-shipping toggle request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SameAsShippingRequest {
    /// Ship to the billing address.
    pub same_as_shipping: bool,
}

/// Validation result.
#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    /// Whether the profile is complete.
    pub valid: bool,
    /// Field-level messages.
    pub errors: FieldErrors,
}

/// Get the payer profile.
pub async fn get_payer(State(state): State<Arc<AppState>>) -> Json<PayerProfile> {
    let session = state.session.lock().await;
    Json(session.payer.profile().clone())
}

/// Reset the payer profile to defaults.
pub async fn reset_payer(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.lock().await.payer.reset();
    tracing::info!("Payer profile reset");
    StatusCode::NO_CONTENT
}

/// Update personal details.
pub async fn update_personal_info(
    State(state): State<Arc<AppState>>,
    Json(update): Json<PersonalInfoUpdate>,
) -> Json<PayerProfile> {
    let mut session = state.session.lock().await;
    session.payer.update_personal_info(update);
    Json(session.payer.profile().clone())
}

/// Update the billing address.
pub async fn update_billing_address(
    State(state): State<Arc<AppState>>,
    Json(update): Json<AddressUpdate>,
) -> Json<PayerProfile> {
    let mut session = state.session.lock().await;
    session.payer.update_billing_address(update);
    Json(session.payer.profile().clone())
}

/// Update the shipping address.
pub async fn update_shipping_address(
    State(state): State<Arc<AppState>>,
    Json(update): Json<AddressUpdate>,
) -> Json<PayerProfile> {
    let mut session = state.session.lock().await;
    session.payer.update_shipping_address(update);
    Json(session.payer.profile().clone())
}

/// Set whether goods ship to the billing address.
pub async fn set_same_as_shipping(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SameAsShippingRequest>,
) -> Json<PayerProfile> {
    let mut session = state.session.lock().await;
    session.payer.toggle_same_as_shipping(request.same_as_shipping);
    Json(session.payer.profile().clone())
}

/// Validate the payer profile.
pub async fn validate_payer(State(state): State<Arc<AppState>>) -> Json<ValidationResponse> {
    let mut session = state.session.lock().await;
    let valid = session.payer.validate();
    Json(ValidationResponse {
        valid,
        errors: session.payer.errors().clone(),
    })
}

/// Clear validation errors.
pub async fn clear_errors(State(state): State<Arc<AppState>>) -> Json<PayerProfile> {
    let mut session = state.session.lock().await;
    session.payer.clear_errors();
    Json(session.payer.profile().clone())
}
