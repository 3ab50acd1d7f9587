//! Step navigation and payment link handlers.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use paylink_checkout::{CheckoutFlow, LinkStatus};
use paylink_core::{
    share, CartSummary, PayerProfile, PaymentLinkResult, ProgressStep, ShareLinks, Step,
};

use crate::error::ApiError;
use crate::state::{AppState, CheckoutSession};

/// Snapshot of the whole checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutView {
    /// Current step.
    pub step: Step,
    /// Progress indicator entries.
    pub progress: Vec<ProgressStep>,
    /// Payment link status.
    pub link: LinkStatus,
    /// Whether a payment could be created right now.
    pub can_create_payment: bool,
    /// Payer profile.
    pub payer: PayerProfile,
    /// Cart summary.
    pub cart: CartSummary,
}

impl From<&CheckoutSession> for CheckoutView {
    fn from(session: &CheckoutSession) -> Self {
        Self {
            step: session.flow.step(),
            progress: session.flow.progress(),
            link: session.flow.link_status().clone(),
            can_create_payment: CheckoutFlow::can_create_payment(&session.payer, &session.cart),
            payer: session.payer.profile().clone(),
            cart: session.cart.cart_summary(),
        }
    }
}

/// Created link plus ready-made share targets.
#[derive(Debug, Serialize)]
pub struct PaymentLinkResponse {
    /// The payment link.
    pub link: PaymentLinkResult,
    /// Share targets.
    pub share: ShareLinks,
}

/// Share targets plus a terminal QR code.
#[derive(Debug, Serialize)]
pub struct ShareResponse {
    /// Share targets.
    #[serde(flatten)]
    pub links: ShareLinks,
    /// QR code of the link rendered as text.
    pub qr_code: String,
}

/// Get the checkout snapshot.
pub async fn get_checkout(State(state): State<Arc<AppState>>) -> Json<CheckoutView> {
    let session = state.session.lock().await;
    Json(CheckoutView::from(&*session))
}

/// Advance to the next step.
///
/// Entering the payment link step creates the link. The session lock is
/// released while the gateway call is outstanding, and a failed call is
/// reported through the link status rather than the response code.
pub async fn next_step(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CheckoutView>, ApiError> {
    let submission = {
        let mut guard = state.session.lock().await;
        let session = &mut *guard;

        let transition = session.flow.next(&mut session.payer, &session.cart)?;
        match transition.submission {
            Some(submission) => submission,
            None => return Ok(Json(CheckoutView::from(&*session))),
        }
    };

    let outcome = state
        .gateway
        .create_payment_link(&submission.request)
        .await;

    let mut session = state.session.lock().await;
    if let Err(e) = session.flow.complete_submission(submission.ticket, outcome) {
        tracing::debug!(error = %e, "Payment link not created on entering the step");
    }

    Ok(Json(CheckoutView::from(&*session)))
}

/// Go back one step.
pub async fn previous_step(State(state): State<Arc<AppState>>) -> Json<CheckoutView> {
    let mut session = state.session.lock().await;
    session.flow.back();
    Json(CheckoutView::from(&*session))
}

/// Retry the payment link after a failure, or return the created one.
///
/// The session lock is released while the gateway call is outstanding. If
/// the checkout moved on in the meantime the outcome is discarded and the
/// request fails with a conflict.
pub async fn create_payment_link(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PaymentLinkResponse>, ApiError> {
    let submission = {
        let mut guard = state.session.lock().await;
        let session = &mut *guard;

        if let Some(result) = session.flow.payment_link() {
            return Ok(Json(link_response(result.clone())));
        }
        session.flow.begin_submission(&session.payer, &session.cart)?
    };

    let outcome = state
        .gateway
        .create_payment_link(&submission.request)
        .await;

    let result = state
        .session
        .lock()
        .await
        .flow
        .complete_submission(submission.ticket, outcome)?;

    Ok(Json(link_response(result)))
}

/// Clear the cart and start a new payment for the same payer.
pub async fn new_payment(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CheckoutView>, ApiError> {
    let mut guard = state.session.lock().await;
    let session = &mut *guard;

    session.flow.start_new_payment(&mut session.cart)?;

    Ok(Json(CheckoutView::from(&*session)))
}

/// Get share targets for the created link.
pub async fn share_links(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ShareResponse>, ApiError> {
    let session = state.session.lock().await;
    let result = session
        .flow
        .payment_link()
        .ok_or_else(|| ApiError::NotFound("No payment link has been created".into()))?;

    let qr_code = share::qr_text(result)?;

    Ok(Json(ShareResponse {
        links: ShareLinks::from(result),
        qr_code,
    }))
}

fn link_response(link: PaymentLinkResult) -> PaymentLinkResponse {
    let share = ShareLinks::from(&link);
    PaymentLinkResponse { link, share }
}
