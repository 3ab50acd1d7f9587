//! Checkout flow controller.
//!
//! The flow walks `PayerInfo → Cart → PaymentLink`. Moving forward is gated
//! (a valid payer profile to leave `PayerInfo`, a non-empty cart to leave
//! `Cart`); moving back is always allowed. Entering `PaymentLink` assembles
//! the payment request and starts the gateway call, so the link status moves
//! `Creating → Ready | Failed` on arrival, and `Failed` may be retried.
//!
//! [`CheckoutFlow::advance`] drives a step together with the gateway call it
//! starts. [`CheckoutFlow::next`] hands the [`Submission`] back instead, for
//! callers that must not hold the flow while the call is outstanding; they
//! report the outcome through [`CheckoutFlow::complete_submission`]. Each
//! submission carries a ticket, and an outcome for a ticket the flow no
//! longer waits on is rejected without touching the link status.

use paylink_client::{GatewayError, PaymentLinkGateway};
use paylink_core::{
    progress, CheckoutError, PaymentLinkResult, PaymentRequest, ProgressStep, Step,
};
use serde::Serialize;

use crate::cart::CartState;
use crate::error::Result;
use crate::payer::PayerState;

/// State of the payment link on the last step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LinkStatus {
    /// Nothing requested yet.
    #[default]
    Pending,
    /// A gateway call is outstanding.
    Creating,
    /// The link was created.
    Ready {
        /// The created link.
        result: PaymentLinkResult,
    },
    /// The last attempt failed.
    Failed {
        /// User-facing failure message.
        message: String,
    },
}

/// An outstanding payment link request.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Identifies this submission to [`CheckoutFlow::complete_submission`].
    pub ticket: u64,
    /// Payload to send to the gateway.
    pub request: PaymentRequest,
}

/// Result of moving forward one step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    /// The step the flow is at now.
    pub step: Step,
    /// The gateway call to make, when the move entered `PaymentLink`.
    pub submission: Option<Submission>,
}

/// Sequences the checkout steps.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    step: Step,
    link: LinkStatus,
    ticket: u64,
}

impl CheckoutFlow {
    /// Start at `PayerInfo`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// The payment link status.
    #[must_use]
    pub const fn link_status(&self) -> &LinkStatus {
        &self.link
    }

    /// The created link, if the flow is in the ready state.
    #[must_use]
    pub const fn payment_link(&self) -> Option<&PaymentLinkResult> {
        match &self.link {
            LinkStatus::Ready { result } => Some(result),
            _ => None,
        }
    }

    /// Progress indicator entries for the current state.
    #[must_use]
    pub fn progress(&self) -> Vec<ProgressStep> {
        progress(self.step, self.payment_link().is_some())
    }

    /// Whether a payment could be created from the current containers.
    #[must_use]
    pub fn can_create_payment(payer: &PayerState, cart: &CartState) -> bool {
        !cart.is_cart_empty() && payer.profile().check().is_empty()
    }

    /// Advance one step.
    ///
    /// Leaving `PayerInfo` validates the profile (recording its errors).
    /// Leaving `Cart` requires at least one line and starts the payment link
    /// submission, returned in the transition for the caller to send. On
    /// `PaymentLink` this is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `PayerIncomplete` or `CartEmpty` when the gate is closed.
    pub fn next(
        &mut self,
        payer: &mut PayerState,
        cart: &CartState,
    ) -> std::result::Result<Transition, CheckoutError> {
        let Some(target) = self.step.next() else {
            return Ok(Transition {
                step: self.step,
                submission: None,
            });
        };

        match self.step {
            Step::PayerInfo if !payer.validate() => {
                return Err(CheckoutError::PayerIncomplete {
                    errors: payer.errors().clone(),
                });
            }
            Step::Cart if cart.is_cart_empty() => return Err(CheckoutError::CartEmpty),
            _ => {}
        }

        self.step = target;
        tracing::info!(step = ?self.step, "Checkout advanced");

        let submission = if target == Step::PaymentLink {
            self.link = LinkStatus::Pending;
            Some(self.begin_submission(payer, cart)?)
        } else {
            None
        };

        Ok(Transition {
            step: self.step,
            submission,
        })
    }

    /// Advance one step, making the gateway call when `PaymentLink` is
    /// entered.
    ///
    /// A failed call does not fail the move; it leaves the link status
    /// `Failed` for a later [`CheckoutFlow::submit`].
    ///
    /// # Errors
    ///
    /// Returns `PayerIncomplete` or `CartEmpty` when the gate is closed.
    pub async fn advance<G>(
        &mut self,
        gateway: &G,
        payer: &mut PayerState,
        cart: &CartState,
    ) -> std::result::Result<Step, CheckoutError>
    where
        G: PaymentLinkGateway + ?Sized,
    {
        let transition = self.next(payer, cart)?;
        if let Some(submission) = transition.submission {
            let outcome = gateway.create_payment_link(&submission.request).await;
            // Failures are kept in the link status.
            let _ = self.complete_submission(submission.ticket, outcome);
        }
        Ok(self.step)
    }

    /// Go back one step. Leaving `PaymentLink` discards the link state.
    pub fn back(&mut self) -> Step {
        if let Some(previous) = self.step.previous() {
            if self.step == Step::PaymentLink {
                self.link = LinkStatus::Pending;
            }
            self.step = previous;
            tracing::info!(step = ?self.step, "Checkout went back");
        }
        self.step
    }

    /// Assemble the payment request and mark the link as being created.
    ///
    /// # Errors
    ///
    /// - `InvalidStep` outside the `PaymentLink` step
    /// - `SubmissionInFlight` while a previous submission is outstanding
    /// - `LinkAlreadyCreated` once a link exists
    /// - `CartEmpty` if the cart was emptied in the meantime
    pub fn begin_submission(
        &mut self,
        payer: &PayerState,
        cart: &CartState,
    ) -> std::result::Result<Submission, CheckoutError> {
        if self.step != Step::PaymentLink {
            return Err(CheckoutError::InvalidStep {
                expected: Step::PaymentLink,
                actual: self.step,
            });
        }
        match self.link {
            LinkStatus::Creating => return Err(CheckoutError::SubmissionInFlight),
            LinkStatus::Ready { .. } => return Err(CheckoutError::LinkAlreadyCreated),
            LinkStatus::Pending | LinkStatus::Failed { .. } => {}
        }
        if cart.is_cart_empty() {
            return Err(CheckoutError::CartEmpty);
        }

        let request = PaymentRequest::assemble(payer.profile(), cart.cart());
        self.ticket += 1;
        self.link = LinkStatus::Creating;

        tracing::info!(
            ticket = self.ticket,
            merchant_reference = %request.merchant_reference,
            amount = request.amount,
            "Payment link submission started"
        );

        Ok(Submission {
            ticket: self.ticket,
            request,
        })
    }

    /// Record the gateway outcome of submission `ticket`.
    ///
    /// # Errors
    ///
    /// Returns `StaleSubmission` if the flow no longer waits on `ticket` (the
    /// outcome is discarded), or the gateway error if the call failed.
    pub fn complete_submission(
        &mut self,
        ticket: u64,
        outcome: std::result::Result<PaymentLinkResult, GatewayError>,
    ) -> Result<PaymentLinkResult> {
        if ticket != self.ticket || self.link != LinkStatus::Creating {
            tracing::debug!(ticket, current = self.ticket, "Discarding stale payment link outcome");
            return Err(CheckoutError::StaleSubmission.into());
        }

        match outcome {
            Ok(result) => {
                tracing::info!(payment_id = %result.payment_id, "Payment link ready");
                self.link = LinkStatus::Ready {
                    result: result.clone(),
                };
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Payment link creation failed");
                self.link = LinkStatus::Failed {
                    message: e.user_message(),
                };
                Err(e.into())
            }
        }
    }

    /// Retry a failed payment link attempt through `gateway`.
    ///
    /// Once a link exists it is returned without calling the gateway again.
    ///
    /// # Errors
    ///
    /// Returns a `FlowError::Checkout` if the flow refuses the submission and
    /// a `FlowError::Gateway` if the call fails.
    pub async fn submit<G>(
        &mut self,
        gateway: &G,
        payer: &PayerState,
        cart: &CartState,
    ) -> Result<PaymentLinkResult>
    where
        G: PaymentLinkGateway + ?Sized,
    {
        if let (Step::PaymentLink, Some(result)) = (self.step, self.payment_link()) {
            return Ok(result.clone());
        }

        let submission = self.begin_submission(payer, cart)?;
        let outcome = gateway.create_payment_link(&submission.request).await;
        self.complete_submission(submission.ticket, outcome)
    }

    /// Start over with an empty cart after a link was created.
    ///
    /// The payer profile is kept.
    ///
    /// # Errors
    ///
    /// Returns `NoPaymentLink` unless a link is ready.
    pub fn start_new_payment(
        &mut self,
        cart: &mut CartState,
    ) -> std::result::Result<Step, CheckoutError> {
        if self.payment_link().is_none() {
            return Err(CheckoutError::NoPaymentLink);
        }

        cart.clear_cart();
        self.link = LinkStatus::Pending;
        self.step = Step::Cart;

        tracing::info!("Started a new payment");
        Ok(self.step)
    }
}
