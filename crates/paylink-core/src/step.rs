//! Checkout steps and progress reporting.

use serde::{Deserialize, Serialize};

/// A step of the checkout flow.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Collect payer details.
    #[default]
    PayerInfo,
    /// Build the cart.
    Cart,
    /// Create and share the payment link.
    PaymentLink,
}

impl Step {
    /// All steps in order.
    pub const ALL: [Self; 3] = [Self::PayerInfo, Self::Cart, Self::PaymentLink];

    /// Zero-based position.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::PayerInfo => 0,
            Self::Cart => 1,
            Self::PaymentLink => 2,
        }
    }

    /// Heading shown in the progress indicator.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::PayerInfo => "Payer Information",
            Self::Cart => "Cart Management",
            Self::PaymentLink => "Payment Link",
        }
    }

    /// Subheading shown in the progress indicator.
    #[must_use]
    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::PayerInfo => "Personal details",
            Self::Cart => "Products & pricing",
            Self::PaymentLink => "Create & share",
        }
    }

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::PayerInfo => Some(Self::Cart),
            Self::Cart => Some(Self::PaymentLink),
            Self::PaymentLink => None,
        }
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::PayerInfo => None,
            Self::Cart => Some(Self::PayerInfo),
            Self::PaymentLink => Some(Self::Cart),
        }
    }
}

/// How a step is shown relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    /// Already passed.
    Complete,
    /// The step in view.
    Current,
    /// Not reached yet.
    Upcoming,
}

/// One entry of the progress indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStep {
    /// The step.
    pub step: Step,
    /// Heading.
    pub title: String,
    /// Subheading.
    pub subtitle: String,
    /// Relation to the current step.
    pub state: StepState,
}

/// Build the progress indicator for `current`.
///
/// When `finished` is set every step shows as complete (the link is ready).
#[must_use]
pub fn progress(current: Step, finished: bool) -> Vec<ProgressStep> {
    Step::ALL
        .iter()
        .map(|&step| ProgressStep {
            step,
            title: step.title().to_string(),
            subtitle: step.subtitle().to_string(),
            state: if finished || step < current {
                StepState::Complete
            } else if step == current {
                StepState::Current
            } else {
                StepState::Upcoming
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_are_linear() {
        assert_eq!(Step::PayerInfo.next(), Some(Step::Cart));
        assert_eq!(Step::Cart.next(), Some(Step::PaymentLink));
        assert_eq!(Step::PaymentLink.next(), None);
        assert_eq!(Step::PaymentLink.previous(), Some(Step::Cart));
        assert_eq!(Step::PayerInfo.previous(), None);
    }

    #[test]
    fn progress_marks_current() {
        let entries = progress(Step::Cart, false);
        let states: Vec<_> = entries.iter().map(|e| e.state).collect();
        assert_eq!(
            states,
            [StepState::Complete, StepState::Current, StepState::Upcoming]
        );
        assert_eq!(entries[1].title, "Cart Management");
    }

    #[test]
    fn finished_progress_is_all_complete() {
        assert!(progress(Step::PaymentLink, true)
            .iter()
            .all(|e| e.state == StepState::Complete));
    }
}
