//! Payer state container.

use paylink_core::{AddressUpdate, FieldErrors, PayerProfile, PersonalInfoUpdate};
use paylink_store::{keys, JsonStore};

/// Owns the payer profile for one checkout session.
///
/// Every mutation persists the full profile under [`keys::PAYER_PROFILE`].
#[derive(Debug, Clone)]
pub struct PayerState {
    profile: PayerProfile,
    store: JsonStore,
}

impl PayerState {
    /// Restore the persisted profile, or start from defaults.
    #[must_use]
    pub fn load(store: JsonStore) -> Self {
        let profile = store
            .load::<PayerProfile>(keys::PAYER_PROFILE)
            .unwrap_or_default();
        Self { profile, store }
    }

    /// Current profile snapshot.
    #[must_use]
    pub const fn profile(&self) -> &PayerProfile {
        &self.profile
    }

    /// Errors from the last validation run.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.profile.errors
    }

    /// Whether the error map is currently empty.
    ///
    /// This reflects the last [`validate`](Self::validate) call, not the
    /// current field contents.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.profile.errors.is_empty()
    }

    /// Merge the given personal detail fields.
    pub fn update_personal_info(&mut self, update: PersonalInfoUpdate) {
        self.profile.personal_info.apply(update);
        self.persist();
    }

    /// Merge the given billing address fields.
    pub fn update_billing_address(&mut self, update: AddressUpdate) {
        self.profile.billing_address.apply(update);
        self.persist();
    }

    /// Merge the given shipping address fields.
    pub fn update_shipping_address(&mut self, update: AddressUpdate) {
        self.profile.shipping_address.apply(update);
        self.persist();
    }

    /// Set whether goods ship to the billing address.
    ///
    /// Turning it on copies the billing address into the shipping address.
    /// Turning it off leaves the shipping address as it is.
    pub fn toggle_same_as_shipping(&mut self, same: bool) {
        self.profile.same_as_shipping = same;
        if same {
            self.profile.shipping_address = self.profile.billing_address.clone();
        }
        self.persist();
    }

    /// Check every field, replace the error map and report success.
    pub fn validate(&mut self) -> bool {
        self.profile.errors = self.profile.check();
        self.persist();

        if !self.profile.errors.is_empty() {
            tracing::debug!(
                invalid = self.profile.errors.len(),
                "Payer profile failed validation"
            );
        }
        self.profile.errors.is_empty()
    }

    /// Merge externally produced errors into the error map.
    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.profile.errors.extend(errors);
        self.persist();
    }

    /// Drop all validation errors.
    pub fn clear_errors(&mut self) {
        self.profile.errors.clear();
        self.persist();
    }

    /// Return to the default profile and forget the persisted copy.
    pub fn reset(&mut self) {
        self.profile = PayerProfile::default();
        self.store.remove(keys::PAYER_PROFILE);
    }

    fn persist(&self) {
        self.store.save(keys::PAYER_PROFILE, &self.profile);
    }
}
