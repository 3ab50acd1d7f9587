//! Payer profile types and validation.
//!
//! A `PayerProfile` holds the personal details, billing address and optional
//! shipping address collected on the first checkout step, together with the
//! field-level errors from the last validation run.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Country preselected for new addresses.
pub const DEFAULT_COUNTRY: &str = "TR";

/// Field-level validation messages keyed by field.
pub type FieldErrors = BTreeMap<PayerField, String>;

/// Personal details of the payer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}

impl PersonalInfo {
    /// Merge a partial update into these details.
    pub fn apply(&mut self, update: PersonalInfoUpdate) {
        merge(&mut self.first_name, update.first_name);
        merge(&mut self.last_name, update.last_name);
        merge(&mut self.email, update.email);
        merge(&mut self.phone, update.phone);
    }
}

/// Partial update of `PersonalInfo`; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfoUpdate {
    /// New given name.
    pub first_name: Option<String>,
    /// New family name.
    pub last_name: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New phone number.
    pub phone: Option<String>,
}

/// A postal address, used for both billing and shipping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    /// Street line.
    pub line1: String,
    /// City.
    pub city: String,
    /// State or province.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Two-letter country code.
    pub country: String,
}

impl Default for Address {
    fn default() -> Self {
        Self {
            line1: String::new(),
            city: String::new(),
            state: String::new(),
            postal_code: String::new(),
            country: DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl Address {
    /// Merge a partial update into this address.
    pub fn apply(&mut self, update: AddressUpdate) {
        merge(&mut self.line1, update.line1);
        merge(&mut self.city, update.city);
        merge(&mut self.state, update.state);
        merge(&mut self.postal_code, update.postal_code);
        merge(&mut self.country, update.country);
    }
}

/// Partial update of an `Address`; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressUpdate {
    /// New street line.
    pub line1: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New state or province.
    pub state: Option<String>,
    /// New postal code.
    pub postal_code: Option<String>,
    /// New country code.
    pub country: Option<String>,
}

fn merge(target: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *target = value;
    }
}

/// A validated payer field.
///
/// Serialized names are stable so a presentation layer can attach each
/// message to its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PayerField {
    /// Personal first name.
    FirstName,
    /// Personal last name.
    LastName,
    /// Personal email.
    Email,
    /// Personal phone.
    Phone,
    /// Billing street line.
    BillingLine1,
    /// Billing city.
    BillingCity,
    /// Billing state.
    BillingState,
    /// Billing postal code.
    BillingPostalCode,
    /// Shipping street line.
    ShippingLine1,
    /// Shipping city.
    ShippingCity,
    /// Shipping state.
    ShippingState,
    /// Shipping postal code.
    ShippingPostalCode,
}

impl PayerField {
    /// Get the field key as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::BillingLine1 => "billingLine1",
            Self::BillingCity => "billingCity",
            Self::BillingState => "billingState",
            Self::BillingPostalCode => "billingPostalCode",
            Self::ShippingLine1 => "shippingLine1",
            Self::ShippingCity => "shippingCity",
            Self::ShippingState => "shippingState",
            Self::ShippingPostalCode => "shippingPostalCode",
        }
    }

    /// Whether the field belongs to the shipping address.
    #[must_use]
    pub const fn is_shipping(&self) -> bool {
        matches!(
            self,
            Self::ShippingLine1 | Self::ShippingCity | Self::ShippingState | Self::ShippingPostalCode
        )
    }
}

/// Everything collected about the payer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayerProfile {
    /// Personal details.
    pub personal_info: PersonalInfo,
    /// Billing address.
    pub billing_address: Address,
    /// Shipping address, ignored while `same_as_shipping` is set.
    pub shipping_address: Address,
    /// Ship to the billing address.
    pub same_as_shipping: bool,
    /// Errors from the last validation run.
    pub errors: FieldErrors,
}

impl Default for PayerProfile {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            billing_address: Address::default(),
            shipping_address: Address::default(),
            same_as_shipping: true,
            errors: FieldErrors::new(),
        }
    }
}

impl PayerProfile {
    /// Run every field check and return all violations.
    ///
    /// The shipping address is only checked when it differs from billing.
    #[must_use]
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let info = &self.personal_info;

        require(&mut errors, PayerField::FirstName, &info.first_name, "First name is required");
        require(&mut errors, PayerField::LastName, &info.last_name, "Last name is required");
        if info.email.trim().is_empty() {
            errors.insert(PayerField::Email, "Email is required".to_string());
        } else if !is_valid_email(&info.email) {
            errors.insert(PayerField::Email, "Email is invalid".to_string());
        }
        require(&mut errors, PayerField::Phone, &info.phone, "Phone number is required");

        let billing = &self.billing_address;
        require(&mut errors, PayerField::BillingLine1, &billing.line1, "Address is required");
        require(&mut errors, PayerField::BillingCity, &billing.city, "City is required");
        require(&mut errors, PayerField::BillingState, &billing.state, "State is required");
        require(
            &mut errors,
            PayerField::BillingPostalCode,
            &billing.postal_code,
            "Postal code is required",
        );

        if !self.same_as_shipping {
            let shipping = &self.shipping_address;
            require(
                &mut errors,
                PayerField::ShippingLine1,
                &shipping.line1,
                "Shipping address is required",
            );
            require(
                &mut errors,
                PayerField::ShippingCity,
                &shipping.city,
                "Shipping city is required",
            );
            require(
                &mut errors,
                PayerField::ShippingState,
                &shipping.state,
                "Shipping state is required",
            );
            require(
                &mut errors,
                PayerField::ShippingPostalCode,
                &shipping.postal_code,
                "Shipping postal code is required",
            );
        }

        errors
    }

    /// The address goods ship to.
    #[must_use]
    pub fn effective_shipping_address(&self) -> &Address {
        if self.same_as_shipping {
            &self.billing_address
        } else {
            &self.shipping_address
        }
    }
}

fn require(errors: &mut FieldErrors, field: PayerField, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.insert(field, message.to_string());
    }
}

/// Loose `local@domain.tld` shape check.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"))
        .is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_profile() -> PayerProfile {
        PayerProfile {
            personal_info: PersonalInfo {
                first_name: "John".into(),
                last_name: "Doe".into(),
                email: "john@example.com".into(),
                phone: "+905551112233".into(),
            },
            billing_address: Address {
                line1: "Istiklal Cad. 1".into(),
                city: "Istanbul".into(),
                state: "Istanbul".into(),
                postal_code: "34000".into(),
                country: "TR".into(),
            },
            ..PayerProfile::default()
        }
    }

    #[test]
    fn empty_profile_reports_every_required_field() {
        let errors = PayerProfile::default().check();

        for field in [
            PayerField::FirstName,
            PayerField::LastName,
            PayerField::Email,
            PayerField::Phone,
            PayerField::BillingLine1,
            PayerField::BillingCity,
            PayerField::BillingState,
            PayerField::BillingPostalCode,
        ] {
            assert!(errors.contains_key(&field), "missing {}", field.as_str());
        }
        assert!(!errors.keys().any(PayerField::is_shipping));
    }

    #[test]
    fn complete_profile_passes() {
        assert!(complete_profile().check().is_empty());
    }

    #[test]
    fn whitespace_only_is_missing() {
        let mut profile = complete_profile();
        profile.personal_info.last_name = "   ".into();
        let errors = profile.check();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&PayerField::LastName], "Last name is required");
    }

    #[test]
    fn malformed_email_is_invalid() {
        let mut profile = complete_profile();
        profile.personal_info.email = "john.example.com".into();
        assert_eq!(profile.check()[&PayerField::Email], "Email is invalid");

        profile.personal_info.email = "john@localhost".into();
        assert_eq!(profile.check()[&PayerField::Email], "Email is invalid");
    }

    #[test]
    fn shipping_checked_only_when_separate() {
        let mut profile = complete_profile();
        profile.same_as_shipping = false;
        let errors = profile.check();
        assert_eq!(errors.len(), 4);
        assert!(errors.keys().all(PayerField::is_shipping));

        profile.same_as_shipping = true;
        assert!(profile.check().is_empty());
    }

    #[test]
    fn field_keys_are_stable() {
        let json = serde_json::to_value(PayerProfile {
            errors: complete_profile()
                .check()
                .into_iter()
                .chain([(PayerField::ShippingPostalCode, "x".to_string())])
                .collect(),
            ..PayerProfile::default()
        })
        .unwrap();
        assert_eq!(json["errors"]["shippingPostalCode"], "x");
        assert_eq!(PayerField::BillingLine1.as_str(), "billingLine1");
    }

    #[test]
    fn partial_updates_merge() {
        let mut address = Address::default();
        address.apply(AddressUpdate {
            city: Some("Ankara".into()),
            ..AddressUpdate::default()
        });
        address.apply(AddressUpdate {
            postal_code: Some("06000".into()),
            ..AddressUpdate::default()
        });

        assert_eq!(address.city, "Ankara");
        assert_eq!(address.postal_code, "06000");
        assert_eq!(address.country, DEFAULT_COUNTRY);
    }

    #[test]
    fn persisted_shape_is_camel_case() {
        let json = serde_json::to_value(complete_profile()).unwrap();
        assert_eq!(json["personalInfo"]["firstName"], "John");
        assert_eq!(json["billingAddress"]["postalCode"], "34000");
        assert_eq!(json["sameAsShipping"], true);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let profile: PayerProfile =
            serde_json::from_str(r#"{"personalInfo":{"firstName":"Ada"},"isValid":false}"#)
                .unwrap();
        assert_eq!(profile.personal_info.first_name, "Ada");
        assert!(profile.same_as_shipping);
        assert_eq!(profile.billing_address.country, DEFAULT_COUNTRY);
    }
}
