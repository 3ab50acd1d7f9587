//! Cart types, totals and the product catalog.
//!
//! `Cart` is the plain data behind the cart container: ordered lines, the
//! derived totals, the currency and the two payment references. Totals are
//! never set directly; every mutation here ends with `recalculate`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::ids::{custom_product_id, generate_reference};

/// Service fee applied on top of the subtotal (5%).
pub const FEE_RATE: f64 = 0.05;

/// Currency used by a fresh cart.
pub const DEFAULT_CURRENCY: &str = "TRY";

/// Kind of purchasable item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Physical goods.
    #[default]
    Product,
    /// Services and plans.
    Service,
}

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID; fixed for catalog products.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Product or service.
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    /// Unit price in currency units.
    pub price: f64,
    /// Optional image as a data URI.
    #[serde(default)]
    pub image: Option<String>,
}

impl Product {
    fn listed(id: &str, name: &str, product_type: ProductType, price: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            product_type,
            price,
            image: None,
        }
    }
}

/// The fixed product catalog.
#[must_use]
pub fn catalog() -> Vec<Product> {
    vec![
        Product::listed("PRODUCT-A", "Product A", ProductType::Product, 100.0),
        Product::listed("PRODUCT-B", "Product B", ProductType::Product, 200.0),
        Product::listed("SERVICE-C", "Service C", ProductType::Service, 300.0),
        Product::listed("PLAN-D", "Plan D", ProductType::Service, 400.0),
    ]
}

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product, flattened into the line.
    #[serde(flatten)]
    pub product: Product,
    /// Number of units, at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Subtotal, fee and total of a cart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of line totals.
    pub subtotal: f64,
    /// Service fee on the subtotal.
    pub fee: f64,
    /// Subtotal plus fee.
    pub total: f64,
}

/// Service fee for a subtotal, rounded to the nearest whole unit.
#[must_use]
pub fn service_fee(subtotal: f64) -> f64 {
    (subtotal * FEE_RATE).round()
}

/// Compute the totals of a set of lines.
#[must_use]
pub fn compute_totals(items: &[CartLine]) -> Totals {
    let subtotal: f64 = items.iter().map(CartLine::line_total).sum();
    let fee = service_fee(subtotal);
    Totals {
        subtotal,
        fee,
        total: subtotal + fee,
    }
}

/// Read-only summary of a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Total units across all lines.
    pub item_count: u64,
    /// Sum of line totals.
    pub subtotal: f64,
    /// Service fee.
    pub fee: f64,
    /// Amount to pay.
    pub total: f64,
    /// Currency code.
    pub currency: String,
}

/// Data entered for a product that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomProduct {
    /// Display name.
    pub name: String,
    /// Product or service.
    #[serde(rename = "type", default)]
    pub product_type: ProductType,
    /// Unit price.
    pub price: f64,
    /// Initial quantity.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Optional image as a data URI.
    #[serde(default)]
    pub image: Option<String>,
}

const fn default_quantity() -> u32 {
    1
}

impl CustomProduct {
    /// Check the entered data the way the add-product form does.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidProduct` listing every invalid field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = BTreeMap::new();
        if self.name.trim().is_empty() {
            errors.insert("name".to_string(), "Product name is required".to_string());
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            errors.insert("price".to_string(), "Valid price is required".to_string());
        }
        if self.quantity == 0 {
            errors.insert("quantity".to_string(), "Valid quantity is required".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CheckoutError::InvalidProduct(errors))
        }
    }

    fn into_line(self, id: String) -> CartLine {
        CartLine {
            product: Product {
                id,
                name: self.name.trim().to_string(),
                product_type: self.product_type,
                price: self.price,
                image: self.image,
            },
            quantity: self.quantity.max(1),
        }
    }
}

/// Cart contents, totals and payment references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartLine>,
    /// Sum of line totals.
    #[serde(default)]
    pub subtotal: f64,
    /// Service fee.
    #[serde(default)]
    pub fee: f64,
    /// Amount to pay.
    #[serde(default)]
    pub total: f64,
    /// Three-letter currency code.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Merchant reference sent with the payment.
    #[serde(default = "generate_reference")]
    pub merchant_ref: String,
    /// Invoice ID sent with the payment.
    #[serde(default = "generate_reference")]
    pub invoice_id: String,
    /// The fixed catalog; never read back from stored state.
    #[serde(skip_deserializing, default = "catalog")]
    pub available_products: Vec<Product>,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

impl Cart {
    /// Create an empty cart with fresh references.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            subtotal: 0.0,
            fee: 0.0,
            total: 0.0,
            currency: default_currency(),
            merchant_ref: generate_reference(),
            invoice_id: generate_reference(),
            available_products: catalog(),
        }
    }

    /// Recompute subtotal, fee and total from the lines.
    pub fn recalculate(&mut self) {
        let totals = compute_totals(&self.items);
        self.subtotal = totals.subtotal;
        self.fee = totals.fee;
        self.total = totals.total;
    }

    /// Drop lines that cannot exist (zero quantity) and recompute totals.
    ///
    /// Applied to carts restored from storage.
    pub fn normalize(&mut self) {
        self.items.retain(|line| line.quantity > 0);
        self.recalculate();
    }

    /// Current totals.
    #[must_use]
    pub fn totals(&self) -> Totals {
        Totals {
            subtotal: self.subtotal,
            fee: self.fee,
            total: self.total,
        }
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Find a line by product ID.
    #[must_use]
    pub fn line(&self, id: &str) -> Option<&CartLine> {
        self.items.iter().find(|line| line.product.id == id)
    }

    /// Find a catalog product by ID.
    #[must_use]
    pub fn catalog_product(&self, id: &str) -> Option<&Product> {
        self.available_products.iter().find(|p| p.id == id)
    }

    /// Add `quantity` units of a product, merging into an existing line.
    ///
    /// A zero quantity counts as one unit.
    pub fn add(&mut self, product: Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(line) = self.items.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLine { product, quantity });
        }
        self.recalculate();
    }

    /// Remove a line regardless of its quantity.
    ///
    /// Returns whether a line was removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product.id != id);
        self.recalculate();
        self.items.len() != before
    }

    /// Set the absolute quantity of a line; zero or less removes it.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        match u32::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                if let Some(line) = self.items.iter_mut().find(|l| l.product.id == id) {
                    line.quantity = quantity;
                }
                self.recalculate();
            }
            Ok(_) => {
                self.remove(id);
            }
            // Negative values remove; values past u32 clamp.
            Err(_) if quantity < 0 => {
                self.remove(id);
            }
            Err(_) => self.set_quantity(id, i64::from(u32::MAX)),
        }
    }

    /// Next free custom product ID at or after `millis`.
    #[must_use]
    pub fn next_custom_id(&self, millis: i64) -> String {
        let mut millis = millis;
        loop {
            let id = custom_product_id(millis);
            if self.line(&id).is_none() && self.catalog_product(&id).is_none() {
                return id;
            }
            millis += 1;
        }
    }

    /// Append a custom product as a new line under a fresh ID.
    ///
    /// Returns the generated ID.
    pub fn add_custom(&mut self, product: CustomProduct, millis: i64) -> String {
        let id = self.next_custom_id(millis);
        self.items.push(product.into_line(id.clone()));
        self.recalculate();
        id
    }

    /// Empty the cart and zero the totals.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recalculate();
    }

    /// Build the read-only summary.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.items.iter().map(|l| u64::from(l.quantity)).sum(),
            subtotal: self.subtotal,
            fee: self.fee,
            total: self.total,
            currency: self.currency.clone(),
        }
    }
}

/// Parse a user-entered quantity the way a lenient integer parse does.
///
/// Leading whitespace and sign are accepted and anything after the leading
/// digits is ignored (`"3.7"` is 3). Returns `None` when no digits lead.
#[must_use]
pub fn parse_quantity(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
