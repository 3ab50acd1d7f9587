//! Cart state container.

use paylink_core::{
    parse_quantity, unix_millis, Cart, CartSummary, CheckoutError, CustomProduct, Product,
    Result,
};
use paylink_store::{keys, JsonStore};

/// Owns the cart for one checkout session.
///
/// Totals are recomputed after every mutation and the full cart is persisted
/// under [`keys::CART_STATE`].
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Cart,
    store: JsonStore,
}

impl CartState {
    /// Restore the persisted cart, or start a fresh one.
    ///
    /// Stored totals are ignored and recomputed from the lines.
    #[must_use]
    pub fn load(store: JsonStore) -> Self {
        let mut cart = store.load::<Cart>(keys::CART_STATE).unwrap_or_default();
        cart.normalize();
        Self { cart, store }
    }

    /// Current cart snapshot.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The fixed product catalog.
    #[must_use]
    pub fn available_products(&self) -> &[Product] {
        &self.cart.available_products
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    pub fn add_item(&mut self, product: Product, quantity: u32) {
        tracing::debug!(product_id = %product.id, quantity, "Adding item to cart");
        self.cart.add(product, quantity);
        self.persist();
    }

    /// Add a product from the catalog by ID.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::UnknownProduct` if the ID is not in the catalog.
    pub fn add_catalog_item(&mut self, product_id: &str, quantity: u32) -> Result<()> {
        let product = self
            .cart
            .catalog_product(product_id)
            .cloned()
            .ok_or_else(|| CheckoutError::UnknownProduct(product_id.to_string()))?;
        self.add_item(product, quantity);
        Ok(())
    }

    /// Remove the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let removed = self.cart.remove(product_id);
        self.persist();
        removed
    }

    /// Set the quantity of a line; zero or less removes it.
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        self.cart.set_quantity(product_id, quantity);
        self.persist();
    }

    /// Set the quantity of a line from user-entered text.
    ///
    /// Text without a leading integer counts as zero and removes the line.
    pub fn update_quantity_input(&mut self, product_id: &str, input: &str) {
        self.update_quantity(product_id, parse_quantity(input).unwrap_or(0));
    }

    /// Validate and append a user-defined product. Returns its new ID.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidProduct` if the form data is invalid.
    pub fn add_custom_product(&mut self, product: CustomProduct) -> Result<String> {
        product.validate()?;
        let id = self.cart.add_custom(product, unix_millis());
        tracing::debug!(product_id = %id, "Added custom product");
        self.persist();
        Ok(id)
    }

    /// Empty the cart and forget the persisted copy.
    ///
    /// Currency and references are kept for the session.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.store.remove(keys::CART_STATE);
    }

    /// Set the currency code (upper-cased).
    pub fn set_currency(&mut self, currency: &str) {
        self.cart.currency = currency.trim().to_ascii_uppercase();
        self.cart.recalculate();
        self.persist();
    }

    /// Replace the merchant reference.
    pub fn set_merchant_ref(&mut self, merchant_ref: impl Into<String>) {
        self.cart.merchant_ref = merchant_ref.into();
        self.persist();
    }

    /// Replace the invoice ID.
    pub fn set_invoice_id(&mut self, invoice_id: impl Into<String>) {
        self.cart.invoice_id = invoice_id.into();
        self.persist();
    }

    /// Generate and store a fresh merchant reference.
    pub fn generate_new_merchant_ref(&mut self) -> &str {
        self.set_merchant_ref(paylink_core::generate_reference());
        &self.cart.merchant_ref
    }

    /// Generate and store a fresh invoice ID.
    pub fn generate_new_invoice_id(&mut self) -> &str {
        self.set_invoice_id(paylink_core::generate_reference());
        &self.cart.invoice_id
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Item count and totals.
    #[must_use]
    pub fn cart_summary(&self) -> CartSummary {
        self.cart.summary()
    }

    fn persist(&self) {
        self.store.save(keys::CART_STATE, &self.cart);
    }
}
