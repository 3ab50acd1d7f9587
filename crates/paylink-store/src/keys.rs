//! Storage keys for checkout state.

use crate::error::{Result, StoreError};

/// Entry holding the payer profile.
pub const PAYER_PROFILE: &str = "payerInfo";

/// Entry holding the cart.
pub const CART_STATE: &str = "cartData";

/// Check that a key is non-empty and made of `[A-Za-z0-9_-]`.
///
/// # Errors
///
/// Returns `StoreError::InvalidKey` otherwise.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
