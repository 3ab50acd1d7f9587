//! Identifier generation for carts and payment links.
//!
//! Merchant references and invoice IDs combine a millisecond timestamp with a
//! short random base-36 suffix (`ETC-1718000000000-K3ZQ`). They are unique in
//! practice, not by construction: nothing checks for collisions.

use chrono::Utc;
use rand::Rng;

/// Prefix for merchant references and invoice IDs.
pub const REFERENCE_PREFIX: &str = "ETC";

/// Prefix for custom product IDs.
pub const CUSTOM_PRODUCT_PREFIX: &str = "PRODUCT";

/// Length of the random suffix on references.
pub const REFERENCE_SUFFIX_LEN: usize = 4;

const BASE36_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Current Unix time in milliseconds.
#[must_use]
pub fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Generate `len` random uppercase base-36 characters.
#[must_use]
pub fn random_base36(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| char::from(BASE36_ALPHABET[rng.gen_range(0..BASE36_ALPHABET.len())]))
        .collect()
}

/// Generate a fresh merchant reference or invoice ID.
#[must_use]
pub fn generate_reference() -> String {
    format!(
        "{REFERENCE_PREFIX}-{}-{}",
        unix_millis(),
        random_base36(REFERENCE_SUFFIX_LEN)
    )
}

/// Build the ID of a custom product created at `millis`.
#[must_use]
pub fn custom_product_id(millis: i64) -> String {
    format!("{CUSTOM_PRODUCT_PREFIX}-{millis}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_shape() {
        let reference = generate_reference();
        let parts: Vec<&str> = reference.split('-').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ETC");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), REFERENCE_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn consecutive_references_differ() {
        let refs: std::collections::HashSet<_> = (0..50).map(|_| generate_reference()).collect();
        // Same-millisecond calls rely on the random suffix.
        assert!(refs.len() > 45);
    }

    #[test]
    fn random_base36_length() {
        assert_eq!(random_base36(9).len(), 9);
        assert!(random_base36(0).is_empty());
    }

    #[test]
    fn custom_product_id_format() {
        assert_eq!(custom_product_id(1_700_000_000_000), "PRODUCT-1700000000000");
    }
}
