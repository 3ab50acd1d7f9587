//! Best-effort JSON persistence over a raw [`Store`].
//!
//! State containers call this after every mutation. Nothing here returns an
//! error: failures are logged and the container keeps working in memory.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Store;

/// JSON adapter with swallow-and-log failure semantics.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<dyn Store>,
}

impl fmt::Debug for JsonStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonStore").finish_non_exhaustive()
    }
}

impl JsonStore {
    /// Wrap a raw store.
    #[must_use]
    pub fn new(inner: Arc<dyn Store>) -> Self {
        Self { inner }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let data = match serde_json::to_vec(value) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to serialize state - not persisted");
                return;
            }
        };

        if let Err(e) = self.inner.put(key, &data) {
            tracing::warn!(key, error = %e, "Failed to persist state - continuing in memory");
        }
    }

    /// Load and deserialize the value under `key`.
    ///
    /// Missing keys, unreadable backends and malformed JSON all yield `None`.
    #[must_use]
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let data = match self.inner.get(key) {
            Ok(Some(data)) => data,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read stored state - treating as absent");
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored state is malformed - treating as absent");
                None
            }
        }
    }

    /// Delete the value under `key`. Missing keys are fine.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.inner.delete(key) {
            tracing::warn!(key, error = %e, "Failed to remove stored state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Result, StoreError};
    use crate::{keys, FileStore, MemoryStore};
    use paylink_core::{catalog, Cart};

    /// A backend where every operation fails.
    struct BrokenStore;

    impl Store for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(StoreError::Database("disk on fire".into()))
        }

        fn put(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(StoreError::Database("quota exceeded".into()))
        }

        fn delete(&self, _key: &str) -> Result<()> {
            Err(StoreError::Database("read-only".into()))
        }
    }

    #[test]
    fn cart_roundtrip() {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        let mut cart = Cart::new();
        cart.add(catalog()[1].clone(), 3);
        cart.currency = "USD".into();

        store.save(keys::CART_STATE, &cart);
        let mut loaded: Cart = store.load(keys::CART_STATE).unwrap();
        loaded.normalize();

        assert_eq!(loaded.items, cart.items);
        assert_eq!(loaded.currency, "USD");
        assert_eq!(loaded.merchant_ref, cart.merchant_ref);
        assert_eq!(loaded.invoice_id, cart.invoice_id);
        assert!((loaded.total - cart.total).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_key_is_absent() {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        assert!(store.load::<Cart>(keys::CART_STATE).is_none());
    }

    #[test]
    fn malformed_content_is_absent() {
        let raw = Arc::new(MemoryStore::new());
        raw.put(keys::PAYER_PROFILE, b"{not json").unwrap();

        let store = JsonStore::new(raw);
        assert!(store.load::<serde_json::Value>(keys::PAYER_PROFILE).is_none());
    }

    #[test]
    fn backend_failures_are_swallowed() {
        let store = JsonStore::new(Arc::new(BrokenStore));

        store.save(keys::CART_STATE, &Cart::new());
        store.remove(keys::CART_STATE);
        assert!(store.load::<Cart>(keys::CART_STATE).is_none());
    }

    #[test]
    fn survives_reopen_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cart = Cart::new();
        {
            let store = JsonStore::new(Arc::new(FileStore::open(dir.path()).unwrap()));
            store.save(keys::CART_STATE, &cart);
        }

        let store = JsonStore::new(Arc::new(FileStore::open(dir.path()).unwrap()));
        let loaded: Cart = store.load(keys::CART_STATE).unwrap();
        assert_eq!(loaded.merchant_ref, cart.merchant_ref);
    }

    #[test]
    fn remove_is_idempotent() {
        let store = JsonStore::new(Arc::new(MemoryStore::new()));
        store.save(keys::PAYER_PROFILE, &serde_json::json!({"sameAsShipping": false}));
        store.remove(keys::PAYER_PROFILE);
        store.remove(keys::PAYER_PROFILE);
        assert!(store.load::<serde_json::Value>(keys::PAYER_PROFILE).is_none());
    }
}
