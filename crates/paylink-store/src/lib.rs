//! Key/value persistence for paylink checkout state.
//!
//! Checkout state survives restarts as JSON blobs stored under a string key,
//! one entry per state container:
//!
//! - `payerInfo`: the payer profile
//! - `cartData`: the cart
//!
//! The raw [`Store`] trait moves bytes; [`JsonStore`] layers the best-effort
//! JSON contract on top: saves never fail the caller, malformed content loads
//! as absent, and removal is idempotent.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use paylink_store::{keys, FileStore, JsonStore};
//!
//! let store = JsonStore::new(Arc::new(FileStore::open("/tmp/paylink").unwrap()));
//!
//! store.save(keys::CART_STATE, &serde_json::json!({ "items": [] }));
//! let restored: Option<serde_json::Value> = store.load(keys::CART_STATE);
//! store.remove(keys::CART_STATE);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod file;
pub mod json;
pub mod keys;
pub mod memory;
#[cfg(feature = "rocksdb-backend")]
pub mod rocks;

pub use error::{Result, StoreError};
pub use file::FileStore;
pub use json::JsonStore;
pub use memory::MemoryStore;
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksStore;

/// The storage trait defining raw key/value operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (files on disk, `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Insert or replace the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn put(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Delete the value under `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn delete(&self, key: &str) -> Result<()>;
}
