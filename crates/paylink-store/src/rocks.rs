//! `RocksDB` storage implementation.
//!
//! This module provides the `RocksStore` implementation of the `Store` trait.
//! Checkout entries live in a single `checkout_state` column family.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, MultiThreaded, Options};

use crate::error::{Result, StoreError};
use crate::Store;

/// Column family holding checkout state entries.
pub const CHECKOUT_STATE_CF: &str = "checkout_state";

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(
            CHECKOUT_STATE_CF,
            Options::default(),
        )];

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get the column family handle.
    fn cf(&self) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db.cf_handle(CHECKOUT_STATE_CF).ok_or_else(|| {
            StoreError::Database(format!("column family not found: {CHECKOUT_STATE_CF}"))
        })
    }
}

impl Store for RocksStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let cf = self.cf()?;
        self.db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .put_cf(&cf, key.as_bytes(), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn delete(&self, key: &str) -> Result<()> {
        let cf = self.cf()?;
        self.db
            .delete_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_delete() {
        let dir = tempfile::tempdir().unwrap();
        let store = RocksStore::open(dir.path()).unwrap();

        store.put("cartData", b"{}").unwrap();
        assert_eq!(store.get("cartData").unwrap().unwrap(), b"{}");

        store.delete("cartData").unwrap();
        store.delete("cartData").unwrap();
        assert!(store.get("cartData").unwrap().is_none());
    }

    #[test]
    fn reopen_keeps_entries() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = RocksStore::open(dir.path()).unwrap();
            store.put("payerInfo", b"{\"sameAsShipping\":true}").unwrap();
        }
        let store = RocksStore::open(dir.path()).unwrap();
        assert!(store.get("payerInfo").unwrap().is_some());
    }
}
