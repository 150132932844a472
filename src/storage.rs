//! Key-value storage collaborator.
//!
//! Values are stored as JSON strings. A value that fails to decode is treated
//! exactly like a missing one: [`read_json`] logs the problem and returns
//! `Ok(None)`, so callers fall back to their empty state instead of failing.

use std::{rc::Rc, sync::Arc};

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

/// Key holding the persisted cart.
pub const CART_KEY: &str = "ecom_cart";

/// Key holding the receipt of the most recent order.
pub const LAST_ORDER_KEY: &str = "last_order_receipt";

/// Key holding the locally edited profile.
pub const PROFILE_KEY: &str = "ecom_user";

/// Key holding the signed-in user returned by login.
pub const SESSION_USER_KEY: &str = "user";

/// Storage failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing store rejected the read or write.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A value could not be encoded before writing.
    #[error("failed to encode value for {key}")]
    Encode {
        /// Key being written.
        key: String,

        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },
}

/// Synchronous string key-value store.
pub trait Storage {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the store cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Unavailable`] if the store cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: Storage + ?Sized> Storage for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Read and decode the JSON value under `key`.
///
/// Missing keys and undecodable values both yield `Ok(None)`.
///
/// # Errors
///
/// Returns [`StorageError::Unavailable`] only when the store itself fails.
pub fn read_json<T: DeserializeOwned>(
    storage: &impl Storage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(error) => {
            warn!(key, %error, "discarding corrupt stored value");

            Ok(None)
        }
    }
}

/// Encode `value` as JSON and write it under `key`.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails, or
/// [`StorageError::Unavailable`] if the write fails.
pub fn write_json<T: Serialize + ?Sized>(
    storage: &impl Storage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;

    storage.set(key, raw)
}

/// In-process storage, shareable across threads.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<FxHashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Check if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.lock().insert(key.to_string(), value);

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.lock().remove(key);

        Ok(())
    }
}

/// A view of a store whose keys are prefixed with a session id, so several
/// sessions can share one backing store without seeing each other's state.
#[derive(Debug, Clone)]
pub struct ScopedStorage<S> {
    inner: S,
    scope: String,
}

impl<S: Storage> ScopedStorage<S> {
    /// Wrap `inner`, prefixing every key with `scope`.
    pub fn new(inner: S, scope: impl Into<String>) -> Self {
        Self {
            inner,
            scope: scope.into(),
        }
    }

    /// The session id used as key prefix.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    fn scoped_key(&self, key: &str) -> String {
        format!("{}:{key}", self.scope)
    }
}

impl<S: Storage> Storage for ScopedStorage<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(&self.scoped_key(key))
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.inner.set(&self.scoped_key(key), value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(&self.scoped_key(key))
    }
}
