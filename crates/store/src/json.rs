//! Typed JSON blob helpers over a [`KvStore`].
//!
//! Stored JSON came from an earlier run of the client and may be stale,
//! truncated, or hand-edited. A malformed blob is treated as an absent
//! value and logged at warn; it is never surfaced as an error.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::kv::KvStore;

/// Read and deserialize a JSON blob. Returns `None` for a missing key
/// and for a blob that fails to parse.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(bytes) = store.get(key)? else {
        return Ok(None);
    };

    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding malformed stored JSON");
            Ok(None)
        }
    }
}

/// Serialize and write a JSON blob, replacing any existing value.
pub fn set_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    store.set(key, &bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
