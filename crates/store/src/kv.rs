use crate::error::StoreError;

/// Key/value storage behind the session and preference layers.
///
/// Keys follow a namespaced convention: `auth_token`, `prefs:incidents`,
/// `prefs:users`, etc. Implementations must be safe to share across
/// threads; every operation is atomic per key.
pub trait KvStore: Send + Sync {
    /// Get the value for a key. Returns `None` if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set a key-value pair, replacing any existing value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// Scan all keys matching a prefix. Returns sorted (key, value) pairs.
    fn scan(&self, prefix: &str) -> Result<Vec<(String, Vec<u8>)>, StoreError>;
}
